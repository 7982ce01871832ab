use thiserror::Error;

use crate::source::Side;

/// Errors raised while reading, scoring or filling a bracket.
///
/// A run stops at the first error; nothing is retried.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("{team} has no value for {stat}")]
    MissingStat { team: String, stat: &'static str },

    #[error("{team} has unparsable {stat}: {value:?}")]
    InvalidStat {
        team: String,
        stat: &'static str,
        value: String,
    },

    #[error("{team} has invalid seed {seed}, seeds start at 1")]
    InvalidSeed { team: String, seed: i64 },

    #[error("Malformed record string: {0:?}")]
    InvalidRecord(String),

    #[error("Unknown matchup index {0}")]
    UnknownMatchup(usize),

    #[error("Team {team_id} is not playing in matchup {index}")]
    TeamNotInMatchup { index: usize, team_id: String },

    #[error("Matchup {index} has no team on the {side} side yet")]
    MatchupNotReady { index: usize, side: Side },

    #[error("Expected {expected} teams, got {actual}")]
    TeamCount { expected: usize, actual: usize },

    #[error("Bracket source failed: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, PickerError>;
