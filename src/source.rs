use std::fmt;

use crate::error::Result;
use crate::team::TeamStats;

/// Which slot of a matchup a team occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub fn index(&self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::First),
            1 => Some(Side::Second),
            _ => None,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// A bracket that can be read and filled one matchup at a time.
///
/// Matchups are indexed 1..=63. First round matchups come first and the
/// championship is last. Implementations only move data; pacing between
/// calls is handled by the picker.
pub trait BracketSource {
    /// Show the preview holding both teams' statistics for `index`.
    fn open_matchup_preview(&mut self, index: usize) -> Result<()>;

    /// Statistics for one side of the matchup whose preview is open.
    fn team_statistics(&mut self, index: usize, side: Side) -> Result<TeamStats>;

    fn close_matchup_preview(&mut self) -> Result<()>;

    /// Pick `team_id` as the winner of `index`.
    fn select_winner(&mut self, index: usize, team_id: &str) -> Result<()>;

    fn set_tiebreaker_scores(&mut self, winning: i32, losing: i32) -> Result<()>;
}

impl<S: BracketSource + ?Sized> BracketSource for &mut S {
    fn open_matchup_preview(&mut self, index: usize) -> Result<()> {
        (**self).open_matchup_preview(index)
    }

    fn team_statistics(&mut self, index: usize, side: Side) -> Result<TeamStats> {
        (**self).team_statistics(index, side)
    }

    fn close_matchup_preview(&mut self) -> Result<()> {
        (**self).close_matchup_preview()
    }

    fn select_winner(&mut self, index: usize, team_id: &str) -> Result<()> {
        (**self).select_winner(index, team_id)
    }

    fn set_tiebreaker_scores(&mut self, winning: i32, losing: i32) -> Result<()> {
        (**self).set_tiebreaker_scores(winning, losing)
    }
}
