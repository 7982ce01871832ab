//! Bracket Picker - fills an NCAA tournament bracket from team statistics.
//!
//! Each matchup is read from a bracket source, both teams are scored with a
//! stats heuristic scaled by a random multiplier, and the higher score is
//! picked. After the championship a tiebreaker score is predicted from the
//! finalists' scoring averages. With the `python` feature the picker is
//! also available as a Python extension module.

pub mod config;
pub mod constants;
pub mod error;
pub mod memory;
pub mod picker;
pub mod score;
pub mod simulation;
pub mod source;
pub mod team;
pub mod tiebreaker;

#[cfg(feature = "python")]
mod python;

pub use config::PickerConfig;
pub use constants::{CHAMPIONSHIP_MATCHUP, NUMBER_OF_MATCHUPS, NUMBER_OF_TEAMS};
pub use error::{PickerError, Result};
pub use memory::InMemoryBracket;
pub use picker::{BracketPicker, BracketReport, MatchupResult};
pub use score::{is_upset, raw_score, score_matchup, team_score, ScoredMatchup};
pub use simulation::{simulate_brackets, SimulationSummary};
pub use source::{BracketSource, Side};
pub use team::{get_wins_and_losses, StatKey, TeamStats};
pub use tiebreaker::{predict_tiebreaker, TieBreakPolicy, TiebreakerPrediction};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn bracket_picker(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Matchup logs go to stderr; RUST_LOG overrides the level.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    // Classes
    m.add_class::<TeamStats>()?;
    m.add_class::<MatchupResult>()?;
    m.add_class::<TiebreakerPrediction>()?;
    m.add_class::<BracketReport>()?;
    m.add_class::<SimulationSummary>()?;

    // Functions
    m.add_function(wrap_pyfunction!(python::fill_bracket, m)?)?;
    m.add_function(wrap_pyfunction!(python::team_score, m)?)?;
    m.add_function(wrap_pyfunction!(python::get_wins_and_losses, m)?)?;
    m.add_function(wrap_pyfunction!(python::simulate_brackets, m)?)?;

    // Constants
    m.add("NUMBER_OF_MATCHUPS", NUMBER_OF_MATCHUPS)?;
    m.add("CHAMPIONSHIP_MATCHUP", CHAMPIONSHIP_MATCHUP)?;
    m.add("DEFAULT_SETTLE_MS", constants::DEFAULT_SETTLE_MS)?;
    m.add(
        "STAT_LABELS",
        StatKey::ALL.iter().map(|k| k.label()).collect::<Vec<_>>(),
    )?;

    Ok(())
}
