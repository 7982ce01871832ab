//! Python bindings.
//!
//! Lets an operator drive the picker from an interactive Python console,
//! with any Python object that implements the bracket source methods
//! acting as the bracket.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::PickerConfig;
use crate::constants::DEFAULT_SETTLE_MS;
use crate::error::{PickerError, Result};
use crate::picker::{BracketPicker, BracketReport, MatchupResult};
use crate::simulation::SimulationSummary;
use crate::source::{BracketSource, Side};
use crate::team::{StatKey, TeamStats};
use crate::tiebreaker::{TieBreakPolicy, TiebreakerPrediction};

impl From<PickerError> for PyErr {
    fn from(err: PickerError) -> PyErr {
        match err {
            PickerError::MissingStat { .. }
            | PickerError::InvalidStat { .. }
            | PickerError::InvalidSeed { .. }
            | PickerError::InvalidRecord(_)
            | PickerError::TeamCount { .. } => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Adapts a Python object to `BracketSource`.
///
/// The object needs `open_matchup_preview(index)`,
/// `get_team_statistics(index, side)` returning a dict keyed by stat label,
/// `close_matchup_preview()`, `select_winner(index, team_id)` and
/// `set_tiebreaker_scores(winning, losing)`.
struct PySource {
    inner: Py<PyAny>,
}

fn source_err(err: PyErr) -> PickerError {
    PickerError::Source(err.to_string())
}

impl BracketSource for PySource {
    fn open_matchup_preview(&mut self, index: usize) -> Result<()> {
        Python::with_gil(|py| {
            self.inner
                .call_method1(py, "open_matchup_preview", (index,))
                .map(drop)
                .map_err(source_err)
        })
    }

    fn team_statistics(&mut self, index: usize, side: Side) -> Result<TeamStats> {
        Python::with_gil(|py| {
            let stats = self
                .inner
                .call_method1(py, "get_team_statistics", (index, side.index()))
                .map_err(source_err)?;
            let stats: HashMap<String, Bound<'_, PyAny>> =
                stats.extract(py).map_err(source_err)?;

            let mut pairs = Vec::with_capacity(stats.len());
            for (label, value) in stats {
                pairs.push((label, value.str().map_err(source_err)?.to_string()));
            }
            Ok(TeamStats::from_labels(pairs))
        })
    }

    fn close_matchup_preview(&mut self) -> Result<()> {
        Python::with_gil(|py| {
            self.inner
                .call_method0(py, "close_matchup_preview")
                .map(drop)
                .map_err(source_err)
        })
    }

    fn select_winner(&mut self, index: usize, team_id: &str) -> Result<()> {
        Python::with_gil(|py| {
            self.inner
                .call_method1(py, "select_winner", (index, team_id))
                .map(drop)
                .map_err(source_err)
        })
    }

    fn set_tiebreaker_scores(&mut self, winning: i32, losing: i32) -> Result<()> {
        Python::with_gil(|py| {
            self.inner
                .call_method1(py, "set_tiebreaker_scores", (winning, losing))
                .map(drop)
                .map_err(source_err)
        })
    }
}

#[pymethods]
impl TeamStats {
    /// Build from a dict of stat labels to displayed values.
    #[new]
    fn py_new(stats: HashMap<String, String>) -> Self {
        TeamStats::from_labels(stats)
    }

    #[getter]
    fn id(&self) -> String {
        self.id.clone()
    }

    #[getter]
    fn name(&self) -> String {
        self.display_name().to_string()
    }

    #[getter(seed)]
    fn py_seed(&self) -> PyResult<u32> {
        Ok(self.seed_number()?)
    }

    /// Displayed value for a stat label, e.g. "BPI Rank".
    fn stat(&self, label: &str) -> PyResult<String> {
        StatKey::from_label(label)
            .map(|key| self.get(key).to_string())
            .ok_or_else(|| PyValueError::new_err(format!("Unknown stat label: {label}")))
    }

    fn __str__(&self) -> String {
        self.to_string()
    }

    fn __repr__(&self) -> String {
        format!("TeamStats({:?}, {:?}, seed={})", self.id, self.display_name(), self.seed)
    }
}

#[pymethods]
impl MatchupResult {
    #[getter]
    fn index(&self) -> usize {
        self.index
    }

    #[getter]
    fn teams(&self) -> Vec<TeamStats> {
        self.teams.to_vec()
    }

    #[getter]
    fn scores(&self) -> Vec<f64> {
        self.scored.scores.to_vec()
    }

    #[getter]
    fn seeds(&self) -> Vec<u32> {
        self.scored.seeds.to_vec()
    }

    #[getter(winner)]
    fn py_winner(&self) -> TeamStats {
        self.winner().clone()
    }

    #[getter]
    fn upset(&self) -> bool {
        self.is_upset()
    }

    fn __repr__(&self) -> String {
        format!(
            "MatchupResult({}, {} over {}{})",
            self.index,
            self.winner().display_name(),
            self.loser().display_name(),
            if self.is_upset() { ", upset" } else { "" }
        )
    }
}

#[pymethods]
impl TiebreakerPrediction {
    #[getter]
    fn winning(&self) -> i32 {
        self.winning
    }

    #[getter]
    fn losing(&self) -> i32 {
        self.losing
    }

    /// (team_id, name, score) per finalist, in bracket order.
    #[getter]
    fn finalists(&self) -> Vec<(String, String, i32)> {
        [&self.first, &self.second]
            .into_iter()
            .map(|p| (p.team_id.clone(), p.name.clone(), p.score))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!("TiebreakerPrediction({}-{})", self.winning, self.losing)
    }
}

#[pymethods]
impl BracketReport {
    #[getter]
    fn matchups(&self) -> Vec<MatchupResult> {
        self.matchups.clone()
    }

    #[getter]
    fn upsets(&self) -> usize {
        self.upsets
    }

    #[getter]
    fn tiebreaker(&self) -> TiebreakerPrediction {
        self.tiebreaker.clone()
    }

    #[getter(champion)]
    fn py_champion(&self) -> Option<TeamStats> {
        self.champion().cloned()
    }

    fn __repr__(&self) -> String {
        format!(
            "BracketReport({} matchups, {} upsets, champion={:?})",
            self.matchups.len(),
            self.upsets,
            self.champion().map(|t| t.display_name())
        )
    }
}

#[pymethods]
impl SimulationSummary {
    #[getter]
    fn simulations(&self) -> usize {
        self.simulations
    }

    #[getter]
    fn upset_counts(&self) -> Vec<usize> {
        self.upset_counts.clone()
    }

    #[getter]
    fn mean_upsets(&self) -> f64 {
        self.mean_upsets
    }

    #[getter]
    fn upset_std_dev(&self) -> f64 {
        self.upset_std_dev
    }

    #[getter]
    fn champions(&self) -> HashMap<String, usize> {
        self.champions.clone()
    }

    #[pyo3(name = "champion_share")]
    fn py_champion_share(&self, name: &str) -> f64 {
        self.champion_share(name)
    }

    #[pyo3(name = "favorite")]
    fn py_favorite(&self) -> Option<(String, usize)> {
        self.favorite().map(|(name, count)| (name.to_string(), count))
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationSummary({} simulations, {:.2} upsets on average)",
            self.simulations, self.mean_upsets
        )
    }
}

/// Fill the bracket behind `source`.
///
/// The GIL is released between source calls so the settle delay doesn't
/// block other Python threads.
#[pyfunction]
#[pyo3(signature = (source, seed = None, settle_ms = DEFAULT_SETTLE_MS, fix_ties = true))]
pub fn fill_bracket(
    py: Python<'_>,
    source: Py<PyAny>,
    seed: Option<u64>,
    settle_ms: u64,
    fix_ties: bool,
) -> PyResult<BracketReport> {
    let mut config = PickerConfig::default()
        .with_settle_delay(Duration::from_millis(settle_ms))
        .with_tie_policy(if fix_ties {
            TieBreakPolicy::Separate
        } else {
            TieBreakPolicy::Preserve
        });
    config.seed = seed;

    let mut source = PySource { inner: source };
    Ok(py.allow_threads(|| BracketPicker::new(config).fill(&mut source))?)
}

/// Score a team with the given multiplier.
#[pyfunction]
#[pyo3(signature = (team, multiplier = 1.0))]
pub fn team_score(team: &TeamStats, multiplier: f64) -> PyResult<f64> {
    Ok(crate::score::team_score(team, multiplier)?)
}

/// Split a record string like "27-10" into (wins, losses).
#[pyfunction]
pub fn get_wins_and_losses(record: &str) -> PyResult<(u32, u32)> {
    Ok(crate::team::get_wins_and_losses(record)?)
}

/// Fill an in-memory copy of the bracket many times and summarise the picks.
#[pyfunction]
#[pyo3(signature = (teams, n_simulations, seed = None))]
pub fn simulate_brackets(
    py: Python<'_>,
    teams: Vec<TeamStats>,
    n_simulations: usize,
    seed: Option<u64>,
) -> PyResult<SimulationSummary> {
    Ok(py.allow_threads(|| {
        crate::simulation::simulate_brackets(&teams, n_simulations, seed)
    })?)
}
