use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use crate::config::PickerConfig;
use crate::error::Result;
use crate::memory::InMemoryBracket;
use crate::picker::BracketPicker;
use crate::team::TeamStats;

/// Aggregate of many independent bracket fills.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug)]
pub struct SimulationSummary {
    pub simulations: usize,

    /// Upsets picked in each fill, in run order
    pub upset_counts: Vec<usize>,

    pub mean_upsets: f64,

    /// Sample standard deviation; NaN with fewer than two fills
    pub upset_std_dev: f64,

    /// Championships won per team name
    pub champions: HashMap<String, usize>,
}

impl SimulationSummary {
    /// Fraction of fills that crowned `name`.
    pub fn champion_share(&self, name: &str) -> f64 {
        if self.simulations == 0 {
            return 0.0;
        }
        *self.champions.get(name).unwrap_or(&0) as f64 / self.simulations as f64
    }

    /// The team crowned most often, with its count.
    pub fn favorite(&self) -> Option<(&str, usize)> {
        self.champions
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, &count)| (name.as_str(), count))
    }
}

/// Fill a fresh copy of the bracket `n_simulations` times.
///
/// Each fill gets its own seed drawn from a master RNG, so a given `seed`
/// reproduces the whole batch. Runs are sequential and skip the settle delay
/// and per-matchup logging.
pub fn simulate_brackets(
    teams: &[TeamStats],
    n_simulations: usize,
    seed: Option<u64>,
) -> Result<SimulationSummary> {
    let template = InMemoryBracket::new(teams.to_vec())?;
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut upset_counts = Vec::with_capacity(n_simulations);
    let mut champions: HashMap<String, usize> = HashMap::new();

    for _ in 0..n_simulations {
        let config = PickerConfig::immediate()
            .with_seed(rng.gen::<u64>())
            .with_log_matchups(false);
        let mut bracket = template.clone();
        let report = BracketPicker::new(config).fill(&mut bracket)?;

        upset_counts.push(report.upsets);
        if let Some(champion) = report.champion() {
            *champions
                .entry(champion.display_name().to_string())
                .or_insert(0) += 1;
        }
    }

    let (mean_upsets, upset_std_dev) = mean_and_std_dev(&upset_counts);
    log::info!(
        "{} simulations: {:.2} upsets on average (std dev {:.2}), {} different champions",
        n_simulations,
        mean_upsets,
        upset_std_dev,
        champions.len()
    );

    Ok(SimulationSummary {
        simulations: n_simulations,
        upset_counts,
        mean_upsets,
        upset_std_dev,
        champions,
    })
}

fn mean_and_std_dev(counts: &[usize]) -> (f64, f64) {
    use statrs::statistics::Statistics;

    let samples: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    (samples.iter().mean(), samples.iter().std_dev())
}
