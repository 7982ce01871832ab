use std::time::Duration;

use crate::constants::DEFAULT_SETTLE_MS;
use crate::tiebreaker::TieBreakPolicy;

/// Run-time settings for a bracket fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerConfig {
    /// Pause after opening or closing a preview and after every selection,
    /// giving the source time to redraw.
    pub settle_delay: Duration,

    /// Seed for the random multipliers and tiebreaker offsets. `None` seeds
    /// from entropy.
    pub seed: Option<u64>,

    pub tie_policy: TieBreakPolicy,

    /// Log every matchup's teams and scores at info level.
    pub log_matchups: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_MS),
            seed: None,
            tie_policy: TieBreakPolicy::default(),
            log_matchups: true,
        }
    }
}

impl PickerConfig {
    /// Settings for sources that update synchronously: no settle delay.
    pub fn immediate() -> Self {
        PickerConfig::default().with_settle_delay(Duration::ZERO)
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_log_matchups(mut self, log_matchups: bool) -> Self {
        self.log_matchups = log_matchups;
        self
    }

    pub fn with_tie_policy(mut self, tie_policy: TieBreakPolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }
}
