use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::PickerConfig;
use crate::constants::{CHAMPIONSHIP_MATCHUP, NUMBER_OF_MATCHUPS};
use crate::error::Result;
use crate::score::{score_matchup, ScoredMatchup};
use crate::source::{BracketSource, Side};
use crate::team::TeamStats;
use crate::tiebreaker::{predict_tiebreaker, TiebreakerPrediction};

/// Outcome of one matchup.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug)]
pub struct MatchupResult {
    pub index: usize,
    pub teams: [TeamStats; 2],
    pub scored: ScoredMatchup,
}

impl MatchupResult {
    pub fn winner(&self) -> &TeamStats {
        &self.teams[self.scored.winner.index()]
    }

    pub fn loser(&self) -> &TeamStats {
        &self.teams[self.scored.winner.other().index()]
    }

    pub fn is_upset(&self) -> bool {
        self.scored.upset
    }
}

/// Everything decided during one bracket fill.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug)]
pub struct BracketReport {
    /// One entry per matchup, in the order they were picked.
    pub matchups: Vec<MatchupResult>,
    pub tiebreaker: TiebreakerPrediction,
    pub upsets: usize,
}

impl BracketReport {
    pub fn champion(&self) -> Option<&TeamStats> {
        self.matchups.last().map(MatchupResult::winner)
    }
}

/// Fills a bracket matchup by matchup.
///
/// Owns the random source, so two pickers built with the same seed make
/// the same picks against the same bracket.
pub struct BracketPicker {
    config: PickerConfig,
    rng: ChaCha8Rng,
    upsets: usize,
}

impl BracketPicker {
    pub fn new(config: PickerConfig) -> Self {
        let rng = match config.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };

        BracketPicker {
            config,
            rng,
            upsets: 0,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Upsets picked so far in the current fill.
    pub fn upsets(&self) -> usize {
        self.upsets
    }

    /// Pick every matchup in order, then enter the tiebreaker.
    ///
    /// Stops at the first error; picks already made stay in the source.
    pub fn fill<S: BracketSource + ?Sized>(&mut self, source: &mut S) -> Result<BracketReport> {
        self.upsets = 0;
        let mut matchups = Vec::with_capacity(NUMBER_OF_MATCHUPS);

        for index in 1..=NUMBER_OF_MATCHUPS {
            let result = self.pick_matchup(source, index)?;
            self.select_team_in_matchup(source, index, result.winner())?;
            matchups.push(result);
        }

        let tiebreaker = self.input_championship_score(source)?;
        if self.config.log_matchups {
            log::info!("Number of upsets: {}", self.upsets);
        }

        Ok(BracketReport {
            matchups,
            tiebreaker,
            upsets: self.upsets,
        })
    }

    /// Read and score one matchup without selecting a winner.
    pub fn pick_matchup<S: BracketSource + ?Sized>(
        &mut self,
        source: &mut S,
        index: usize,
    ) -> Result<MatchupResult> {
        let [first, second] = self.matchup_data(source, index)?;
        let scored = score_matchup(&first, &second, &mut self.rng)?;

        if scored.upset {
            self.upsets += 1;
        }

        if self.config.log_matchups {
            log::info!(
                "MATCHUP: {}{}",
                index,
                if scored.upset { " (UPSET)" } else { "" }
            );
            for (side, team) in Side::BOTH.iter().zip([&first, &second]) {
                log::info!(
                    "  {} ({}): {}",
                    team.display_name(),
                    scored.seed(*side),
                    scored.score(*side)
                );
            }
        }

        Ok(MatchupResult {
            index,
            teams: [first, second],
            scored,
        })
    }

    /// Open the preview for `index`, read both teams, close it again.
    pub fn matchup_data<S: BracketSource + ?Sized>(
        &self,
        source: &mut S,
        index: usize,
    ) -> Result<[TeamStats; 2]> {
        log::debug!("Opening preview for matchup {index}");
        source.open_matchup_preview(index)?;
        self.settle();

        let first = source.team_statistics(index, Side::First)?;
        let second = source.team_statistics(index, Side::Second)?;

        source.close_matchup_preview()?;
        self.settle();

        Ok([first, second])
    }

    fn select_team_in_matchup<S: BracketSource + ?Sized>(
        &self,
        source: &mut S,
        index: usize,
        team: &TeamStats,
    ) -> Result<()> {
        log::debug!("Selecting {} in matchup {}", team.display_name(), index);
        source.select_winner(index, &team.id)?;
        self.settle();
        Ok(())
    }

    fn input_championship_score<S: BracketSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<TiebreakerPrediction> {
        let [first, second] = self.matchup_data(source, CHAMPIONSHIP_MATCHUP)?;
        let prediction = predict_tiebreaker(&first, &second, self.config.tie_policy, &mut self.rng)?;

        if self.config.log_matchups {
            log::info!(
                "Tiebreaker: {} {} - {} {} (entered {}-{})",
                prediction.first.name,
                prediction.first.score,
                prediction.second.name,
                prediction.second.score,
                prediction.winning,
                prediction.losing
            );
        }
        source.set_tiebreaker_scores(prediction.winning, prediction.losing)?;

        Ok(prediction)
    }

    /// Block for the configured settle delay.
    fn settle(&self) {
        if !self.config.settle_delay.is_zero() {
            std::thread::sleep(self.config.settle_delay);
        }
    }
}
