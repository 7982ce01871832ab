use rand::Rng;

use crate::constants::{
    BPI_SCALE, BPI_WEIGHT, MAX_MULTIPLIER, MAX_SEED, MIN_MULTIPLIER, TOP_25_LOSS_WEIGHT,
    TOP_25_WIN_WEIGHT,
};
use crate::error::Result;
use crate::source::Side;
use crate::team::{StatKey, TeamStats};

/// Heuristic strength of a team before randomness is applied.
///
/// Rewards a good BPI rank, a strong seed, games played against top 25
/// teams (wins count three times as much as losses) and the season's
/// scoring margin.
pub fn raw_score(team: &TeamStats) -> Result<f64> {
    let bpi_rank = team.numeric(StatKey::BpiRank)? as f64;
    let seed = team.seed_number()? as f64;
    let (top_25_wins, top_25_losses) = team.top_25_record()?;
    let ppg_differential =
        team.numeric(StatKey::Ppg)? as f64 - team.numeric(StatKey::OppPpg)? as f64;

    Ok((bpi_rank / BPI_SCALE) * BPI_WEIGHT
        + (MAX_SEED as f64 / seed)
        + (top_25_wins as f64 * TOP_25_WIN_WEIGHT)
        + (top_25_losses as f64 * TOP_25_LOSS_WEIGHT)
        + ppg_differential)
}

/// Team score for one matchup: the raw score scaled by `multiplier`.
pub fn team_score(team: &TeamStats, multiplier: f64) -> Result<f64> {
    Ok(raw_score(team)? * multiplier)
}

/// Draw a score multiplier, uniform in [0.15, 0.85).
pub fn sample_multiplier<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(MIN_MULTIPLIER..MAX_MULTIPLIER)
}

/// Side with the higher score. The first side keeps a tie.
pub fn winning_side(first_score: f64, second_score: f64) -> Side {
    if first_score < second_score {
        Side::Second
    } else {
        Side::First
    }
}

/// True when the winner has a strictly worse (larger) seed than the loser.
pub fn is_upset(first_seed: u32, second_seed: u32, winner: Side) -> bool {
    match winner {
        Side::First => first_seed > second_seed,
        Side::Second => second_seed > first_seed,
    }
}

/// Both teams' scores for one matchup and the decision taken from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredMatchup {
    pub scores: [f64; 2],
    pub seeds: [u32; 2],
    pub winner: Side,
    pub upset: bool,
}

impl ScoredMatchup {
    pub fn score(&self, side: Side) -> f64 {
        self.scores[side.index()]
    }

    pub fn seed(&self, side: Side) -> u32 {
        self.seeds[side.index()]
    }
}

/// Score both teams with fresh multipliers and pick the winner.
pub fn score_matchup<R: Rng>(
    first: &TeamStats,
    second: &TeamStats,
    rng: &mut R,
) -> Result<ScoredMatchup> {
    let multipliers = [sample_multiplier(rng), sample_multiplier(rng)];
    score_matchup_with(first, second, multipliers)
}

/// Score both teams with the given multipliers and pick the winner.
pub fn score_matchup_with(
    first: &TeamStats,
    second: &TeamStats,
    multipliers: [f64; 2],
) -> Result<ScoredMatchup> {
    let scores = [
        team_score(first, multipliers[0])?,
        team_score(second, multipliers[1])?,
    ];
    let seeds = [first.seed_number()?, second.seed_number()?];
    let winner = winning_side(scores[0], scores[1]);

    Ok(ScoredMatchup {
        scores,
        seeds,
        winner,
        upset: is_upset(seeds[0], seeds[1], winner),
    })
}
