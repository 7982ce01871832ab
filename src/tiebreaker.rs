use rand::Rng;

use crate::constants::{MAX_TIEBREAKER_OFFSET, TIEBREAKER_SEPARATION};
use crate::error::{PickerError, Result};
use crate::team::{StatKey, TeamStats};

/// What to do when both finalists are predicted the same score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreakPolicy {
    /// Add two points to the first finalist's prediction.
    #[default]
    Separate,
    /// Keep the tie and enter the same value twice.
    Preserve,
}

/// Predicted championship score for one finalist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamPrediction {
    pub team_id: String,
    pub name: String,
    pub score: i32,
}

/// The two values entered in the tiebreaker inputs.
///
/// `winning` is always the larger value, whichever finalist it was
/// predicted for; `first` and `second` keep the per-team predictions in
/// bracket order.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TiebreakerPrediction {
    pub first: TeamPrediction,
    pub second: TeamPrediction,
    pub winning: i32,
    pub losing: i32,
}

/// Draw a tiebreaker offset: 1..=8 points, positive or negative with equal odds.
pub fn sample_offset<R: Rng>(rng: &mut R) -> i32 {
    let offset = rng.gen_range(1..=MAX_TIEBREAKER_OFFSET);
    if rng.gen_bool(0.5) {
        offset
    } else {
        -offset
    }
}

/// A team's season PPG moved by a random offset.
pub fn randomized_score<R: Rng>(team: &TeamStats, rng: &mut R) -> Result<i32> {
    let ppg = team.numeric(StatKey::Ppg)?;
    let ppg = i32::try_from(ppg).map_err(|_| PickerError::InvalidStat {
        team: team.display_name().to_string(),
        stat: StatKey::Ppg.label(),
        value: team.ppg.clone(),
    })?;
    Ok(ppg.saturating_add(sample_offset(rng)))
}

/// Resolve the per-team predictions into (winning, losing) input values.
pub fn order_scores(first_score: i32, second_score: i32, policy: TieBreakPolicy) -> (i32, i32) {
    let first_score = if first_score == second_score && policy == TieBreakPolicy::Separate {
        first_score.saturating_add(TIEBREAKER_SEPARATION)
    } else {
        first_score
    };

    if first_score > second_score {
        (first_score, second_score)
    } else {
        (second_score, first_score)
    }
}

/// Predict the championship score for the two finalists.
pub fn predict_tiebreaker<R: Rng>(
    first: &TeamStats,
    second: &TeamStats,
    policy: TieBreakPolicy,
    rng: &mut R,
) -> Result<TiebreakerPrediction> {
    let first_score = randomized_score(first, rng)?;
    let second_score = randomized_score(second, rng)?;

    if first_score == second_score {
        log::debug!("Tiebreaker predictions tied at {first_score} ({policy:?})");
    }
    let (winning, losing) = order_scores(first_score, second_score, policy);

    Ok(TiebreakerPrediction {
        first: prediction_for(first, first_score),
        second: prediction_for(second, second_score),
        winning,
        losing,
    })
}

fn prediction_for(team: &TeamStats, score: i32) -> TeamPrediction {
    TeamPrediction {
        team_id: team.id.clone(),
        name: team.display_name().to_string(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn finalist(id: &str, ppg: &str) -> TeamStats {
        TeamStats::new(id, id, 1).with(StatKey::Ppg, ppg)
    }

    #[test]
    fn test_every_offset_is_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = HashSet::new();
        for _ in 0..5000 {
            seen.insert(sample_offset(&mut rng));
        }
        let expected: HashSet<i32> = (1..=8).chain(-8..=-1).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_order_by_magnitude() {
        assert_eq!(order_scores(70, 81, TieBreakPolicy::Separate), (81, 70));
        assert_eq!(order_scores(81, 70, TieBreakPolicy::Separate), (81, 70));
    }

    #[test]
    fn test_tie_policies() {
        assert_eq!(order_scores(75, 75, TieBreakPolicy::Separate), (77, 75));
        assert_eq!(order_scores(75, 75, TieBreakPolicy::Preserve), (75, 75));
    }

    #[test]
    fn test_prediction_keeps_team_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let first = finalist("low", "50");
        let second = finalist("high", "100");

        let prediction =
            predict_tiebreaker(&first, &second, TieBreakPolicy::default(), &mut rng).unwrap();

        assert_eq!(prediction.first.team_id, "low");
        assert_eq!(prediction.winning, prediction.second.score);
        assert_eq!(prediction.losing, prediction.first.score);
    }

    #[test]
    fn test_missing_ppg_is_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(randomized_score(&finalist("x", ""), &mut rng).is_err());
    }

    proptest! {
        #[test]
        fn prop_prediction_within_eight_of_ppg(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let score = randomized_score(&finalist("a", "75"), &mut rng).unwrap();
            prop_assert!((67..=74).contains(&score) || (76..=83).contains(&score));
        }

        #[test]
        fn prop_winning_never_below_losing(a in 40i32..120, b in 40i32..120) {
            let (winning, losing) = order_scores(a, b, TieBreakPolicy::Separate);
            prop_assert!(winning > losing);
            let (winning, losing) = order_scores(a, b, TieBreakPolicy::Preserve);
            prop_assert!(winning >= losing);
        }
    }
}
