/// Teams in a full bracket
pub const NUMBER_OF_TEAMS: usize = 64;

/// Matchups in a full bracket, indexed 1..=63
pub const NUMBER_OF_MATCHUPS: usize = NUMBER_OF_TEAMS - 1;

/// Index of the championship game
pub const CHAMPIONSHIP_MATCHUP: usize = NUMBER_OF_MATCHUPS;

/// Matchups in the first round
pub const FIRST_ROUND_MATCHUPS: usize = NUMBER_OF_TEAMS / 2;

/// Weakest seed in a region
pub const MAX_SEED: u32 = 16;

/// BPI ranks are scaled against this many ranked teams
pub const BPI_SCALE: f64 = 200.0;

/// Points lost per full `BPI_SCALE` of BPI rank
pub const BPI_WEIGHT: f64 = -10.0;

/// Points per win against a top 25 team
pub const TOP_25_WIN_WEIGHT: f64 = 6.0;

/// Points per loss against a top 25 team
pub const TOP_25_LOSS_WEIGHT: f64 = 2.0;

/// Lower bound of the random score multiplier (inclusive)
pub const MIN_MULTIPLIER: f64 = 0.15;

/// Upper bound of the random score multiplier (exclusive)
pub const MAX_MULTIPLIER: f64 = 0.85;

/// Largest absolute offset applied to a tiebreaker prediction
pub const MAX_TIEBREAKER_OFFSET: i32 = 8;

/// Amount added to the first prediction when both tiebreaker predictions match
pub const TIEBREAKER_SEPARATION: i32 = 2;

/// Default pause after every action that changes the bracket source
pub const DEFAULT_SETTLE_MS: u64 = 250;

/// Record string used when the source has no record for a team
pub const EMPTY_RECORD: &str = "0-0";

/// Seeds of one region in first round bracket order (1 v 16, 8 v 9, ...)
pub const REGION_SEED_ORDER: [u32; 16] = [1, 16, 8, 9, 5, 12, 4, 13, 6, 11, 3, 14, 7, 10, 2, 15];
