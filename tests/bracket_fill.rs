use bracket_picker::constants::REGION_SEED_ORDER;
use bracket_picker::{
    BracketPicker, BracketSource, InMemoryBracket, PickerConfig, PickerError, Result, Side,
    StatKey, TeamStats, TieBreakPolicy, CHAMPIONSHIP_MATCHUP, NUMBER_OF_MATCHUPS,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Open(usize),
    Stats(usize, Side),
    Close,
    Select(usize, String),
    Tiebreaker(i32, i32),
}

/// Records every call before handing it to an in-memory bracket.
struct RecordingSource {
    bracket: InMemoryBracket,
    calls: Vec<Call>,
    fail_select_at: Option<usize>,
}

impl RecordingSource {
    fn new(teams: Vec<TeamStats>) -> Self {
        RecordingSource {
            bracket: InMemoryBracket::new(teams).unwrap(),
            calls: Vec::new(),
            fail_select_at: None,
        }
    }
}

impl BracketSource for RecordingSource {
    fn open_matchup_preview(&mut self, index: usize) -> Result<()> {
        self.calls.push(Call::Open(index));
        self.bracket.open_matchup_preview(index)
    }

    fn team_statistics(&mut self, index: usize, side: Side) -> Result<TeamStats> {
        self.calls.push(Call::Stats(index, side));
        self.bracket.team_statistics(index, side)
    }

    fn close_matchup_preview(&mut self) -> Result<()> {
        self.calls.push(Call::Close);
        self.bracket.close_matchup_preview()
    }

    fn select_winner(&mut self, index: usize, team_id: &str) -> Result<()> {
        self.calls.push(Call::Select(index, team_id.to_string()));
        if self.fail_select_at == Some(index) {
            return Err(PickerError::Source(format!("no slot for {team_id}")));
        }
        self.bracket.select_winner(index, team_id)
    }

    fn set_tiebreaker_scores(&mut self, winning: i32, losing: i32) -> Result<()> {
        self.calls.push(Call::Tiebreaker(winning, losing));
        self.bracket.set_tiebreaker_scores(winning, losing)
    }
}

/// A field where each team's stats are shown as the page would show them.
fn scraped_teams() -> Vec<TeamStats> {
    (0..64)
        .map(|i| {
            let seed = REGION_SEED_ORDER[i % 16];
            let bpi = (seed - 1) * 4 + (i as u32 / 16) + 1;
            let vs_top_25 = match seed {
                1..=4 => format!("{}-{}", 9 - seed, 2 + seed),
                5..=8 => "2-5".to_string(),
                _ => "--".to_string(),
            };
            TeamStats::from_labels([
                ("id", format!("{}", 100 + i)),
                ("name", format!("Team {i}")),
                ("seed", seed.to_string()),
                ("record", format!("{}-{}", 30 - seed, 3 + seed)),
                ("BPI Rank", bpi.to_string()),
                ("VS Top 25", vs_top_25),
                ("PPG", format!("{}.4", 84 - seed)),
                ("Opp. PPG", format!("{}.9", 62 + seed / 2)),
                ("Conference", "Big East".to_string()),
                ("Last 12 Games", "9-3".to_string()),
            ])
        })
        .collect()
}

fn quiet_picker(seed: u64) -> BracketPicker {
    let _ = env_logger::builder().is_test(true).try_init();
    BracketPicker::new(PickerConfig::immediate().with_seed(seed))
}

#[test]
fn test_calls_follow_matchup_order() {
    let mut source = RecordingSource::new(scraped_teams());
    let report = quiet_picker(2024).fill(&mut source).unwrap();

    // 5 calls per matchup, then 5 more to read the final again and enter the tiebreaker.
    assert_eq!(source.calls.len(), NUMBER_OF_MATCHUPS * 5 + 5);

    for (i, chunk) in source.calls.chunks(5).take(NUMBER_OF_MATCHUPS).enumerate() {
        let index = i + 1;
        let winner = report.matchups[i].winner().id.clone();
        assert_eq!(
            chunk,
            &[
                Call::Open(index),
                Call::Stats(index, Side::First),
                Call::Stats(index, Side::Second),
                Call::Close,
                Call::Select(index, winner),
            ]
        );
    }

    let tail = &source.calls[NUMBER_OF_MATCHUPS * 5..];
    assert_eq!(tail[0], Call::Open(CHAMPIONSHIP_MATCHUP));
    assert_eq!(tail[3], Call::Close);
    assert_eq!(
        tail[4],
        Call::Tiebreaker(report.tiebreaker.winning, report.tiebreaker.losing)
    );
}

#[test]
fn test_champion_won_every_round() {
    let mut source = RecordingSource::new(scraped_teams());
    let report = quiet_picker(8).fill(&mut source).unwrap();

    let champion = report.champion().unwrap().id.clone();
    let wins = report
        .matchups
        .iter()
        .filter(|m| m.winner().id == champion)
        .count();
    assert_eq!(wins, 6);
    assert_eq!(source.bracket.champion().unwrap().id, champion);
}

#[test]
fn test_second_round_uses_first_round_winners() {
    let mut source = RecordingSource::new(scraped_teams());
    let report = quiet_picker(31).fill(&mut source).unwrap();

    let second_round = &report.matchups[32];
    assert_eq!(second_round.index, 33);
    assert_eq!(second_round.teams[0].id, report.matchups[0].winner().id);
    assert_eq!(second_round.teams[1].id, report.matchups[1].winner().id);
}

#[test]
fn test_tie_policy_only_changes_ties() {
    for seed in 0..20 {
        let mut separate = RecordingSource::new(scraped_teams());
        let mut preserve = RecordingSource::new(scraped_teams());

        let a = quiet_picker(seed).fill(&mut separate).unwrap();
        let b = BracketPicker::new(
            PickerConfig::immediate()
                .with_seed(seed)
                .with_tie_policy(TieBreakPolicy::Preserve),
        )
        .fill(&mut preserve)
        .unwrap();

        assert_eq!(a.tiebreaker.first, b.tiebreaker.first);
        assert_eq!(a.tiebreaker.second, b.tiebreaker.second);
        if a.tiebreaker.first.score == a.tiebreaker.second.score {
            assert_eq!(a.tiebreaker.winning, b.tiebreaker.winning + 2);
        } else {
            assert_eq!(
                (a.tiebreaker.winning, a.tiebreaker.losing),
                (b.tiebreaker.winning, b.tiebreaker.losing)
            );
        }
    }
}

#[test]
fn test_source_failure_stops_the_run() {
    let mut source = RecordingSource::new(scraped_teams());
    source.fail_select_at = Some(10);

    let err = quiet_picker(5).fill(&mut source).unwrap_err();

    assert!(matches!(err, PickerError::Source(_)));
    assert_eq!(source.bracket.picks_made(), 9);
    assert!(matches!(source.calls.last(), Some(Call::Select(10, _))));
    assert!(source.bracket.tiebreaker().is_none());
}

#[test]
fn test_scraped_values_parse() {
    let team = &scraped_teams()[0];
    assert_eq!(team.seed_number().unwrap(), 1);
    assert_eq!(team.numeric(StatKey::Ppg).unwrap(), 83);
    assert_eq!(team.numeric(StatKey::OppPpg).unwrap(), 62);
    assert_eq!(team.top_25_record().unwrap(), (8, 3));
    assert_eq!(team.conference, "Big East");
}
