use std::fmt;

use crate::constants::EMPTY_RECORD;
use crate::error::{PickerError, Result};

/// A single piece of information the bracket source shows for a team.
///
/// Labels match the text the matchup preview displays next to each value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKey {
    Id,
    Name,
    Seed,
    Record,
    BpiRank,
    VsTop25,
    Ppg,
    OppPpg,
    Conference,
    Last12Games,
}

impl StatKey {
    pub const ALL: [StatKey; 10] = [
        StatKey::Id,
        StatKey::Name,
        StatKey::Seed,
        StatKey::Record,
        StatKey::BpiRank,
        StatKey::VsTop25,
        StatKey::Ppg,
        StatKey::OppPpg,
        StatKey::Conference,
        StatKey::Last12Games,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatKey::Id => "id",
            StatKey::Name => "name",
            StatKey::Seed => "seed",
            StatKey::Record => "record",
            StatKey::BpiRank => "BPI Rank",
            StatKey::VsTop25 => "VS Top 25",
            StatKey::Ppg => "PPG",
            StatKey::OppPpg => "Opp. PPG",
            StatKey::Conference => "Conference",
            StatKey::Last12Games => "Last 12 Games",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        StatKey::ALL.into_iter().find(|key| key.label() == label)
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Statistics for one team as read from the bracket source.
///
/// Values are kept as the displayed text; numeric views parse them on demand.
/// An empty string means the source showed nothing for that stat.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub id: String,
    pub name: String,
    pub seed: String,
    pub record: String,
    pub bpi_rank: String,
    pub vs_top_25: String,
    pub ppg: String,
    pub opp_ppg: String,
    pub conference: String,
    pub last_12_games: String,
}

impl TeamStats {
    /// Create a team with its identifying details; all stats start empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, seed: u32) -> Self {
        TeamStats {
            id: id.into(),
            name: name.into(),
            seed: seed.to_string(),
            ..TeamStats::default()
        }
    }

    /// Build from `(label, value)` pairs. Labels the picker doesn't use are skipped.
    pub fn from_labels<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut team = TeamStats::default();
        for (label, value) in pairs {
            match StatKey::from_label(label.as_ref()) {
                Some(key) => team.set(key, value),
                None => log::debug!("Ignoring unknown stat label {:?}", label.as_ref()),
            }
        }
        team
    }

    pub fn with(mut self, key: StatKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: StatKey, value: impl Into<String>) {
        *self.field_mut(key) = value.into();
    }

    pub fn get(&self, key: StatKey) -> &str {
        match key {
            StatKey::Id => &self.id,
            StatKey::Name => &self.name,
            StatKey::Seed => &self.seed,
            StatKey::Record => &self.record,
            StatKey::BpiRank => &self.bpi_rank,
            StatKey::VsTop25 => &self.vs_top_25,
            StatKey::Ppg => &self.ppg,
            StatKey::OppPpg => &self.opp_ppg,
            StatKey::Conference => &self.conference,
            StatKey::Last12Games => &self.last_12_games,
        }
    }

    fn field_mut(&mut self, key: StatKey) -> &mut String {
        match key {
            StatKey::Id => &mut self.id,
            StatKey::Name => &mut self.name,
            StatKey::Seed => &mut self.seed,
            StatKey::Record => &mut self.record,
            StatKey::BpiRank => &mut self.bpi_rank,
            StatKey::VsTop25 => &mut self.vs_top_25,
            StatKey::Ppg => &mut self.ppg,
            StatKey::OppPpg => &mut self.opp_ppg,
            StatKey::Conference => &mut self.conference,
            StatKey::Last12Games => &mut self.last_12_games,
        }
    }

    /// Integer value of a stat, read the way the page's numbers are read
    /// (leading integer, so "80.5" is 80).
    pub fn numeric(&self, key: StatKey) -> Result<i64> {
        let value = self.get(key);
        if value.trim().is_empty() {
            return Err(PickerError::MissingStat {
                team: self.display_name().to_string(),
                stat: key.label(),
            });
        }
        parse_leading_int(value).ok_or_else(|| PickerError::InvalidStat {
            team: self.display_name().to_string(),
            stat: key.label(),
            value: value.to_string(),
        })
    }

    /// Seed within the region. Must be at least 1.
    pub fn seed_number(&self) -> Result<u32> {
        let seed = self.numeric(StatKey::Seed)?;
        u32::try_from(seed)
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| PickerError::InvalidSeed {
                team: self.display_name().to_string(),
                seed,
            })
    }

    /// Wins and losses against top 25 teams.
    pub fn top_25_record(&self) -> Result<(u32, u32)> {
        get_wins_and_losses(&self.vs_top_25)
    }

    /// Name if the source gave one, otherwise the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl fmt::Display for TeamStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.seed)
    }
}

/// Split a record string such as "27-10" into wins and losses.
///
/// Missing records ("--" or empty) count as "0-0".
pub fn get_wins_and_losses(record: &str) -> Result<(u32, u32)> {
    let trimmed = record.trim();
    let record_str = if trimmed.is_empty() || trimmed == "--" {
        EMPTY_RECORD
    } else {
        trimmed
    };

    let invalid = || PickerError::InvalidRecord(record.to_string());
    let mut parts = record_str.split('-');
    let (Some(wins), Some(losses), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let parse = |part: &str| {
        parse_leading_int(part)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid)
    };
    Ok((parse(wins)?, parse(losses)?))
}

/// Parse the integer at the start of `value`, ignoring surrounding
/// whitespace and anything after the digits. Returns `None` when there are
/// no leading digits.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
