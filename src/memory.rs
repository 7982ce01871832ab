use crate::constants::{CHAMPIONSHIP_MATCHUP, FIRST_ROUND_MATCHUPS, NUMBER_OF_TEAMS};
use crate::error::{PickerError, Result};
use crate::source::{BracketSource, Side};
use crate::team::TeamStats;

/// Matchup and side that the winner of `index` advances into.
///
/// Winners of matchups 1 and 2 meet in 33, 3 and 4 in 34, and so on up to
/// 61 and 62 meeting in the championship. Returns `None` for the
/// championship itself.
pub fn parent_slot(index: usize) -> Option<(usize, Side)> {
    if index == 0 || index >= CHAMPIONSHIP_MATCHUP {
        return None;
    }
    let side = if index % 2 == 1 { Side::First } else { Side::Second };
    Some(((index + 1) / 2 + FIRST_ROUND_MATCHUPS, side))
}

/// A 64 team bracket held in memory.
///
/// Teams are given in first round order: teams 0 and 1 meet in matchup 1,
/// teams 2 and 3 in matchup 2, and so on. Selecting a winner moves that
/// team into the next round; changing an earlier pick removes the replaced
/// team from every later round it had reached.
#[derive(Clone, Debug)]
pub struct InMemoryBracket {
    teams: Vec<TeamStats>,
    /// Team indices per matchup slot, `slots[0]` unused.
    slots: Vec<[Option<usize>; 2]>,
    winners: Vec<Option<usize>>,
    open_preview: Option<usize>,
    tiebreaker: Option<(i32, i32)>,
}

impl InMemoryBracket {
    pub fn new(teams: Vec<TeamStats>) -> Result<Self> {
        if teams.len() != NUMBER_OF_TEAMS {
            return Err(PickerError::TeamCount {
                expected: NUMBER_OF_TEAMS,
                actual: teams.len(),
            });
        }

        let mut slots = vec![[None, None]; CHAMPIONSHIP_MATCHUP + 1];
        for index in 1..=FIRST_ROUND_MATCHUPS {
            let first = 2 * (index - 1);
            slots[index] = [Some(first), Some(first + 1)];
        }

        Ok(InMemoryBracket {
            teams,
            slots,
            winners: vec![None; CHAMPIONSHIP_MATCHUP + 1],
            open_preview: None,
            tiebreaker: None,
        })
    }

    pub fn teams(&self) -> &[TeamStats] {
        &self.teams
    }

    /// Team currently placed on `side` of matchup `index`.
    pub fn team_in(&self, index: usize, side: Side) -> Result<Option<&TeamStats>> {
        let slot = self.slot(index)?;
        Ok(slot[side.index()].map(|team| &self.teams[team]))
    }

    /// Team picked to win matchup `index`, if any.
    pub fn winner(&self, index: usize) -> Result<Option<&TeamStats>> {
        self.slot(index)?;
        Ok(self.winners[index].map(|team| &self.teams[team]))
    }

    pub fn champion(&self) -> Option<&TeamStats> {
        self.winners[CHAMPIONSHIP_MATCHUP].map(|team| &self.teams[team])
    }

    /// Number of matchups with a winner picked.
    pub fn picks_made(&self) -> usize {
        self.winners.iter().filter(|w| w.is_some()).count()
    }

    /// Values entered as (winning, losing) tiebreaker scores.
    pub fn tiebreaker(&self) -> Option<(i32, i32)> {
        self.tiebreaker
    }

    pub fn is_preview_open(&self) -> bool {
        self.open_preview.is_some()
    }

    fn slot(&self, index: usize) -> Result<&[Option<usize>; 2]> {
        if index == 0 || index > CHAMPIONSHIP_MATCHUP {
            return Err(PickerError::UnknownMatchup(index));
        }
        Ok(&self.slots[index])
    }

    /// Walk up from `index`, removing `team` from every round it had been
    /// advanced into.
    fn clear_advanced(&mut self, mut index: usize, team: usize) {
        while self.winners[index] == Some(team) {
            self.winners[index] = None;
            match parent_slot(index) {
                Some((parent, side)) => {
                    self.slots[parent][side.index()] = None;
                    index = parent;
                }
                None => break,
            }
        }
    }
}

impl BracketSource for InMemoryBracket {
    fn open_matchup_preview(&mut self, index: usize) -> Result<()> {
        self.slot(index)?;
        self.open_preview = Some(index);
        Ok(())
    }

    fn team_statistics(&mut self, index: usize, side: Side) -> Result<TeamStats> {
        if self.open_preview != Some(index) {
            return Err(PickerError::Source(format!(
                "preview for matchup {index} is not open"
            )));
        }
        self.team_in(index, side)?
            .cloned()
            .ok_or(PickerError::MatchupNotReady { index, side })
    }

    fn close_matchup_preview(&mut self) -> Result<()> {
        self.open_preview = None;
        Ok(())
    }

    fn select_winner(&mut self, index: usize, team_id: &str) -> Result<()> {
        let slot = *self.slot(index)?;
        let team = slot
            .into_iter()
            .flatten()
            .find(|&team| self.teams[team].id == team_id)
            .ok_or_else(|| PickerError::TeamNotInMatchup {
                index,
                team_id: team_id.to_string(),
            })?;

        if let Some(previous) = self.winners[index].filter(|&previous| previous != team) {
            self.clear_advanced(index, previous);
        }
        self.winners[index] = Some(team);

        if let Some((parent, side)) = parent_slot(index) {
            self.slots[parent][side.index()] = Some(team);
        }
        Ok(())
    }

    fn set_tiebreaker_scores(&mut self, winning: i32, losing: i32) -> Result<()> {
        self.tiebreaker = Some((winning, losing));
        Ok(())
    }
}
