//! League standings built from recorded matches.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::results::MatchRecord;
use crate::scoring::{classify_set, SetOutcome, Side, TiebreakPolicy, MAX_SETS};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl Standing {
    pub fn played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn set_diff(&self) -> i64 {
        self.sets_won as i64 - self.sets_lost as i64
    }

    pub fn game_diff(&self) -> i64 {
        self.games_won as i64 - self.games_lost as i64
    }
}

/// Games credited to each side for a decided set. A tiebreak set counts as 7-6.
fn set_games(set: &crate::scoring::Set, outcome: SetOutcome) -> Option<(u32, u32)> {
    let (g1, g2) = set.side1_games.zip(set.side2_games)?;
    let (g1, g2) = (g1 as u32, g2 as u32);
    match outcome {
        SetOutcome::Incomplete => None,
        SetOutcome::Side1 if g1 == g2 => Some((g1 + 1, g2)),
        SetOutcome::Side2 if g1 == g2 => Some((g1, g2 + 1)),
        _ => Some((g1, g2)),
    }
}

/// Aggregate match records into ranked standings.
///
/// Ordered by wins, then set difference, then game difference (all
/// descending), then name.
pub fn compute_standings(records: &[MatchRecord], policy: &TiebreakPolicy) -> Vec<Standing> {
    let mut table: BTreeMap<&str, Standing> = BTreeMap::new();

    for record in records {
        for side in [Side::One, Side::Two] {
            let name = record.name_for(side);
            table.entry(name).or_insert_with(|| Standing {
                name: name.to_string(),
                ..Standing::default()
            });
        }

        if let Some(entry) = table.get_mut(record.winner_name()) {
            entry.wins += 1;
        }
        if let Some(entry) = table.get_mut(record.loser_name()) {
            entry.losses += 1;
        }

        for (i, set) in record.sets.iter().take(MAX_SETS).enumerate() {
            let outcome = classify_set(set, i, policy);
            let Some((g1, g2)) = set_games(set, outcome) else {
                continue;
            };
            if let Some(entry) = table.get_mut(record.side1.as_str()) {
                entry.games_won += g1;
                entry.games_lost += g2;
                match outcome {
                    SetOutcome::Side1 => entry.sets_won += 1,
                    SetOutcome::Side2 => entry.sets_lost += 1,
                    SetOutcome::Incomplete => {}
                }
            }
            if let Some(entry) = table.get_mut(record.side2.as_str()) {
                entry.games_won += g2;
                entry.games_lost += g1;
                match outcome {
                    SetOutcome::Side2 => entry.sets_won += 1,
                    SetOutcome::Side1 => entry.sets_lost += 1,
                    SetOutcome::Incomplete => {}
                }
            }
        }
    }

    let mut standings: Vec<Standing> = table.into_values().collect();
    standings.sort_by(compare_standings);
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = i + 1;
    }

    tracing::debug!(participants = standings.len(), "computed standings");
    standings
}

fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| b.set_diff().cmp(&a.set_diff()))
        .then_with(|| b.game_diff().cmp(&a.game_diff()))
        .then_with(|| a.name.cmp(&b.name))
}
