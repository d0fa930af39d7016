use serde::{Deserialize, Serialize};

/// Number of set slots in a best-of-three match.
pub const MAX_SETS: usize = 3;

/// Set wins needed to take the match.
pub const SETS_TO_WIN: u8 = 2;

/// How a tiebreak in one set is won.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TiebreakRule {
    /// Minimum points the winner must reach
    pub points_to_win: u16,

    /// Minimum lead over the opponent at the end
    #[serde(default = "default_win_by")]
    pub win_by: u16,
}

fn default_win_by() -> u16 {
    2
}

impl TiebreakRule {
    pub const fn new(points_to_win: u16, win_by: u16) -> Self {
        Self {
            points_to_win,
            win_by,
        }
    }

    /// Returns true if `points` against `opponent` closes out the tiebreak.
    pub fn is_won(&self, points: u16, opponent: u16) -> bool {
        points >= self.points_to_win && points >= opponent.saturating_add(self.win_by)
    }
}

/// Sport rules for one match.
///
/// Sets 0 and 1 default to a 7-point tiebreak and the decider to a 10-point
/// super tiebreak, all win-by-2. A set is won at `games_to_win` with a two game
/// lead, or at `games_to_win + 1` against `games_to_win - 1`; `games_to_win`-all
/// goes to the tiebreak.
///
/// Example YAML:
/// ```yaml
/// policy:
///   games_to_win: 6
///   tiebreaks:
///     - { points_to_win: 7 }
///     - { points_to_win: 7 }
///     - { points_to_win: 10, win_by: 2 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TiebreakPolicy {
    #[serde(default = "default_games_to_win")]
    pub games_to_win: u8,

    #[serde(default = "default_tiebreaks")]
    pub tiebreaks: [TiebreakRule; MAX_SETS],
}

fn default_games_to_win() -> u8 {
    6
}

fn default_tiebreaks() -> [TiebreakRule; MAX_SETS] {
    [
        TiebreakRule::new(7, 2),
        TiebreakRule::new(7, 2),
        TiebreakRule::new(10, 2),
    ]
}

impl Default for TiebreakPolicy {
    fn default() -> Self {
        Self {
            games_to_win: default_games_to_win(),
            tiebreaks: default_tiebreaks(),
        }
    }
}

impl TiebreakPolicy {
    /// Tiebreak rule for the set at `set_index`.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is not a valid slot (0..=2). Callers only ever
    /// address the three slots of a best-of-three match.
    pub fn rule(&self, set_index: usize) -> &TiebreakRule {
        assert!(
            set_index < MAX_SETS,
            "set index {} out of range (0..{})",
            set_index,
            MAX_SETS
        );
        &self.tiebreaks[set_index]
    }

    /// Highest game count a side can legally hold in a finished set.
    pub fn max_games(&self) -> u8 {
        self.games_to_win.saturating_add(1)
    }

    /// The tied game count that sends a set to a tiebreak.
    pub fn tiebreak_at(&self) -> u8 {
        self.games_to_win
    }
}
