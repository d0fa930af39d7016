use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the two sides in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Result of evaluating a single set. Always derived from a [`Set`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Side1,
    Side2,
    Incomplete,
}

impl SetOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            SetOutcome::Side1 => Some(Side::One),
            SetOutcome::Side2 => Some(Side::Two),
            SetOutcome::Incomplete => None,
        }
    }

    pub fn is_decided(self) -> bool {
        self != SetOutcome::Incomplete
    }
}

/// Raw entered values for one set slot.
///
/// Game counts stay `None` until entered. Tiebreak points are only meaningful
/// once the set is tied at the policy's tiebreak threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Set {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side1_games: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side2_games: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side1_tiebreak_points: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side2_tiebreak_points: Option<u16>,
}

impl Set {
    /// A set with both game counts entered and no tiebreak.
    pub fn games(side1: u8, side2: u8) -> Self {
        Self {
            side1_games: Some(side1),
            side2_games: Some(side2),
            ..Self::default()
        }
    }

    /// A set with both game counts and both tiebreak scores entered.
    pub fn with_tiebreak(side1: u8, side2: u8, tb1: u16, tb2: u16) -> Self {
        Self {
            side1_games: Some(side1),
            side2_games: Some(side2),
            side1_tiebreak_points: Some(tb1),
            side2_tiebreak_points: Some(tb2),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Set::default()
    }

    /// Both tiebreak scores, if both were entered.
    pub fn tiebreak(&self) -> Option<(u16, u16)> {
        self.side1_tiebreak_points.zip(self.side2_tiebreak_points)
    }

    /// The same set seen from the other side of the net.
    pub fn swapped(&self) -> Self {
        Self {
            side1_games: self.side2_games,
            side2_games: self.side1_games,
            side1_tiebreak_points: self.side2_tiebreak_points,
            side2_tiebreak_points: self.side1_tiebreak_points,
        }
    }
}

/// Parse the textual form used on the command line and in score strings.
///
/// Accepted forms: `"6-3"`, `"6-6(10-8)"`, `"6-"` (second count missing),
/// `"-"` or `""` (empty slot).
impl FromStr for Set {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s == "-" {
            return Ok(Set::default());
        }

        let (games_part, tiebreak_part) = match s.split_once('(') {
            Some((games, rest)) => {
                let Some(inner) = rest.trim().strip_suffix(')') else {
                    bail!("Unclosed tiebreak in set score: {}", s);
                };
                (games, Some(inner))
            }
            None => (s, None),
        };

        let (g1, g2) = parse_pair::<u8>(games_part)
            .with_context(|| format!("Invalid games in set score: {}", s))?;
        let (t1, t2) = match tiebreak_part {
            Some(tb) => parse_pair::<u16>(tb)
                .with_context(|| format!("Invalid tiebreak in set score: {}", s))?,
            None => (None, None),
        };

        Ok(Set {
            side1_games: g1,
            side2_games: g2,
            side1_tiebreak_points: t1,
            side2_tiebreak_points: t2,
        })
    }
}

fn parse_pair<T>(s: &str) -> Result<(Option<T>, Option<T>)>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some((left, right)) = s.split_once('-') else {
        bail!("Expected N-M, got '{}'", s.trim());
    };
    Ok((parse_optional(left)?, parse_optional(right)?))
}

fn parse_optional<T>(s: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let s = s.trim();
    if s.is_empty() {
        Ok(None)
    } else {
        Ok(Some(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_games() {
        let set: Set = "6-3".parse().unwrap();
        assert_eq!(set, Set::games(6, 3));
    }

    #[test]
    fn test_parse_tiebreak() {
        let set: Set = "6-6(10-8)".parse().unwrap();
        assert_eq!(set, Set::with_tiebreak(6, 6, 10, 8));
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let set: Set = " 6 - 6 ( 7 - 5 ) ".parse().unwrap();
        assert_eq!(set, Set::with_tiebreak(6, 6, 7, 5));
    }

    #[test]
    fn test_parse_partial_entries() {
        let set: Set = "6-".parse().unwrap();
        assert_eq!(set.side1_games, Some(6));
        assert_eq!(set.side2_games, None);

        let set: Set = "6-6(4-)".parse().unwrap();
        assert_eq!(set.side1_tiebreak_points, Some(4));
        assert_eq!(set.side2_tiebreak_points, None);
    }

    #[test]
    fn test_parse_empty_slot() {
        assert!("".parse::<Set>().unwrap().is_empty());
        assert!("-".parse::<Set>().unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("six-three".parse::<Set>().is_err());
        assert!("63".parse::<Set>().is_err());
        assert!("6-6(10-8".parse::<Set>().is_err());
        assert!("300-1".parse::<Set>().is_err());
    }

    #[test]
    fn test_swapped() {
        let set = Set::with_tiebreak(6, 6, 10, 8);
        assert_eq!(set.swapped(), Set::with_tiebreak(6, 6, 8, 10));
        assert_eq!(set.swapped().swapped(), set);
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(SetOutcome::Side1.winner(), Some(Side::One));
        assert_eq!(SetOutcome::Side2.winner(), Some(Side::Two));
        assert_eq!(SetOutcome::Incomplete.winner(), None);
        assert_eq!(Side::One.opponent(), Side::Two);
    }
}
