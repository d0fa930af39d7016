use std::fmt;

use super::engine::is_legal_margin;
use super::policy::TiebreakPolicy;
use super::set::Set;

/// Why a set's entered values can never form a legal result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSetScore {
    /// A game count above the most a side can win in one set.
    OutOfRange { set_index: usize, games: u8, max: u8 },
    /// Both sides level on something other than the tiebreak tie.
    IllegalTie {
        set_index: usize,
        side1_games: u8,
        side2_games: u8,
    },
    /// Different counts that no finished set can produce (6-5, 8-6, ...).
    IllegalMargin {
        set_index: usize,
        side1_games: u8,
        side2_games: u8,
    },
    /// Tiebreak points entered on a set whose games are not tied.
    UnexpectedTiebreak {
        set_index: usize,
        side1_games: u8,
        side2_games: u8,
    },
}

impl InvalidSetScore {
    pub fn set_index(&self) -> usize {
        match self {
            InvalidSetScore::OutOfRange { set_index, .. }
            | InvalidSetScore::IllegalTie { set_index, .. }
            | InvalidSetScore::IllegalMargin { set_index, .. }
            | InvalidSetScore::UnexpectedTiebreak { set_index, .. } => *set_index,
        }
    }
}

impl fmt::Display for InvalidSetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSetScore::OutOfRange {
                set_index,
                games,
                max,
            } => write!(
                f,
                "Set {}: {} games is out of range (max {})",
                set_index + 1,
                games,
                max
            ),
            InvalidSetScore::IllegalTie {
                set_index,
                side1_games,
                side2_games,
            } => write!(
                f,
                "Set {}: {}-{} is not a finished set (only a tiebreak tie is allowed)",
                set_index + 1,
                side1_games,
                side2_games
            ),
            InvalidSetScore::IllegalMargin {
                set_index,
                side1_games,
                side2_games,
            } => write!(
                f,
                "Set {}: {}-{} is not a legal set score",
                set_index + 1,
                side1_games,
                side2_games
            ),
            InvalidSetScore::UnexpectedTiebreak {
                set_index,
                side1_games,
                side2_games,
            } => write!(
                f,
                "Set {}: {}-{} has tiebreak points but no tiebreak was played",
                set_index + 1,
                side1_games,
                side2_games
            ),
        }
    }
}

impl std::error::Error for InvalidSetScore {}

/// Check a single game count against the policy's range.
pub fn check_games_range(
    games: u8,
    set_index: usize,
    policy: &TiebreakPolicy,
) -> Result<(), InvalidSetScore> {
    let max = policy.max_games();
    if games > max {
        return Err(InvalidSetScore::OutOfRange {
            set_index,
            games,
            max,
        });
    }
    Ok(())
}

/// Report why a set is illegal, if it is.
///
/// Values not yet entered and tiebreaks still in progress are fine; only
/// combinations that no amount of further entry can fix are errors.
pub fn validate_set(
    set: &Set,
    set_index: usize,
    policy: &TiebreakPolicy,
) -> Result<(), InvalidSetScore> {
    for games in [set.side1_games, set.side2_games].into_iter().flatten() {
        check_games_range(games, set_index, policy)?;
    }

    let (Some(g1), Some(g2)) = (set.side1_games, set.side2_games) else {
        return Ok(());
    };

    if g1 == g2 {
        if g1 != policy.tiebreak_at() {
            return Err(InvalidSetScore::IllegalTie {
                set_index,
                side1_games: g1,
                side2_games: g2,
            });
        }
        return Ok(());
    }

    let has_tiebreak =
        set.side1_tiebreak_points.is_some() || set.side2_tiebreak_points.is_some();
    if has_tiebreak {
        return Err(InvalidSetScore::UnexpectedTiebreak {
            set_index,
            side1_games: g1,
            side2_games: g2,
        });
    }

    if !is_legal_margin(g1.max(g2), g1.min(g2), policy) {
        return Err(InvalidSetScore::IllegalMargin {
            set_index,
            side1_games: g1,
            side2_games: g2,
        });
    }

    Ok(())
}

/// Validate a policy loaded from configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_policy(policy: &TiebreakPolicy) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // below 2 there is no two game lead to win by
    if policy.games_to_win < 2 {
        errors.push("policy.games_to_win: must be at least 2".to_string());
    }
    if policy.games_to_win == u8::MAX {
        errors.push(format!(
            "policy.games_to_win: must be below {}",
            u8::MAX
        ));
    }

    for (i, rule) in policy.tiebreaks.iter().enumerate() {
        if rule.points_to_win == 0 {
            errors.push(format!(
                "policy.tiebreaks[{}].points_to_win: must be at least 1",
                i
            ));
        }
        if rule.win_by == 0 {
            errors.push(format!("policy.tiebreaks[{}].win_by: must be at least 1", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::TiebreakRule;

    #[test]
    fn test_valid_sets() {
        let p = TiebreakPolicy::default();
        assert!(validate_set(&Set::default(), 0, &p).is_ok());
        assert!(validate_set(&Set::games(6, 4), 0, &p).is_ok());
        assert!(validate_set(&Set::games(5, 7), 1, &p).is_ok());
        assert!(validate_set(&Set::games(6, 6), 2, &p).is_ok());
        // ongoing tiebreak is not an error
        assert!(validate_set(&Set::with_tiebreak(6, 6, 8, 7), 0, &p).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        let p = TiebreakPolicy::default();
        let set = Set {
            side1_games: Some(8),
            ..Set::default()
        };
        let err = validate_set(&set, 1, &p).unwrap_err();
        assert_eq!(
            err,
            InvalidSetScore::OutOfRange {
                set_index: 1,
                games: 8,
                max: 7
            }
        );
        assert!(err.to_string().contains("Set 2"));
    }

    #[test]
    fn test_illegal_tie() {
        let p = TiebreakPolicy::default();
        let err = validate_set(&Set::games(5, 5), 0, &p).unwrap_err();
        assert!(matches!(err, InvalidSetScore::IllegalTie { .. }));
        let err = validate_set(&Set::games(7, 7), 2, &p).unwrap_err();
        assert_eq!(err.set_index(), 2);
    }

    #[test]
    fn test_illegal_margin() {
        let p = TiebreakPolicy::default();
        let err = validate_set(&Set::games(6, 5), 0, &p).unwrap_err();
        assert_eq!(
            err,
            InvalidSetScore::IllegalMargin {
                set_index: 0,
                side1_games: 6,
                side2_games: 5
            }
        );
        assert!(validate_set(&Set::games(3, 7), 0, &p).is_err());
        assert!(validate_set(&Set::games(7, 6), 0, &p).is_err());
    }

    #[test]
    fn test_tiebreak_points_on_untied_set() {
        let p = TiebreakPolicy::default();
        let set: Set = "6-3(1-0)".parse().unwrap();
        let err = validate_set(&set, 2, &p).unwrap_err();
        assert_eq!(
            err,
            InvalidSetScore::UnexpectedTiebreak {
                set_index: 2,
                side1_games: 6,
                side2_games: 3
            }
        );
        assert!(err.to_string().contains("Set 3"));

        let mut set = Set::games(7, 5);
        set.side2_tiebreak_points = Some(0);
        assert!(matches!(
            validate_set(&set, 0, &p),
            Err(InvalidSetScore::UnexpectedTiebreak { .. })
        ));
    }

    #[test]
    fn test_valid_policy() {
        assert!(validate_policy(&TiebreakPolicy::default()).is_ok());
        let short_sets = TiebreakPolicy {
            games_to_win: 2,
            ..TiebreakPolicy::default()
        };
        assert!(validate_policy(&short_sets).is_ok());
    }

    #[test]
    fn test_one_game_sets_rejected() {
        let policy = TiebreakPolicy {
            games_to_win: 1,
            ..TiebreakPolicy::default()
        };
        let errors = validate_policy(&policy).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("games_to_win: must be at least 2"));
    }

    #[test]
    fn test_collects_all_policy_errors() {
        let policy = TiebreakPolicy {
            games_to_win: 0,
            tiebreaks: [
                TiebreakRule::new(0, 2),
                TiebreakRule::new(7, 0),
                TiebreakRule::new(10, 2),
            ],
        };
        let errors = validate_policy(&policy).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("games_to_win"));
        assert!(errors[1].contains("tiebreaks[0].points_to_win"));
        assert!(errors[2].contains("tiebreaks[1].win_by"));
    }
}
