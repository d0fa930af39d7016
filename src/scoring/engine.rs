use super::policy::{TiebreakPolicy, MAX_SETS, SETS_TO_WIN};
use super::set::{Set, SetOutcome, Side};

/// Running tally over an ordered sequence of sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchState {
    pub side1_set_wins: u8,
    pub side2_set_wins: u8,
    pub winning_side: Option<Side>,
}

impl MatchState {
    pub fn set_wins(&self, side: Side) -> u8 {
        match side {
            Side::One => self.side1_set_wins,
            Side::Two => self.side2_set_wins,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winning_side.is_some()
    }
}

/// Classify one set under `policy`.
///
/// Never fails on bad input: illegal combinations (a tie other than the
/// tiebreak tie, or a margin such as 6-5 or 8-6) come back as `Incomplete`.
/// Use [`validate_set`](super::validate_set) to learn why.
///
/// # Panics
///
/// Panics if `set_index` is outside 0..=2.
pub fn classify_set(set: &Set, set_index: usize, policy: &TiebreakPolicy) -> SetOutcome {
    let rule = policy.rule(set_index);

    let (Some(g1), Some(g2)) = (set.side1_games, set.side2_games) else {
        return SetOutcome::Incomplete;
    };

    if g1 == g2 {
        if g1 != policy.tiebreak_at() {
            return SetOutcome::Incomplete;
        }
        let Some((t1, t2)) = set.tiebreak() else {
            return SetOutcome::Incomplete;
        };
        return if rule.is_won(t1, t2) {
            SetOutcome::Side1
        } else if rule.is_won(t2, t1) {
            SetOutcome::Side2
        } else {
            SetOutcome::Incomplete
        };
    }

    let (high, low, winner) = if g1 > g2 {
        (g1, g2, SetOutcome::Side1)
    } else {
        (g2, g1, SetOutcome::Side2)
    };

    if is_legal_margin(high, low, policy) {
        winner
    } else {
        SetOutcome::Incomplete
    }
}

/// True for a finished set without tiebreak: `games_to_win` with a two game
/// lead, or `games_to_win + 1` against `games_to_win - 1`.
pub(crate) fn is_legal_margin(high: u8, low: u8, policy: &TiebreakPolicy) -> bool {
    let target = policy.games_to_win;
    (high == target && low <= target.saturating_sub(2))
        || (high == policy.max_games() && low == target.saturating_sub(1))
}

/// Outcome of every provided slot, in order, capped at three sets.
pub fn classify_sets(sets: &[Set], policy: &TiebreakPolicy) -> Vec<SetOutcome> {
    sets.iter()
        .take(MAX_SETS)
        .enumerate()
        .map(|(i, set)| classify_set(set, i, policy))
        .collect()
}

/// Fold sets in order into a match tally.
///
/// Stops counting as soon as one side reaches two set wins. Incomplete sets
/// contribute nothing but do not hide decided sets before or after them.
pub fn resolve_match(sets: &[Set], policy: &TiebreakPolicy) -> MatchState {
    let mut state = MatchState::default();

    for (i, set) in sets.iter().take(MAX_SETS).enumerate() {
        match classify_set(set, i, policy) {
            SetOutcome::Side1 => state.side1_set_wins += 1,
            SetOutcome::Side2 => state.side2_set_wins += 1,
            SetOutcome::Incomplete => continue,
        }

        if state.side1_set_wins == SETS_TO_WIN {
            state.winning_side = Some(Side::One);
            break;
        }
        if state.side2_set_wins == SETS_TO_WIN {
            state.winning_side = Some(Side::Two);
            break;
        }
    }

    state
}

/// How many set-entry slots to expose.
///
/// One slot until the first set is decided, two after that, and a third only
/// when the first two sets were split. A decided state never shows fewer
/// slots than it has decided sets.
pub fn slots_to_show(sets: &[Set], policy: &TiebreakPolicy) -> usize {
    let outcomes = classify_sets(sets, policy);
    let outcome_at = |i: usize| outcomes.get(i).copied().unwrap_or(SetOutcome::Incomplete);
    let decided = outcomes.iter().filter(|o| o.is_decided()).count();

    let first = outcome_at(0);
    let second = outcome_at(1);

    if first.is_decided() && second.is_decided() && first != second {
        return 3;
    }
    if first.is_decided() {
        return 2;
    }
    if decided == 0 {
        return 1;
    }
    decided.clamp(2, MAX_SETS)
}

/// True when sets 0 and 1 were won by different sides.
pub fn is_split(sets: &[Set], policy: &TiebreakPolicy) -> bool {
    let outcomes = classify_sets(sets, policy);
    match (outcomes.first(), outcomes.get(1)) {
        (Some(a), Some(b)) => a.is_decided() && b.is_decided() && a != b,
        _ => false,
    }
}
