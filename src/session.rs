//! Score-entry session: the mutable side of the scoring engine.
//!
//! Holds the three set slots while a result is being typed in. Every query
//! recomputes from the current slots, so callers can ask after each keystroke.

use std::fmt;

use chrono::Utc;

use crate::output::{format_score, ScoreStyle};
use crate::results::{MatchRecord, ResultSink};
use crate::scoring::{
    check_games_range, resolve_match, slots_to_show, validate_set, InvalidSetScore, MatchState,
    Set, Side, TiebreakPolicy, MAX_SETS,
};

#[derive(Debug)]
pub enum SessionError {
    /// Submission attempted before either side won two sets
    NotDecided,
    /// The result was already handed to a sink
    AlreadySubmitted,
    /// Both sides carry the same name
    SameSides(String),
    /// The sink refused the record
    Sink(anyhow::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotDecided => write!(f, "Match has no winner yet"),
            SessionError::AlreadySubmitted => write!(f, "Match result was already submitted"),
            SessionError::SameSides(name) => write!(f, "Both sides are named '{}'", name),
            SessionError::Sink(e) => write!(f, "Failed to record match: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Sink(e) => Some(&**e),
            _ => None,
        }
    }
}

fn checked_slot(set_index: usize) -> usize {
    assert!(
        set_index < MAX_SETS,
        "set index {} out of range (0..{})",
        set_index,
        MAX_SETS
    );
    set_index
}

#[derive(Debug, Clone)]
pub struct ScoreSession {
    sets: [Set; MAX_SETS],
    policy: TiebreakPolicy,
    submitted: bool,
}

impl ScoreSession {
    pub fn new(policy: TiebreakPolicy) -> Self {
        Self {
            sets: [Set::default(); MAX_SETS],
            policy,
            submitted: false,
        }
    }

    /// Start from already-entered sets (extra slots beyond three are dropped).
    pub fn from_sets(sets: &[Set], policy: TiebreakPolicy) -> Self {
        let mut session = Self::new(policy);
        for (slot, set) in session.sets.iter_mut().zip(sets) {
            *slot = *set;
        }
        session
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn policy(&self) -> &TiebreakPolicy {
        &self.policy
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Enter or clear one side's game count.
    ///
    /// Counts above the policy range are refused and leave the slot untouched.
    pub fn set_games(
        &mut self,
        set_index: usize,
        side: Side,
        games: Option<u8>,
    ) -> Result<(), InvalidSetScore> {
        let i = checked_slot(set_index);
        if let Some(g) = games {
            check_games_range(g, set_index, &self.policy)?;
        }
        let slot = &mut self.sets[i];
        match side {
            Side::One => slot.side1_games = games,
            Side::Two => slot.side2_games = games,
        }
        Ok(())
    }

    /// Enter or clear one side's tiebreak points.
    pub fn set_tiebreak(&mut self, set_index: usize, side: Side, points: Option<u16>) {
        let slot = &mut self.sets[checked_slot(set_index)];
        match side {
            Side::One => slot.side1_tiebreak_points = points,
            Side::Two => slot.side2_tiebreak_points = points,
        }
    }

    pub fn clear(&mut self, set_index: usize) {
        self.sets[checked_slot(set_index)] = Set::default();
    }

    /// Slots the caller should currently expose
    pub fn slots(&self) -> usize {
        slots_to_show(&self.sets, &self.policy)
    }

    pub fn state(&self) -> MatchState {
        resolve_match(&self.sets, &self.policy)
    }

    pub fn score(&self, style: ScoreStyle) -> String {
        format_score(&self.sets, self.slots(), &self.policy, style)
    }

    /// Validation problems in the visible slots, for display next to the input
    pub fn errors(&self) -> Vec<InvalidSetScore> {
        self.sets
            .iter()
            .take(self.slots())
            .enumerate()
            .filter_map(|(i, set)| validate_set(set, i, &self.policy).err())
            .collect()
    }

    /// Hand the finished match to `sink`, at most once.
    pub fn submit<S: ResultSink + ?Sized>(
        &mut self,
        sink: &mut S,
        side1: &str,
        side2: &str,
        style: ScoreStyle,
    ) -> Result<MatchRecord, SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        // standings key on names, so one name on both sides would count twice
        if side1 == side2 {
            return Err(SessionError::SameSides(side1.to_string()));
        }
        let Some(winner) = self.state().winning_side else {
            return Err(SessionError::NotDecided);
        };

        let slots = self.slots();
        let record = MatchRecord {
            side1: side1.to_string(),
            side2: side2.to_string(),
            winner,
            score: self.score(style),
            sets: self.sets[..slots].to_vec(),
            recorded_at: Utc::now(),
        };

        // in flight: a failed sink may be retried, a second success may not
        self.submitted = true;
        if let Err(e) = sink.submit(record.clone()) {
            self.submitted = false;
            return Err(SessionError::Sink(e));
        }

        Ok(record)
    }
}
