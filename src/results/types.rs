use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Set, Side};

/// A finished match as handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub side1: String,
    pub side2: String,
    pub winner: Side,
    /// Canonical score string, e.g. "6-3, 4-6, 6-6(10-8)"
    pub score: String,
    #[serde(default)]
    pub sets: Vec<Set>,
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn name_for(&self, side: Side) -> &str {
        match side {
            Side::One => &self.side1,
            Side::Two => &self.side2,
        }
    }

    pub fn winner_name(&self) -> &str {
        self.name_for(self.winner)
    }

    pub fn loser_name(&self) -> &str {
        self.name_for(self.winner.opponent())
    }
}

/// Where finished matches go once the caller has a winner.
///
/// Implementations either accept the record or fail; callers decide what a
/// failure means for the session.
pub trait ResultSink {
    fn submit(&mut self, record: MatchRecord) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsLog {
    pub version: u32,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl Default for ResultsLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsLog {
    /// Create a new empty log with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            matches: Vec::new(),
        }
    }

    pub fn record(&mut self, record: MatchRecord) {
        self.matches.push(record);
    }

    /// Matches in which `name` played on either side, oldest first.
    /// Names match exactly, the same way standings key participants.
    pub fn matches_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MatchRecord> + 'a {
        self.matches
            .iter()
            .filter(move |m| m.side1 == name || m.side2 == name)
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl ResultSink for ResultsLog {
    fn submit(&mut self, record: MatchRecord) -> Result<()> {
        self.record(record);
        Ok(())
    }
}
