use std::io::IsTerminal;

use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use terminal_size::{terminal_size, Width};

use crate::results::MatchRecord;
use crate::scoring::{classify_set, is_split, Set, SetOutcome, Side, TiebreakPolicy, MAX_SETS};
use crate::session::ScoreSession;
use crate::standings::Standing;

/// How the deciding set is written once the first two sets are split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStyle {
    /// "6-6(10-8)"
    #[default]
    Canonical,
    /// "MatchTB: 10-8"
    MatchTiebreak,
}

/// Render one set. Missing values are left blank so the result parses back.
///
/// A tied set shows its tiebreak in parentheses once either side has
/// scored a tiebreak point.
pub fn format_set(set: &Set) -> String {
    let games = format!(
        "{}-{}",
        blank_if_none(set.side1_games),
        blank_if_none(set.side2_games)
    );

    let tied = set.side1_games.is_some() && set.side1_games == set.side2_games;
    if !tied {
        return games;
    }

    let (t1, t2) = (set.side1_tiebreak_points, set.side2_tiebreak_points);
    if t1.unwrap_or(0) == 0 && t2.unwrap_or(0) == 0 {
        return games;
    }
    format!("{}({}-{})", games, blank_if_none(t1), blank_if_none(t2))
}

fn blank_if_none<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Canonical score string over the first `slots_to_show` slots.
///
/// Undecided sets are left out. Sets are joined with ", ".
pub fn format_score(
    sets: &[Set],
    slots_to_show: usize,
    policy: &TiebreakPolicy,
    style: ScoreStyle,
) -> String {
    let split = is_split(sets, policy);

    sets.iter()
        .take(slots_to_show.min(MAX_SETS))
        .enumerate()
        .filter(|(i, set)| classify_set(set, *i, policy).is_decided())
        .map(|(i, set)| match (style, set.tiebreak()) {
            (ScoreStyle::MatchTiebreak, Some((t1, t2)))
                if i == MAX_SETS - 1 && split && set.side1_games == set.side2_games =>
            {
                format!("MatchTB: {}-{}", t1, t2)
            }
            _ => format_set(set),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn outcome_label(outcome: SetOutcome, side1: &str, side2: &str) -> String {
    match outcome.winner() {
        Some(Side::One) => side1.to_string(),
        Some(Side::Two) => side2.to_string(),
        None => "in progress".to_string(),
    }
}

/// Multi-line breakdown of a session: one line per visible set, then the
/// tally, winner and score string.
pub fn format_match_summary(
    session: &ScoreSession,
    style: ScoreStyle,
    side1: &str,
    side2: &str,
    use_colors: bool,
) -> String {
    let slots = session.slots();
    let state = session.state();
    let mut lines = Vec::new();

    for (i, set) in session.sets().iter().take(slots).enumerate() {
        let outcome = classify_set(set, i, session.policy());
        let label = outcome_label(outcome, side1, side2);
        let set_str = format_set(set);
        if use_colors {
            let label = match outcome {
                SetOutcome::Incomplete => label.dimmed().to_string(),
                _ => label.green().to_string(),
            };
            lines.push(format!("Set {}: {:<12} {}", i + 1, set_str.bold(), label));
        } else {
            lines.push(format!("Set {}: {:<12} {}", i + 1, set_str, label));
        }
    }

    lines.push(format!(
        "Sets: {}-{}",
        state.set_wins(Side::One),
        state.set_wins(Side::Two)
    ));

    let winner = match state.winning_side {
        Some(Side::One) => side1.to_string(),
        Some(Side::Two) => side2.to_string(),
        None => "-".to_string(),
    };
    if use_colors && state.winning_side.is_some() {
        lines.push(format!("Winner: {}", winner.bold().green()));
    } else {
        lines.push(format!("Winner: {}", winner));
    }

    lines.push(format!("Slots: {}", slots));
    lines.push(format!("Score: {}", session.score(style)));
    lines.join("\n")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a duration into a short age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

/// One line per recorded match, newest last:
/// " 1.  3d  Ana def. Ben  6-2, 7-5"
pub fn format_history(records: &[MatchRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No matches recorded.".to_string();
    }

    let now = Utc::now();
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let index_str = format!("{:>2}.", idx + 1);
            let age = format!("{:>4}", format_age(now - record.recorded_at));
            if use_colors {
                format!(
                    "{} {}  {} def. {}  {}",
                    index_str.dimmed(),
                    age.dimmed(),
                    record.winner_name().bold(),
                    record.loser_name(),
                    record.score.cyan()
                )
            } else {
                format!(
                    "{} {}  {} def. {}  {}",
                    index_str,
                    age,
                    record.winner_name(),
                    record.loser_name(),
                    record.score
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Standings table: rank, name, W-L, sets, games.
/// The name column shrinks to fit the terminal; pipes are never truncated.
pub fn format_standings_table(standings: &[Standing], use_colors: bool) -> String {
    if standings.is_empty() {
        return "No matches recorded.".to_string();
    }

    // rank(3) + W-L(7) + sets(8) + games(9) + separators
    let fixed_width = 3 + 7 + 8 + 9 + 2 * 4;
    let longest = standings
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    };

    standings
        .iter()
        .map(|s| {
            let rank = format!("{:>2}.", s.rank);
            let name = format!(
                "{:<width$}",
                truncate_name(&s.name, name_width),
                width = name_width
            );
            let record = format!("{:>7}", format!("{}-{}", s.wins, s.losses));
            let sets = format!("{:>8}", format!("{}-{}", s.sets_won, s.sets_lost));
            let games = format!("{:>9}", format!("{}-{}", s.games_won, s.games_lost));
            if use_colors {
                format!(
                    "{}  {}  {}  {}  {}",
                    rank.dimmed(),
                    name.bold(),
                    record,
                    sets.dimmed(),
                    games.dimmed()
                )
            } else {
                format!("{}  {}  {}  {}  {}", rank, name, record, sets, games)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
