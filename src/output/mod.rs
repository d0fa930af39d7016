pub mod formatter;

pub use formatter::{
    format_age, format_history, format_match_summary, format_score, format_set,
    format_standings_table, should_use_colors, ScoreStyle,
};
