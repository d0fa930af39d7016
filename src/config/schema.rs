use serde::{Deserialize, Serialize};

use crate::output::ScoreStyle;
use crate::scoring::TiebreakPolicy;

/// Config file contents.
///
/// Example YAML:
/// ```yaml
/// policy:
///   games_to_win: 6
///   tiebreaks:
///     - { points_to_win: 7 }
///     - { points_to_win: 7 }
///     - { points_to_win: 10 }
/// decider_style: match_tiebreak
/// results_path: ~/league/results.json
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub policy: TiebreakPolicy,

    /// How a split match's deciding set is written
    #[serde(default)]
    pub decider_style: ScoreStyle,

    /// Results log location (defaults to ~/.config/racket-score/results.json)
    #[serde(default)]
    pub results_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
policy:
  games_to_win: 4
  tiebreaks:
    - points_to_win: 5
    - points_to_win: 5
    - points_to_win: 7
      win_by: 1
decider_style: match_tiebreak
results_path: /tmp/results.json
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.policy.games_to_win, 4);
        assert_eq!(config.policy.rule(2).points_to_win, 7);
        assert_eq!(config.policy.rule(2).win_by, 1);
        assert_eq!(config.decider_style, ScoreStyle::MatchTiebreak);
        assert_eq!(config.results_path.as_deref(), Some("/tmp/results.json"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "best_of: 5\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
