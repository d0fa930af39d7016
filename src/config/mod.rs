mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/racket-score/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".config")
        .join("racket-score")
}

/// Get the default config file path (~/.config/racket-score/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Resolve the results log path, expanding a leading `~/`.
pub fn results_path(config: &Config) -> PathBuf {
    match config.results_path.as_deref() {
        Some(p) => match (p.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(p),
        },
        None => crate::results::get_results_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let path = env::temp_dir().join("racket_score_test_no_config.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_load_config_file() {
        let path = env::temp_dir().join("racket_score_test_config.yaml");
        fs::write(&path, "decider_style: match_tiebreak\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.decider_style, crate::output::ScoreStyle::MatchTiebreak);
        assert_eq!(config.policy, crate::scoring::TiebreakPolicy::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = env::temp_dir().join("racket_score_test_bad_config.yaml");
        fs::write(&path, "policy: [not, a, map]\n").unwrap();
        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_results_path_override() {
        let config = Config {
            results_path: Some("/tmp/league.json".to_string()),
            ..Config::default()
        };
        assert_eq!(results_path(&config), PathBuf::from("/tmp/league.json"));
        assert!(results_path(&Config::default()).ends_with("racket-score/results.json"));
    }
}
