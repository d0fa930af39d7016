use super::types::{MatchRecord, ResultSink, ResultsLog};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default results file path (~/.config/racket-score/results.json)
pub fn get_results_path() -> PathBuf {
    crate::config::get_config_dir().join("results.json")
}

/// Load the results log from a JSON file
///
/// If the file doesn't exist, returns a new empty log.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_results(path: &Path) -> Result<ResultsLog> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no results file yet");
        return Ok(ResultsLog::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open results file at {}", path.display()))?;

    let log: ResultsLog = serde_json::from_reader(file).context("Failed to load results")?;

    if log.version != 1 {
        anyhow::bail!("Unsupported results file version: {}", log.version);
    }

    tracing::debug!(matches = log.matches.len(), "loaded results");
    Ok(log)
}

/// Save the results log to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if needed.
pub fn save_results(path: &Path, log: &ResultsLog) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create results directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, log).context("Failed to serialize results")?;

    file.commit().context("Failed to save results")?;

    Ok(())
}

/// A results file on disk. Each submission is a load-append-save cycle.
#[derive(Debug, Clone)]
pub struct ResultsFile {
    path: PathBuf,
}

impl ResultsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<ResultsLog> {
        load_results(&self.path)
    }
}

impl ResultSink for ResultsFile {
    fn submit(&mut self, record: MatchRecord) -> Result<()> {
        let mut log = self.load()?;
        tracing::info!(
            winner = record.winner_name(),
            score = %record.score,
            "recording match"
        );
        log.record(record);
        save_results(&self.path, &log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Set, Side};
    use chrono::Utc;
    use std::env;

    fn sample_record() -> MatchRecord {
        MatchRecord {
            side1: "Ana".to_string(),
            side2: "Ben".to_string(),
            winner: Side::Two,
            score: "6-3, 4-6, 6-6(8-10)".to_string(),
            sets: vec![
                Set::games(6, 3),
                Set::games(4, 6),
                Set::with_tiebreak(6, 6, 8, 10),
            ],
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("racket_score_test_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let log = load_results(&temp_path).unwrap();
        assert_eq!(log.version, 1);
        assert!(log.matches.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("racket_score_test_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut log = ResultsLog::new();
        log.record(sample_record());
        save_results(&temp_path, &log).unwrap();

        let loaded = load_results(&temp_path).unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.matches, log.matches);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version() {
        let temp_path = env::temp_dir().join("racket_score_test_version.json");
        std::fs::write(&temp_path, r#"{"version": 2, "matches": []}"#).unwrap();

        let err = load_results(&temp_path).unwrap_err();
        assert!(err.to_string().contains("version"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_results_file_sink_appends() {
        let dir = env::temp_dir().join("racket_score_test_sink");
        let _ = std::fs::remove_dir_all(&dir);
        let mut sink = ResultsFile::new(dir.join("results.json"));

        sink.submit(sample_record()).unwrap();
        sink.submit(sample_record()).unwrap();

        let log = sink.load().unwrap();
        assert_eq!(log.matches.len(), 2);
        assert_eq!(log.matches[0].winner_name(), "Ben");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
