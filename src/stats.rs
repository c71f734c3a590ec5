use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::StatsError;

/// Lifetime quiz statistics, persisted across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Highest score ever achieved in a single round
    pub best_score: u32,

    /// Number of completed rounds
    pub attempts: u32,
}

/// Durable store for [`Stats`], backed by a JSON file.
///
/// The store is the sole mutator of the stats file. Reads fall back to
/// zeroed defaults when the file is missing or unreadable; writes happen
/// exactly once per completed round, before `record_round_result` returns.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    /// Store rooted at the user's config directory
    pub fn open() -> Result<Self, StatsError> {
        let base = dirs::config_dir().ok_or(StatsError::NoConfigDir)?;
        Ok(Self {
            path: base.join("CarTrivia").join("stats.json"),
        })
    }

    /// Store backed by an explicit file path (used by tests)
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path_display(&self) -> String {
        self.path.display().to_string()
    }

    /// Read the persisted stats, defaulting to zeroes if never written.
    ///
    /// A corrupt or unreadable file is logged and treated as missing.
    pub fn read(&self) -> Stats {
        if !self.path.exists() {
            return Stats::default();
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::warn!(
                        "Stats file {} is corrupt, starting fresh: {}",
                        self.path.display(),
                        e
                    );
                    Stats::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Could not read stats file {}: {}",
                    self.path.display(),
                    e
                );
                Stats::default()
            }
        }
    }

    /// Record the result of a completed round: bump the attempt counter and
    /// raise the best score if this round beat it. The update is persisted
    /// before returning.
    pub fn record_round_result(&self, score: u32) -> Result<Stats, StatsError> {
        let mut stats = self.read();

        stats.attempts += 1;
        // Only ever raised, never decreased
        if score > stats.best_score {
            stats.best_score = score;
        }

        self.write(&stats)?;
        tracing::debug!(
            "Recorded round result: score={} best={} attempts={}",
            score,
            stats.best_score,
            stats.attempts
        );
        Ok(stats)
    }

    fn write(&self, stats: &Stats) -> Result<(), StatsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StatsError::WriteFailed {
                path: self.path.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(stats).map_err(StatsError::EncodeFailed)?;
        fs::write(&self.path, json).map_err(|e| StatsError::WriteFailed {
            path: self.path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> StatsStore {
        let path = std::env::temp_dir()
            .join("car-trivia-tests")
            .join(format!("{}-{}.json", name, std::process::id()));
        let _ = fs::remove_file(&path);
        StatsStore::at_path(path)
    }

    #[test]
    fn test_read_defaults_when_missing() {
        let store = temp_store("missing");
        assert_eq!(store.read(), Stats::default());
    }

    #[test]
    fn test_record_round_result_persists() {
        let store = temp_store("persists");

        let stats = store.record_round_result(3).unwrap();
        assert_eq!(stats.best_score, 3);
        assert_eq!(stats.attempts, 1);

        // A second store over the same path sees the write
        let reread = StatsStore::at_path(PathBuf::from(store.path_display())).read();
        assert_eq!(reread, stats);
    }

    #[test]
    fn test_best_score_never_decreases() {
        let store = temp_store("never-decreases");

        store.record_round_result(4).unwrap();
        let stats = store.record_round_result(2).unwrap();

        assert_eq!(stats.best_score, 4);
        assert_eq!(stats.attempts, 2);
    }

    #[test]
    fn test_best_score_raised_on_strictly_greater() {
        let store = temp_store("strictly-greater");

        store.record_round_result(4).unwrap();
        store.record_round_result(4).unwrap();
        let stats = store.record_round_result(5).unwrap();

        assert_eq!(stats.best_score, 5);
        assert_eq!(stats.attempts, 3);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let store = temp_store("corrupt");
        fs::create_dir_all(std::env::temp_dir().join("car-trivia-tests")).unwrap();
        fs::write(PathBuf::from(store.path_display()), "not json at all").unwrap();

        assert_eq!(store.read(), Stats::default());
    }

    #[test]
    fn test_stats_round_trip() {
        let stats = Stats {
            best_score: 7,
            attempts: 12,
        };

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: Stats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, deserialized);
    }
}
