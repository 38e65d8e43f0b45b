//! Lifetime statistics file.
//!
//! Reading never fails: a missing or unreadable file yields zeroed stats so
//! a fresh install can play. Writing reports I/O errors to the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use td_core::stats::GameStats;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to create stats directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write stats file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Load persisted stats, or zeroed stats when there are none.
pub fn load_stats(path: &Path) -> GameStats {
    match fs::read_to_string(path) {
        Ok(text) => {
            let stats = GameStats::parse(&text);
            debug!(path = %path.display(), score = stats.high_score, "stats loaded");
            stats
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no stats file yet");
            GameStats::default()
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read stats, starting from zero");
            GameStats::default()
        }
    }
}

/// Write stats, creating the parent directory when needed.
pub fn save_stats(path: &Path, stats: &GameStats) -> Result<(), StatsError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| StatsError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, stats.to_text()).map_err(|source| StatsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "stats saved");
    Ok(())
}

/// Fold finished sessions into the persisted aggregate and save it.
/// Returns whether anything was merged.
pub fn merge_sessions(
    path: &Path,
    lifetime: &mut GameStats,
    sessions: Vec<GameStats>,
) -> Result<bool, StatsError> {
    if sessions.is_empty() {
        return Ok(false);
    }
    for session in &sessions {
        lifetime.merge(session);
    }
    save_stats(path, lifetime)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_core::stats::Stat;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("td-app-{}-{name}", std::process::id()))
            .join("stats.txt")
    }

    #[test]
    fn test_missing_file_yields_zeroed_stats() {
        let stats = load_stats(Path::new("/nonexistent/td/stats.txt"));
        assert_eq!(stats.high_score, 0);
        assert_eq!(stats.get(Stat::CreepsKilled), 0);
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let path = temp_path("roundtrip");
        let mut stats = GameStats::default();
        stats.add(Stat::CreepsKilled, 12);
        stats.record_highs(340, 3, 5);
        stats.game_time_secs = 61.5;

        save_stats(&path, &stats).unwrap();
        let loaded = load_stats(&path);

        assert_eq!(loaded.get(Stat::CreepsKilled), 12);
        assert_eq!(loaded.high_score, 340);
        assert_eq!(loaded.high_tower_level, 5);
        assert!((loaded.game_time_secs - 61.5).abs() < 1e-9);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_merge_sessions_accumulates() {
        let path = temp_path("merge");
        let mut lifetime = GameStats::default();
        let mut a = GameStats::default();
        a.add(Stat::TowersBuilt, 3);
        let mut b = GameStats::default();
        b.add(Stat::TowersBuilt, 4);
        b.record_highs(90, 1, 2);

        assert!(merge_sessions(&path, &mut lifetime, vec![a, b]).unwrap());
        assert!(!merge_sessions(&path, &mut lifetime, Vec::new()).unwrap());

        assert_eq!(lifetime.get(Stat::TowersBuilt), 7);
        assert_eq!(load_stats(&path).get(Stat::TowersBuilt), 7);
        assert_eq!(load_stats(&path).high_score, 90);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let blocker = temp_path("blocker");
        fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        fs::write(&blocker, "not a dir").unwrap();

        let err = save_stats(&blocker.join("stats.txt"), &GameStats::default()).unwrap_err();
        assert!(matches!(err, StatsError::CreateDir { .. }));
        let _ = fs::remove_dir_all(blocker.parent().unwrap());
    }
}
