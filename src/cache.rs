//! SQLite-backed local cache for the roadmap snapshot.
//!
//! The database lives at `~/.visionpath/roadmap.db` and serves as a disposable
//! cache for instant cold-start rendering. The remote store remains the source
//! of truth once reachable; this store only has to outlive restarts and work
//! with no network at all.
//!
//! One table, one row: the full composite snapshot is serialized as JSON under
//! a fixed key. Cache failures are non-fatal by contract — callers log and
//! continue on in-memory state.

use std::path::PathBuf;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::state::AppState;
use crate::types::Snapshot;

/// Fixed namespace key the snapshot is stored under.
const SNAPSHOT_KEY: &str = "visionpath_data";

/// Errors specific to local cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Failed to create cache directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// SQLite connection wrapper for the snapshot store.
///
/// Intentionally NOT `Clone` or `Sync`; the single logical thread of control
/// owns it for the life of the session.
pub struct RoadmapCache {
    conn: Connection,
}

impl RoadmapCache {
    /// Open (or create) the cache at `~/.visionpath/roadmap.db` and apply the
    /// schema.
    pub fn open() -> Result<Self, CacheError> {
        let path = Self::db_path()?;
        Self::open_at(path)
    }

    /// Open a cache at an explicit path. Useful for testing.
    pub fn open_at(path: PathBuf) -> Result<Self, CacheError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(CacheError::CreateDir)?;
            }
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS roadmap_store (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }

    /// Resolve the default cache path: `~/.visionpath/roadmap.db`.
    fn db_path() -> Result<PathBuf, CacheError> {
        let home = dirs::home_dir().ok_or(CacheError::HomeDirNotFound)?;
        Ok(home.join(".visionpath").join("roadmap.db"))
    }

    /// Persist the full snapshot, overwriting any prior content for the key.
    pub fn save_snapshot(&self, snapshot: &Snapshot) -> Result<(), CacheError> {
        let value = serde_json::to_string(snapshot)?;
        self.conn.execute(
            "INSERT INTO roadmap_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![SNAPSHOT_KEY, value],
        )?;
        Ok(())
    }

    /// Load the last saved snapshot. `Ok(None)` on first run.
    pub fn load_snapshot(&self) -> Result<Option<Snapshot>, CacheError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM roadmap_store WHERE key = ?1",
                params![SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }
}

/// Persist the current in-memory dataset, tolerating an absent or failing
/// cache.
///
/// Local durability is the last phase of every mutation and reconciliation;
/// it must never block or fail the operation itself.
pub fn persist_snapshot(state: &AppState, cache: Option<&RoadmapCache>) {
    let Some(cache) = cache else {
        return;
    };
    if let Err(e) = cache.save_snapshot(&state.snapshot()) {
        log::warn!("Local snapshot write failed (continuing on memory): {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{quarter_for_month, Priority, RoadmapItem, RoadmapStatus, Vertical};

    /// Create a temporary cache for testing.
    ///
    /// We leak the `TempDir` so the directory persists for the duration of the
    /// test. Test temp dirs are cleaned up by the OS.
    fn test_cache() -> RoadmapCache {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("test_roadmap.db");
        std::mem::forget(dir);
        RoadmapCache::open_at(path).expect("Failed to open test cache")
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            items: vec![RoadmapItem {
                id: "itm-1".to_string(),
                vertical_id: "v1".to_string(),
                product_id: "p1".to_string(),
                milestone_id: None,
                title: "Billing rework".to_string(),
                description: String::new(),
                status: RoadmapStatus::InDevelopment,
                priority: Priority::High,
                start_month: 3,
                span_months: 2,
                effort: 4,
                value: 5,
                tags: vec![],
                dependencies: vec![],
                sub_features: vec![],
                created_at: 1_700_000_000_000,
                external_id: None,
                integration_source: None,
                quarter: quarter_for_month(3),
                synced: true,
            }],
            products: vec![],
            milestones: vec![],
            verticals: vec![Vertical {
                id: "v1".to_string(),
                name: "Payments".to_string(),
                color_tag: "bg-indigo-500".to_string(),
                synced: true,
            }],
        }
    }

    #[test]
    fn test_load_before_first_save_is_none() {
        let cache = test_cache();
        let loaded = cache.load_snapshot().expect("load should succeed");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let cache = test_cache();
        cache
            .save_snapshot(&sample_snapshot())
            .expect("save should succeed");

        let loaded = cache
            .load_snapshot()
            .expect("load should succeed")
            .expect("snapshot should exist");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].id, "itm-1");
        assert_eq!(loaded.items[0].quarter, "Q2 2024");
        assert_eq!(loaded.verticals.len(), 1);
    }

    #[test]
    fn test_save_overwrites_prior_content() {
        let cache = test_cache();
        cache.save_snapshot(&sample_snapshot()).expect("first save");

        let mut next = sample_snapshot();
        next.items.clear();
        cache.save_snapshot(&next).expect("second save");

        let loaded = cache
            .load_snapshot()
            .expect("load")
            .expect("snapshot should exist");
        assert!(loaded.items.is_empty());
        assert_eq!(loaded.verticals.len(), 1);

        // Still exactly one row under the fixed key.
        let rows: i32 = cache
            .conn
            .query_row("SELECT COUNT(*) FROM roadmap_store", [], |row| row.get(0))
            .expect("count");
        assert_eq!(rows, 1);
    }
}
