//! Persistence bridge between the accumulator and the durable store.
//!
//! The entire snapshot lives under one fixed key as a JSON blob. Loading
//! merges the blob over the all-zero default: every snapshot field carries a
//! serde default, so fields missing from an older blob simply stay at their
//! defaults. A blob that fails to parse is treated the same as an absent
//! one; startup never fails because of bad stats data.

mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::HashMap;

use crate::error::Result;
use crate::types::StatsSnapshot;

/// Fixed key the whole stats blob is stored under.
pub const STATS_KEY: &str = "chattally_stats";

/// Minimal key/value contract the tracker needs from durable storage.
pub trait DurableStore {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Load the snapshot from the store, merging over defaults.
///
/// Absent or unparsable data falls back to the all-zero default; the
/// failure is logged, never surfaced.
pub fn load_snapshot(store: &dyn DurableStore) -> StatsSnapshot {
    let raw = match store.get(STATS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return StatsSnapshot::default(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read stats blob, starting from defaults");
            return StatsSnapshot::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse stats blob, starting from defaults");
            StatsSnapshot::default()
        }
    }
}

/// Serialize the full snapshot and write it under [`STATS_KEY`].
pub fn save_snapshot(store: &mut dyn DurableStore, snapshot: &StatsSnapshot) -> Result<()> {
    let raw = serde_json::to_string(snapshot)?;
    store.set(STATS_KEY, &raw)
}

/// In-memory [`DurableStore`] for hosts that bring their own persistence,
/// and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, as if a previous run had written it.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
