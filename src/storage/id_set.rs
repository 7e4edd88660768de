//! Durable sets of item ids (read ids, liked ids).
//!
//! Each set lives under a single key in the key-value store as a JSON array
//! of strings. Loading never fails: a missing key, a storage error or a
//! corrupt value all yield an empty set.

use anyhow::Result;
use std::collections::HashSet;

use super::schema::Database;

/// Store key for the ids the user has archived (marked read).
pub const READ_IDS_KEY: &str = "tldr-read-ids";
/// Store key for the ids the user has liked.
pub const LIKED_IDS_KEY: &str = "tldr-liked-ids";

/// In-memory copy of one persisted id set, bound to its store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIdSet {
    key: &'static str,
    ids: HashSet<String>,
}

impl PersistedIdSet {
    /// Empty set bound to `key`, without touching storage.
    pub fn empty(key: &'static str) -> Self {
        Self {
            key,
            ids: HashSet::new(),
        }
    }

    /// Load the set stored under `key`.
    pub async fn load(db: &Database, key: &'static str) -> Self {
        Self {
            key,
            ids: db.load_id_set(key).await,
        }
    }

    /// Write the current membership back under the bound key.
    pub async fn save(&self, db: &Database) -> Result<()> {
        db.save_id_set(self.key, &self.ids).await
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Add `id`. Returns false if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    /// Flip membership of `id`. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Database {
    // ========================================================================
    // Id Set Operations
    // ========================================================================

    /// Load the id set stored under `key`.
    ///
    /// Absent keys, read errors and values that are not a JSON array of
    /// strings all produce an empty set.
    pub async fn load_id_set(&self, key: &str) -> HashSet<String> {
        let raw = match self.get_value(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return HashSet::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read id set, treating as empty");
                return HashSet::new();
            }
        };

        match serde_json::from_str::<HashSet<String>>(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Stored id set is not valid JSON, treating as empty");
                HashSet::new()
            }
        }
    }

    /// Replace the id set stored under `key`.
    ///
    /// Ids are written sorted so the stored value does not churn between
    /// saves of the same set.
    pub async fn save_id_set(&self, key: &str, ids: &HashSet<String>) -> Result<()> {
        let mut sorted: Vec<&str> = ids.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        let json = serde_json::to_string(&sorted)?;
        self.set_value(key, &json).await
    }
}
