use crate::storage::{Database, PersistedIdSet, LIKED_IDS_KEY, READ_IDS_KEY};

/// Session state that decides what the board shows.
///
/// Only the two id sets are ever persisted; `show_archived` lives for the
/// session and is dropped on exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub show_archived: bool,
    pub read_ids: PersistedIdSet,
    pub liked_ids: PersistedIdSet,
}

impl ViewState {
    /// State with empty sets, not yet synced with storage.
    pub fn new(show_archived: bool) -> Self {
        Self {
            show_archived,
            read_ids: PersistedIdSet::empty(READ_IDS_KEY),
            liked_ids: PersistedIdSet::empty(LIKED_IDS_KEY),
        }
    }

    /// Replace both in-memory sets with what storage currently holds.
    pub async fn reload_sets(&mut self, db: &Database) {
        self.read_ids = PersistedIdSet::load(db, READ_IDS_KEY).await;
        self.liked_ids = PersistedIdSet::load(db, LIKED_IDS_KEY).await;
        tracing::debug!(
            read = self.read_ids.len(),
            liked = self.liked_ids.len(),
            "Reloaded id sets from storage"
        );
    }

    pub fn is_read(&self, id: &str) -> bool {
        self.read_ids.contains(id)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked_ids.contains(id)
    }
}
