use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::domain::{NarrationArtifact, NarrationId};

/// Holds narration files until the client downloads them once. Dropping an
/// entry deletes its file from disk.
#[derive(Default)]
pub struct NarrationStore {
    entries: Mutex<HashMap<NarrationId, StoredNarration>>,
}

struct StoredNarration {
    artifact: NarrationArtifact,
    stored_at: Instant,
}

impl NarrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, artifact: NarrationArtifact) -> NarrationId {
        let id = artifact.id();
        let stored = StoredNarration {
            artifact,
            stored_at: Instant::now(),
        };
        self.entries.lock().await.insert(id, stored);
        tracing::debug!(narration_id = %id, "Narration stored");
        id
    }

    /// Removes the artifact so the caller owns its file from here on.
    pub async fn take(&self, id: &NarrationId) -> Option<NarrationArtifact> {
        self.entries
            .lock()
            .await
            .remove(id)
            .map(|stored| stored.artifact)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Drops every artifact stored longer than `ttl` ago and returns how
    /// many were removed.
    pub async fn evict_older_than(&self, ttl: Duration) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, stored| stored.stored_at.elapsed() < ttl);
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = entries.len(), "Evicted expired narrations");
        }
        evicted
    }
}
