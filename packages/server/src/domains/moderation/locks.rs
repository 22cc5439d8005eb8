//! Keyed per-submission locks.
//!
//! Every moderation action (single or per-item-in-bulk) holds its
//! submission's lock across the read-status → apply/revert → write-status
//! sequence, and never longer. Locks are keyed by submission id, so
//! unrelated submissions proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::common::entity_ids::SubmissionId;

/// Registry of per-submission mutexes.
///
/// Thread-safe, cloneable. Entries are created on first use and reaped by
/// [`SubmissionLocks::cleanup`] once nobody holds or waits on them.
#[derive(Clone, Default)]
pub struct SubmissionLocks {
    locks: Arc<RwLock<HashMap<SubmissionId, Arc<Mutex<()>>>>>,
}

impl SubmissionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock for one submission.
    pub async fn acquire(&self, id: SubmissionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.write().await;
            locks
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        // The registry lock is released before waiting on the entry
        lock.lock_owned().await
    }

    /// Remove entries with no holder or waiter (housekeeping).
    pub async fn cleanup(&self) {
        let mut locks = self.locks.write().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    /// Number of live entries (for tests).
    pub async fn len(&self) -> usize {
        self.locks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locks.read().await.is_empty()
    }
}
