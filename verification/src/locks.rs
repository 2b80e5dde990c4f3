//! Per-resume mutual exclusion for load → transform → persist cycles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use vouch_types::ResumeId;

/// One async mutex per resume, created on demand.
///
/// Holding the guard returned by [`RecordLocks::lock`] serialises every
/// mutation of that resume's record within this process. Entries nobody
/// holds or waits on are pruned on the next acquisition.
#[derive(Debug, Default)]
pub struct RecordLocks {
    slots: Mutex<HashMap<ResumeId, Arc<AsyncMutex<()>>>>,
}

impl RecordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, resume_id: &ResumeId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            slots.entry(resume_id.clone()).or_default().clone()
        };
        slot.lock_owned().await
    }

    /// Number of resumes with a live lock entry.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
