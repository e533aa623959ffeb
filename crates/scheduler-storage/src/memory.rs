//! In-memory persistence for tests and embedding.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use scheduler_calendar::Event;
use scheduler_core::StorageError;

use crate::adapter::{PersistenceAdapter, StorageResult};

/// Adapter backed by a shared vector.
///
/// Clones share state, so a test can keep a handle after moving the store
/// into a `Scheduler` and inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Arc<Mutex<Vec<Event>>>,
    fail_writes: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        let store = Self::new();
        *store.events.lock() = events;
        store
    }

    /// Make every subsequent `save` fail with `StorageError::Write`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Copy of the last successfully saved collection.
    pub fn stored(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PersistenceAdapter for MemoryStore {
    fn try_load(&self) -> StorageResult<Vec<Event>> {
        Ok(self.stored())
    }

    fn save(&mut self, events: &[Event]) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write("memory store is read-only".to_string()));
        }
        *self.events.lock() = events.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
