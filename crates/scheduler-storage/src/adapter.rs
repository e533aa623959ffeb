//! Persistence adapter trait.
//!
//! Abstracts over where the event collection lives between sessions
//! (a JSON file on disk, memory in tests).

use scheduler_calendar::Event;
use scheduler_core::StorageError;

/// Result type for adapter operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable home of the event collection.
///
/// Implementations only need `try_load` and `save`. `load` is the lenient
/// entry point used at startup: it never fails.
pub trait PersistenceAdapter: Send {
    /// Read every stored event.
    ///
    /// Returns an empty list when nothing has been stored yet.
    ///
    /// # Errors
    /// `StorageError::Read` if the durable store cannot be read and
    /// `StorageError::Corrupt` if its content is not a list of events.
    fn try_load(&self) -> StorageResult<Vec<Event>>;

    /// Overwrite the stored collection with `events`.
    ///
    /// # Errors
    /// `StorageError::Write` or `StorageError::Serialize` on failure. Prior
    /// content is left intact.
    fn save(&mut self, events: &[Event]) -> StorageResult<()>;

    /// Read every stored event, treating unreadable data as empty.
    fn load(&self) -> Vec<Event> {
        match self.try_load() {
            Ok(events) => {
                tracing::debug!("Loaded {} stored events", events.len());
                events
            }
            Err(e) => {
                tracing::warn!("Ignoring stored events: {}", e);
                Vec::new()
            }
        }
    }

    /// Short label for log lines.
    fn describe(&self) -> String {
        "storage".to_string()
    }
}

impl<T: PersistenceAdapter + ?Sized> PersistenceAdapter for Box<T> {
    fn try_load(&self) -> StorageResult<Vec<Event>> {
        (**self).try_load()
    }

    fn save(&mut self, events: &[Event]) -> StorageResult<()> {
        (**self).save(events)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
