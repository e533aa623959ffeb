//! In-memory event collection.
//!
//! The store has no rendering knowledge. Every mutation validates first and
//! commits second, so a rejected call leaves the collection exactly as it was.

use std::collections::HashSet;

use chrono::NaiveDate;
use scheduler_core::ValidationError;
use uuid::Uuid;

use crate::date_math::parse_date;
use crate::types::{Event, EventDraft};

/// Ordered collection of events. Insertion order carries no meaning for rendering.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-persisted events.
    ///
    /// # Errors
    /// Same rules as `replace_all`.
    pub fn from_events(events: Vec<Event>) -> Result<Self, ValidationError> {
        let mut store = Self::new();
        store.replace_all(events)?;
        Ok(store)
    }

    /// Create or update an event from a form submission.
    ///
    /// If `draft.id` names an existing event, every field of that event is
    /// replaced. Otherwise a fresh id is generated and the event is appended.
    ///
    /// # Errors
    /// Returns `ValidationError::MissingTitle` / `MissingDate` when the trimmed
    /// title or date is empty, and `InvalidDate` when the date does not parse.
    pub fn upsert(&mut self, draft: EventDraft) -> Result<Event, ValidationError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        let date = parse_date(&draft.date)?;

        let existing = draft
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| self.position(id));

        let id = match existing {
            Some(index) => self.events[index].id.clone(),
            None => Uuid::new_v4().to_string(),
        };

        let event = Event {
            id,
            title: title.to_string(),
            date,
            time: non_blank(draft.time),
            description: non_blank(draft.description),
        };

        match existing {
            Some(index) => {
                tracing::debug!("Updated event {}", event.id);
                self.events[index] = event.clone();
            }
            None => {
                tracing::debug!("Created event {} on {}", event.id, event.date);
                self.events.push(event.clone());
            }
        }

        Ok(event)
    }

    /// Remove the event with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.events.remove(index);
                tracing::debug!("Deleted event {}", id);
                true
            }
            None => false,
        }
    }

    /// Replace the whole collection, as done by an import.
    ///
    /// # Errors
    /// Returns `MissingId`, `MissingTitle` or `DuplicateId` if any record is
    /// not well formed. The store is unchanged on error.
    pub fn replace_all(&mut self, events: Vec<Event>) -> Result<(), ValidationError> {
        validate_all(&events)?;
        tracing::debug!("Replacing {} events with {}", self.events.len(), events.len());
        self.events = events;
        Ok(())
    }

    /// Read-only view of every event.
    pub fn snapshot(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events whose date equals `date`, in store order.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.is_on(date))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check that every record is a well-formed, uniquely identified event.
///
/// # Errors
/// Returns the first problem found.
pub fn validate_all(events: &[Event]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if event.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if event.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if !seen.insert(event.id.as_str()) {
            return Err(ValidationError::DuplicateId(event.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, title: &str, d: NaiveDate) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            date: d,
            time: None,
            description: None,
        }
    }

    #[test]
    fn test_upsert_new_assigns_id() {
        let mut store = EventStore::new();
        let created = store.upsert(EventDraft::new("Standup", "2024-02-10")).unwrap();

        assert_eq!(store.len(), 1);
        assert!(!created.id.is_empty());
        assert_eq!(created.date, date(2024, 2, 10));
        assert_eq!(store.get(&created.id), Some(&created));
    }

    #[test]
    fn test_upsert_ids_are_unique() {
        let mut store = EventStore::new();
        let a = store.upsert(EventDraft::new("A", "2024-02-10")).unwrap();
        let b = store.upsert(EventDraft::new("A", "2024-02-10")).unwrap();

        assert_eq!(store.len(), 2);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_upsert_unknown_id_creates() {
        let mut store = EventStore::new();
        let created = store
            .upsert(EventDraft::new("Lunch", "2024-02-10").with_id("not-here"))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert!(!created.id.is_empty());
    }

    #[test]
    fn test_upsert_existing_replaces_all_fields() {
        let mut store = EventStore::new();
        let original = store
            .upsert(
                EventDraft::new("Standup", "2024-02-10")
                    .with_time("09:00")
                    .with_description("Daily sync"),
            )
            .unwrap();

        let updated = store
            .upsert(EventDraft::new("Retro", "2024-02-12").with_id(original.id.clone()))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "Retro");
        assert_eq!(updated.date, date(2024, 2, 12));
        assert_eq!(updated.time, None);
        assert_eq!(updated.description, None);
        assert_eq!(store.snapshot()[0], updated);
    }

    #[test]
    fn test_upsert_rejects_empty_title() {
        let mut store = EventStore::new();
        store.upsert(EventDraft::new("Keep", "2024-05-01")).unwrap();
        let before = store.snapshot().to_vec();

        let result = store.upsert(EventDraft::new("", "2024-05-01"));
        assert_eq!(result, Err(ValidationError::MissingTitle));

        let result = store.upsert(EventDraft::new("   ", "2024-05-01"));
        assert_eq!(result, Err(ValidationError::MissingTitle));

        assert_eq!(store.snapshot(), before.as_slice());
    }

    #[test]
    fn test_upsert_rejects_empty_or_bad_date() {
        let mut store = EventStore::new();

        assert_eq!(
            store.upsert(EventDraft::new("Party", " ")),
            Err(ValidationError::MissingDate)
        );
        assert!(matches!(
            store.upsert(EventDraft::new("Party", "tomorrow")),
            Err(ValidationError::InvalidDate(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_upsert_rejected_edit_keeps_original() {
        let mut store = EventStore::new();
        let original = store.upsert(EventDraft::new("Keep", "2024-05-01")).unwrap();

        let result = store.upsert(EventDraft::new("", "2024-05-02").with_id(original.id.clone()));
        assert!(result.is_err());
        assert_eq!(store.get(&original.id), Some(&original));
    }

    #[test]
    fn test_upsert_trims_fields() {
        let mut store = EventStore::new();
        let created = store
            .upsert(
                EventDraft::new("  Dentist ", "2024-03-01")
                    .with_time("  ")
                    .with_description(" Bring card "),
            )
            .unwrap();

        assert_eq!(created.title, "Dentist");
        assert_eq!(created.time, None);
        assert_eq!(created.description.as_deref(), Some("Bring card"));
    }

    #[test]
    fn test_delete() {
        let mut store = EventStore::new();
        let created = store.upsert(EventDraft::new("Gone", "2024-03-01")).unwrap();

        assert!(!store.delete("missing"));
        assert_eq!(store.len(), 1);

        assert!(store.delete(&created.id));
        assert!(store.is_empty());
        assert!(!store.delete(&created.id));
    }

    #[test]
    fn test_replace_all() {
        let mut store = EventStore::new();
        store.upsert(EventDraft::new("Old", "2024-01-01")).unwrap();

        store
            .replace_all(vec![
                event("a", "New A", date(2024, 2, 1)),
                event("b", "New B", date(2024, 2, 2)),
            ])
            .unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("a").is_some());
        assert!(store.snapshot().iter().all(|e| e.title != "Old"));
    }

    #[test]
    fn test_replace_all_rejects_and_keeps_store() {
        let mut store = EventStore::new();
        let kept = store.upsert(EventDraft::new("Kept", "2024-01-01")).unwrap();

        let duplicate = vec![
            event("a", "One", date(2024, 2, 1)),
            event("a", "Two", date(2024, 2, 2)),
        ];
        assert_eq!(
            store.replace_all(duplicate),
            Err(ValidationError::DuplicateId("a".to_string()))
        );

        let untitled = vec![event("x", " ", date(2024, 2, 1))];
        assert_eq!(store.replace_all(untitled), Err(ValidationError::MissingTitle));

        let no_id = vec![event("", "Title", date(2024, 2, 1))];
        assert_eq!(store.replace_all(no_id), Err(ValidationError::MissingId));

        assert_eq!(store.snapshot(), &[kept]);
    }

    #[test]
    fn test_events_on() {
        let store = EventStore::from_events(vec![
            event("a", "A", date(2024, 2, 10)),
            event("b", "B", date(2024, 2, 11)),
            event("c", "C", date(2024, 2, 10)),
        ])
        .unwrap();

        let ids: Vec<&str> = store
            .events_on(date(2024, 2, 10))
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
