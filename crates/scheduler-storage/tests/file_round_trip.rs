//! Integration tests for file-backed storage and export/import.

use scheduler_calendar::{EventDraft, EventStore};
use scheduler_core::{ImportError, ValidationError};
use scheduler_storage::{read_import, write_export, JsonFileStore, PersistenceAdapter};
use tempfile::tempdir;

/// Helper to build a store with a couple of events
fn sample_store() -> EventStore {
    let mut store = EventStore::new();
    store
        .upsert(EventDraft::new("Standup", "2024-02-10").with_time("09:00"))
        .unwrap();
    store
        .upsert(EventDraft::new("Dentist", "2024-02-29").with_description("Bring card"))
        .unwrap();
    store
}

#[test]
fn test_store_survives_restart() {
    let dir = tempdir().unwrap();
    let store = sample_store();

    let mut adapter = JsonFileStore::in_dir(dir.path(), "events.json");
    adapter.save(store.snapshot()).unwrap();

    // A fresh adapter over the same file sees the same events
    let reopened = JsonFileStore::in_dir(dir.path(), "events.json");
    let restored = EventStore::from_events(reopened.load()).unwrap();
    assert_eq!(restored.snapshot(), store.snapshot());
}

#[test]
fn test_export_file_imports_back() {
    let dir = tempdir().unwrap();
    let store = sample_store();

    let path = write_export(dir.path(), "scheduler-events.json", store.snapshot()).unwrap();
    assert!(path.ends_with("scheduler-events.json"));

    let imported = read_import(&path).unwrap();
    let mut target = EventStore::new();
    target.replace_all(imported).unwrap();
    assert_eq!(target.snapshot(), store.snapshot());
}

#[test]
fn test_import_missing_file() {
    let dir = tempdir().unwrap();
    let result = read_import(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(ImportError::FileRead(_))));
}

#[test]
fn test_import_rejects_non_list() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"events": []}"#).unwrap();

    let result = read_import(&path);
    assert!(matches!(
        result,
        Err(ImportError::Validation(ValidationError::NotAList))
    ));
}
