//! Export and import of the event collection as a JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use scheduler_calendar::{store::validate_all, Event};
use scheduler_core::{ImportError, StorageError, ValidationError};

/// File name offered for exports.
pub const EXPORT_FILE_NAME: &str = "scheduler-events.json";

/// A ready-to-save export: suggested file name plus pretty JSON contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub file_name: String,
    pub contents: String,
}

/// Serialize `events` into an export document named `EXPORT_FILE_NAME`.
///
/// # Errors
/// `StorageError::Serialize` if serialization fails.
pub fn export_document(events: &[Event]) -> Result<ExportDocument, StorageError> {
    export_document_named(events, EXPORT_FILE_NAME)
}

/// Same as `export_document` with a caller-chosen file name.
///
/// # Errors
/// `StorageError::Serialize` if serialization fails.
pub fn export_document_named(
    events: &[Event],
    file_name: &str,
) -> Result<ExportDocument, StorageError> {
    Ok(ExportDocument {
        file_name: file_name.to_string(),
        contents: serde_json::to_string_pretty(events)?,
    })
}

/// Write an export of `events` into `dir` and return the written path.
///
/// # Errors
/// `StorageError::Write` if the directory or file cannot be written.
pub fn write_export(
    dir: &Path,
    file_name: &str,
    events: &[Event],
) -> Result<PathBuf, StorageError> {
    let document = export_document_named(events, file_name)?;
    fs::create_dir_all(dir).map_err(|e| StorageError::Write(format!("{}: {}", dir.display(), e)))?;

    let path = dir.join(&document.file_name);
    fs::write(&path, document.contents)
        .map_err(|e| StorageError::Write(format!("{}: {}", path.display(), e)))?;

    tracing::info!("Exported {} events to {:?}", events.len(), path);
    Ok(path)
}

/// Parse an import payload into a validated event list.
///
/// # Errors
/// - `ImportError::Parse` if `text` is not JSON
/// - `ValidationError::NotAList` if the top-level value is not an array
/// - `ValidationError::MalformedRecord` if an element is not an event
/// - any `validate_all` failure (missing id or title, duplicate ids)
pub fn parse_import(text: &str) -> Result<Vec<Event>, ImportError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ImportError::Parse(e.to_string()))?;

    let serde_json::Value::Array(items) = value else {
        return Err(ValidationError::NotAList.into());
    };

    let events = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Event>(item)
                .map_err(|e| ValidationError::MalformedRecord(format!("#{}: {}", index, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    validate_all(&events)?;
    Ok(events)
}

/// Read and parse an import file.
///
/// # Errors
/// `ImportError::FileRead` if the file cannot be read, then as `parse_import`.
pub fn read_import(path: &Path) -> Result<Vec<Event>, ImportError> {
    let text = fs::read_to_string(path)?;
    let events = parse_import(&text)?;
    tracing::info!("Read {} events from {:?}", events.len(), path);
    Ok(events)
}
