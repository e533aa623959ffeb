//! Background import/export using the shared runtime and channel pattern.
//! File work runs off the caller's thread; results are sent via mpsc.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use scheduler_calendar::Event;
use scheduler_core::{ImportError, StorageError};
use scheduler_storage::{parse_import, write_export};
use tokio::runtime::Handle;

/// Messages sent from background I/O back to the owner of the `Scheduler`.
#[derive(Debug)]
pub enum IoMessage {
    /// Result of reading and validating an import file.
    ImportDone(Result<Vec<Event>, ImportError>),
    /// Result of writing an export file.
    ExportDone(Result<PathBuf, StorageError>),
}

/// Read and parse `path` in the background.
pub fn request_import(runtime: &Handle, tx: &Sender<IoMessage>, path: PathBuf) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = match tokio::fs::read_to_string(&path).await {
            Ok(text) => parse_import(&text),
            Err(e) => Err(ImportError::FileRead(e)),
        };

        match &result {
            Ok(events) => tracing::info!("Read {} events from {:?}", events.len(), path),
            Err(e) => tracing::warn!("Import from {:?} failed: {}", path, e),
        }

        let _ = tx.send(IoMessage::ImportDone(result));
    });
}

/// Write `events` to `dir/file_name` in the background.
pub fn request_export(
    runtime: &Handle,
    tx: &Sender<IoMessage>,
    dir: PathBuf,
    file_name: String,
    events: Vec<Event>,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = tokio::task::spawn_blocking(move || write_export(&dir, &file_name, &events))
            .await
            .unwrap_or_else(|e| Err(StorageError::Write(format!("export task failed: {}", e))));

        if let Err(e) = &result {
            tracing::error!("Export failed: {}", e);
        }

        let _ = tx.send(IoMessage::ExportDone(result));
    });
}
