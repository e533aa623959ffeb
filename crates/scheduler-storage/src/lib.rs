//! Event persistence for Scheduler.
//!
//! Provides the `PersistenceAdapter` seam, a JSON file store, an in-memory
//! store, and the export/import document format.

pub mod adapter;
pub mod json_file;
pub mod memory;
pub mod transfer;

pub use adapter::{PersistenceAdapter, StorageResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use transfer::{
    export_document, parse_import, read_import, write_export, ExportDocument, EXPORT_FILE_NAME,
};
