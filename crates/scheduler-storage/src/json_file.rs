//! JSON file persistence under the data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use scheduler_calendar::Event;
use scheduler_core::StorageError;

use crate::adapter::{PersistenceAdapter, StorageResult};
use crate::transfer::parse_import;

/// Stores the whole collection as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `dir/file_name`.
    pub fn in_dir(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(dir.as_ref().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PersistenceAdapter for JsonFileStore {
    fn try_load(&self) -> StorageResult<Vec<Event>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No event file at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::Read(format!("{}: {}", self.path.display(), e))),
        };

        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        parse_import(&json).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn save(&mut self, events: &[Event]) -> StorageResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| StorageError::Write(format!("{}: {}", dir.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(events)?;
        let temp = self.temp_path();

        fs::write(&temp, json)
            .map_err(|e| StorageError::Write(format!("{}: {}", temp.display(), e)))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Write(format!(
                "{}: {}",
                self.path.display(),
                e
            )));
        }

        tracing::debug!("Saved {} events to {:?}", events.len(), self.path);
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
