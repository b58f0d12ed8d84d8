//! File-backed storage slot: one JSON document on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{CartStorage, StorageError};

/// Storage slot backed by a single file.
///
/// A missing file is an absent slot; `clear` removes the file. Writes go
/// through the parent directory, which is created on demand.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a slot at `path`. The file is not created until first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cartwheel-storage-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_missing_file_is_absent_slot() {
        let storage = JsonFileStorage::new(temp_path("missing"));
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_write_read_clear() {
        let path = temp_path("lifecycle");
        let mut storage = JsonFileStorage::new(&path);

        storage.write(r#"{"a":1}"#).unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some(r#"{"a":1}"#));

        storage.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_clear_missing_file_is_noop() {
        let mut storage = JsonFileStorage::new(temp_path("clear-missing"));
        storage.clear().unwrap();
    }
}
