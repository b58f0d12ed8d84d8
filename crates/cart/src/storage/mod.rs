//! Injectable storage seam for the serialized cart slot.
//!
//! The cart is persisted as one named slot holding a single JSON document.
//! Absence of the slot is equivalent to an empty cart. The trait deals in
//! raw strings so the store owns the serialization format; implementations
//! only move bytes.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors from the storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the slot failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot contents could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A single named slot holding the serialized cart.
pub trait CartStorage {
    /// Read the raw slot contents; `None` if the slot does not exist.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the slot with `payload`.
    fn write(&mut self, payload: &str) -> Result<(), StorageError>;

    /// Delete the slot itself (not merely empty it).
    fn clear(&mut self) -> Result<(), StorageError>;
}
