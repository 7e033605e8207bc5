//! Storage
//!
//! The stores never talk to a filesystem or a browser directly: they hold an
//! `Arc<dyn Storage>` and write a full snapshot under their key after every change.

use std::io;

use mockall::automock;
use thiserror::Error;

mod file;
mod memory;
pub(crate) mod snapshot;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend or the snapshot codec.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for key {key:?}")]
    Io {
        /// Key being accessed.
        key: String,

        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot codec error")]
    Codec(#[from] serde_json::Error),

    /// A snapshot was written by an incompatible version.
    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the stored snapshot.
        found: u32,

        /// Version this build writes.
        expected: u32,
    },

    /// The backend refused the operation (quota exceeded, lock poisoned, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value sink the stores persist their snapshots into.
#[automock]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
