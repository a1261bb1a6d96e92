//! # Store Error Types
//!
//! Error types for data-file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error      CoreError (planning)           │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  StoreError (this module) ← Adds file path and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in app) ← Serialized for clients                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invalid JSON is *not* an error at this level: it is recovered by
//! backup-and-reset in [`crate::file::load_json`].

use std::path::{Path, PathBuf};

use inventa_core::{CoreError, ErrorKind};
use thiserror::Error;

/// Data-file operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Business rule violation raised while planning.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading, writing or renaming a file failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    /// - A path component is not a directory
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is valid JSON but its records have the wrong shape.
    ///
    /// ## When This Occurs
    /// - A product without `nombre`
    /// - An id stored as a string
    /// - A money amount with more than four decimals
    #[error("Malformed records in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a collection failed.
    #[error("Cannot encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The second write of a two-file commit failed and so did the rollback.
    ///
    /// The sales file holds the new lines while products kept the old stock.
    #[error(
        "Partial commit: {commit}; rollback of {} also failed: {rollback}",
        sales_path.display()
    )]
    PartialCommit {
        sales_path: PathBuf,
        commit: String,
        rollback: String,
    },
}

impl StoreError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Classifies the error for status mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Core(err) => err.kind(),
            _ => ErrorKind::Internal,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
