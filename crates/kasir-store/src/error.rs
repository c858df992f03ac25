//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error / serde_json::Error                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path context and categorization       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller displays user-friendly message                                 │
//! │                                                                         │
//! │  Reads are forgiving: an unreadable store logs a warning and loads     │
//! │  as empty. Writes and structurally damaged rows are loud: they stop    │
//! │  the operation so damage is noticed, not silently rewritten.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use kasir_core::{CoreError, ValidationError};

/// Persistence operation errors.
///
/// A plain lookup miss is never an error: gets return `Ok(None)` and
/// update/delete return `Ok(false)` for an unknown id.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store file exists but one of its rows does not match the
    /// record schema.
    ///
    /// ## When This Occurs
    /// - Hand-edited file with a wrong column count
    /// - Non-numeric text in a money column
    /// - A different file placed at the store path
    ///
    /// Deliberately loud: rewriting a half-parsed file would destroy
    /// the rows that failed to parse.
    #[error("Store file {path} is damaged: {reason}")]
    Corrupt { path: String, reason: String },

    /// A business rule rejected the operation's input.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A domain rule rejected the operation (empty cart, short payment).
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Record encoding or decoding failed outside of row parsing.
    #[error("Record encoding failed: {0}")]
    Record(#[from] csv::Error),

    /// Profile document encoding failed.
    #[error("Profile encoding failed: {0}")]
    Profile(#[from] serde_json::Error),

    /// Underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a Corrupt error for a store path.
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
