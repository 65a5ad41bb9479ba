//! Custom error types for aji-notes
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for note store operations
#[derive(Error, Debug)]
pub enum NoteError {
    /// Decryption failed. A wrong password and corrupted ciphertext are
    /// indistinguishable in CBC mode, so there is exactly one variant for both.
    #[error("decryption failed: wrong password or corrupted data")]
    Decrypt,

    /// A mutating operation was attempted on an encrypted file without a
    /// verified session password.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl NoteError {
    /// Create a "not found" error for note files
    pub fn file_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Note file",
            identifier: identifier.into(),
        }
    }

    /// Check if this is an access-denied error
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied(_))
    }

    /// Check if this is a decryption failure
    pub fn is_decrypt(&self) -> bool {
        matches!(self, Self::Decrypt)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for NoteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NoteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for note store operations
pub type NoteResult<T> = Result<T, NoteError>;
