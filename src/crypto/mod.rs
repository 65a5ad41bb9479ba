//! Cryptographic functions for aji-notes
//!
//! Provides AES-256-CBC envelope encryption with PBKDF2-SHA256 key
//! derivation for per-file password protection of note files.

pub mod envelope;
pub mod key_derivation;

pub use envelope::{classify, notes_from_payload, Envelope, FileRepresentation};
pub use key_derivation::{derive_key, DerivedKey, PBKDF2_ITERATIONS};
