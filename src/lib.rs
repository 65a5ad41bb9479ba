//! aji-notes - Terminal note store with per-file password encryption
//!
//! This library provides the core functionality for the aji-notes shell: a
//! local, file-backed note store where individual files can be protected by a
//! password. Encrypted files are stored as a JSON envelope (salt, IV,
//! ciphertext) sealed with AES-256-CBC under a PBKDF2-derived key.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: notes directory and path management
//! - `error`: custom error types
//! - `crypto`: key derivation and the encrypted envelope codec
//! - `store`: the record store over one note file
//! - `session`: session password lifecycle and access control
//! - `shell`: the interactive command loop (caller layer)
//!
//! # Example
//!
//! ```rust,ignore
//! use aji_notes::config::NotesPaths;
//! use aji_notes::session::{set_new_password, Session};
//! use aji_notes::store::NoteStore;
//!
//! let paths = NotesPaths::new()?;
//! let store = NoteStore::new(paths.default_note_file());
//! let mut session = Session::new();
//! set_new_password(&store, &mut session, "s3cr3t")?;
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod session;
pub mod shell;
pub mod store;

pub use error::{NoteError, NoteResult};
