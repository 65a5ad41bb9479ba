//! Configuration and path management for aji-notes

pub mod paths;

pub use paths::{NotesPaths, DEFAULT_NOTES_FILE};
