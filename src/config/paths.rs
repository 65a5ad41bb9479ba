//! Path management for aji-notes
//!
//! Resolves the directory note files live in.
//!
//! ## Path Resolution Order
//!
//! 1. `AJI_NOTES_DIR` environment variable (if set)
//! 2. `~/.aji-notes` under the user's home directory

use std::path::{Path, PathBuf};

use crate::error::{NoteError, NoteResult};

/// Name of the note file selected when no other file has been chosen
pub const DEFAULT_NOTES_FILE: &str = "defaultNotes";

/// Manages the notes directory and note file paths
#[derive(Debug, Clone)]
pub struct NotesPaths {
    /// Directory holding every note file
    notes_dir: PathBuf,
}

impl NotesPaths {
    /// Create a new NotesPaths instance
    ///
    /// Path resolution:
    /// 1. `AJI_NOTES_DIR` env var (explicit override)
    /// 2. `~/.aji-notes`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> NoteResult<Self> {
        let notes_dir = if let Ok(custom) = std::env::var("AJI_NOTES_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_dir()?
        };

        Ok(Self { notes_dir })
    }

    /// Create NotesPaths with a custom notes directory (useful for testing)
    pub fn with_notes_dir(notes_dir: PathBuf) -> Self {
        Self { notes_dir }
    }

    /// Get the notes directory
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Get the path of a named note file inside the notes directory
    pub fn note_file(&self, name: &str) -> PathBuf {
        self.notes_dir.join(name)
    }

    /// Get the path of the default note file
    pub fn default_note_file(&self) -> PathBuf {
        self.note_file(DEFAULT_NOTES_FILE)
    }

    /// Ensure the notes directory exists
    pub fn ensure_directory(&self) -> NoteResult<()> {
        std::fs::create_dir_all(&self.notes_dir)
            .map_err(|e| NoteError::Io(format!("Failed to create notes directory: {}", e)))?;
        Ok(())
    }

    /// List the plain files in the notes directory, sorted by name
    pub fn list_note_files(&self) -> NoteResult<Vec<String>> {
        let mut names = Vec::new();
        let entries = std::fs::read_dir(&self.notes_dir).map_err(|e| {
            NoteError::Io(format!(
                "Failed to read {}: {}",
                self.notes_dir.display(),
                e
            ))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| NoteError::Io(e.to_string()))?;
            if entry.file_type().map_err(|e| NoteError::Io(e.to_string()))?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Resolve the default notes directory under the user's home
fn resolve_default_dir() -> NoteResult<PathBuf> {
    #[cfg(not(windows))]
    let home = std::env::var("HOME")
        .map_err(|_| NoteError::Io("HOME environment variable not set".into()))?;
    #[cfg(windows)]
    let home = std::env::var("USERPROFILE")
        .map_err(|_| NoteError::Io("USERPROFILE environment variable not set".into()))?;

    Ok(PathBuf::from(home).join(".aji-notes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_notes_dir() {
        let paths = NotesPaths::with_notes_dir(PathBuf::from("/tmp/notes"));
        assert_eq!(paths.notes_dir(), Path::new("/tmp/notes"));
        assert_eq!(paths.note_file("todo"), PathBuf::from("/tmp/notes/todo"));
        assert_eq!(
            paths.default_note_file(),
            PathBuf::from("/tmp/notes/defaultNotes")
        );
    }

    #[test]
    fn test_ensure_directory() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NotesPaths::with_notes_dir(temp_dir.path().join("nested").join("notes"));
        paths.ensure_directory().unwrap();
        assert!(paths.notes_dir().is_dir());
    }

    #[test]
    fn test_list_note_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NotesPaths::with_notes_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.note_file("zebra"), "z\n").unwrap();
        std::fs::write(paths.note_file("alpha"), "a\n").unwrap();
        std::fs::create_dir(temp_dir.path().join("subdir")).unwrap();

        let names = paths.list_note_files().unwrap();
        assert_eq!(names, vec!["alpha".to_string(), "zebra".to_string()]);
    }
}
