//! Record store for note files
//!
//! A [`NoteStore`] is bound to a single note file path and abstracts over the
//! two physical representations (plaintext lines vs encrypted envelope).
//! Every operation takes the caller's [`Session`] so password checks are
//! explicit rather than hidden global state.
//!
//! Once a file is encrypted it stays encrypted: every write path re-seals a
//! fresh envelope and there is no operation that rewrites an encrypted file
//! as plaintext.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::crypto::{classify, Envelope, FileRepresentation};
use crate::error::{NoteError, NoteResult};
use crate::session::Session;

/// Result of loading a note file
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The logical note sequence, possibly empty
    Notes(Vec<String>),
    /// The file is encrypted and no valid session password is available
    Locked,
}

impl LoadOutcome {
    /// Check if the file could not be read for lack of a valid password
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }

    /// Get the notes, treating a locked file as empty
    pub fn into_notes(self) -> Vec<String> {
        match self {
            Self::Notes(notes) => notes,
            Self::Locked => Vec::new(),
        }
    }
}

/// Read/write access to the logical note sequence of one file
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    /// Create a store bound to a note file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the note file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the note file exists on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create the note file as an empty plaintext file if it does not exist
    pub fn ensure_exists(&self) -> NoteResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NoteError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        if !self.path.exists() {
            self.write_raw("")?;
        }
        Ok(())
    }

    /// Classify the current on-disk representation
    ///
    /// An absent file classifies as empty plaintext.
    pub fn representation(&self) -> NoteResult<FileRepresentation> {
        match self.read_raw()? {
            Some(raw) => Ok(classify(&raw)),
            None => Ok(FileRepresentation::Plaintext(String::new())),
        }
    }

    /// Check if the note file is currently encrypted
    pub fn is_encrypted(&self) -> NoteResult<bool> {
        Ok(self.representation()?.is_encrypted())
    }

    /// Load the logical note sequence
    ///
    /// Plaintext files split on newlines with trimming; blank lines are
    /// dropped. Encrypted files require a session password that opens the
    /// envelope; a missing or wrong password yields [`LoadOutcome::Locked`]
    /// instead of an error so callers can prompt rather than crash.
    pub fn load(&self, session: &Session) -> NoteResult<LoadOutcome> {
        match self.representation()? {
            FileRepresentation::Plaintext(text) => Ok(LoadOutcome::Notes(split_plain(&text))),
            FileRepresentation::Encrypted(envelope) => {
                let Some(password) = session.password() else {
                    return Ok(LoadOutcome::Locked);
                };
                match envelope.open_notes(password) {
                    Ok(notes) => Ok(LoadOutcome::Notes(notes)),
                    Err(NoteError::Decrypt) => Ok(LoadOutcome::Locked),
                    Err(other) => Err(other),
                }
            }
        }
    }

    /// Persist a full note sequence
    ///
    /// If the file is currently encrypted, re-encryption is mandatory and a
    /// verified session password is required; there is no plaintext fallback.
    /// A plaintext file is written newline-joined with a trailing newline, or
    /// truncated to empty when the sequence is empty (the file is never
    /// deleted here).
    pub fn save(&self, notes: &[String], session: &Session) -> NoteResult<()> {
        match self.representation()? {
            FileRepresentation::Encrypted(envelope) => {
                let Some(password) = session.verified_password(&envelope) else {
                    return Err(NoteError::AccessDenied(
                        "file is encrypted and session password is missing or incorrect".into(),
                    ));
                };
                let sealed = Envelope::seal(notes, password)?;
                self.write_envelope(&sealed)
            }
            FileRepresentation::Plaintext(_) => {
                if notes.is_empty() {
                    self.write_raw("")
                } else {
                    self.write_raw(&(notes.join("\n") + "\n"))
                }
            }
        }
    }

    /// Append a single note
    ///
    /// Creates the file if missing. Plaintext files get a one-line tail
    /// append without rewriting existing content; encrypted files are fully
    /// decrypted and re-sealed because CBC output is not appendable.
    pub fn append(&self, note: &str, session: &Session) -> NoteResult<()> {
        self.ensure_exists()?;

        match self.representation()? {
            FileRepresentation::Encrypted(envelope) => {
                if !session.has_password() {
                    return Err(NoteError::AccessDenied(
                        "encrypted file: no session password set".into(),
                    ));
                }
                let Some(password) = session.verified_password(&envelope) else {
                    return Err(NoteError::AccessDenied("encrypted file: wrong password".into()));
                };
                let mut notes = envelope.open_notes(password)?;
                notes.push(note.trim().to_string());
                let sealed = Envelope::seal(&notes, password)?;
                self.write_envelope(&sealed)
            }
            FileRepresentation::Plaintext(_) => {
                let mut file = OpenOptions::new()
                    .append(true)
                    .open(&self.path)
                    .map_err(|e| {
                        NoteError::Io(format!("Failed to open {}: {}", self.path.display(), e))
                    })?;
                writeln!(file, "{}", note.trim())
                    .map_err(|e| NoteError::Io(format!("Failed to append note: {}", e)))?;
                Ok(())
            }
        }
    }

    /// Delete the note at a 0-based logical index
    ///
    /// Returns the removed note, or `None` when the index is out of range
    /// (in which case the file is untouched).
    pub fn delete_at(&self, index: usize, session: &Session) -> NoteResult<Option<String>> {
        if let FileRepresentation::Encrypted(envelope) = self.representation()? {
            if session.verified_password(&envelope).is_none() {
                return Err(NoteError::AccessDenied(
                    "cannot delete note: file is encrypted and session password is missing or incorrect"
                        .into(),
                ));
            }
        }

        let mut notes = self.load(session)?.into_notes();
        if index >= notes.len() {
            return Ok(None);
        }
        let removed = notes.remove(index);
        self.save(&notes, session)?;
        Ok(Some(removed))
    }

    /// Write an envelope document to the note file
    pub(crate) fn write_envelope(&self, envelope: &Envelope) -> NoteResult<()> {
        let doc = serde_json::to_string(envelope)?;
        self.write_raw(&doc)
    }

    /// Read the raw file content, `None` if the file is absent
    fn read_raw(&self) -> NoteResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| NoteError::Io(format!("Failed to read {}: {}", self.path.display(), e)))
    }

    /// Write raw file content
    fn write_raw(&self, content: &str) -> NoteResult<()> {
        std::fs::write(&self.path, content)
            .map_err(|e| NoteError::Io(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}

/// Split plaintext file content into trimmed non-empty lines
fn split_plain(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
