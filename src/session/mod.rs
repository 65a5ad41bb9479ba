//! Session password and access control
//!
//! The session password lives for the running program only and gates every
//! operation on encrypted note files. It is an explicit [`Session`] value
//! passed to the record store, never process-global state, so independent
//! sessions and files can be exercised in isolation.

use zeroize::Zeroizing;

use crate::crypto::{notes_from_payload, Envelope, FileRepresentation};
use crate::error::{NoteError, NoteResult};
use crate::store::NoteStore;

/// In-memory session state: at most one password, absent by default
#[derive(Default)]
pub struct Session {
    password: Option<Zeroizing<String>>,
}

impl Session {
    /// Create a session with no password
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session password, replacing any previous one
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(Zeroizing::new(password.into()));
    }

    /// Forget the session password
    pub fn clear_password(&mut self) {
        self.password = None;
    }

    /// Get the session password, if one is set and non-empty
    pub fn password(&self) -> Option<&str> {
        self.password
            .as_deref()
            .map(String::as_str)
            .filter(|pw| !pw.is_empty())
    }

    /// Check whether a usable (non-empty) password is set
    pub fn has_password(&self) -> bool {
        self.password().is_some()
    }

    /// Get the session password if it opens the given envelope
    pub fn verified_password(&self, envelope: &Envelope) -> Option<&str> {
        self.password()
            .filter(|pw| verify_password(envelope, pw))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the password itself
        f.debug_struct("Session")
            .field("has_password", &self.has_password())
            .finish()
    }
}

/// Check whether a password opens an envelope
///
/// An empty password never verifies, even against an envelope that was
/// somehow sealed under one.
pub fn verify_password(envelope: &Envelope, password: &str) -> bool {
    !password.is_empty() && envelope.open(password).is_ok()
}

/// Outcome of storing a session password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStatus {
    /// Stored; the current file is plaintext or the password opens it
    Accepted,
    /// Stored anyway, but it does not decrypt the current file. The user may
    /// be about to switch files, so this is a warning rather than an error.
    AcceptedWithWarning,
}

/// Store a session password and validate it against the current note file
pub fn set_session_password(
    store: &NoteStore,
    session: &mut Session,
    password: &str,
) -> NoteResult<PasswordStatus> {
    session.set_password(password);
    if let FileRepresentation::Encrypted(envelope) = store.representation()? {
        if !verify_password(&envelope, password) {
            return Ok(PasswordStatus::AcceptedWithWarning);
        }
    }
    Ok(PasswordStatus::Accepted)
}

/// Set a new password for a note file, encrypting or re-encrypting it
///
/// The single transition point from plaintext to encrypted storage. A
/// plaintext file's lines are carried forward into the first envelope; an
/// already-encrypted file requires a verified current session password before
/// it is re-sealed under the new one. On success the session password becomes
/// the new password. Returns how many notes were carried into the envelope.
pub fn set_new_password(
    store: &NoteStore,
    session: &mut Session,
    new_password: &str,
) -> NoteResult<usize> {
    store.ensure_exists()?;

    let carried = match store.representation()? {
        FileRepresentation::Encrypted(envelope) => {
            let Some(current) = session.password() else {
                return Err(NoteError::AccessDenied(
                    "file is already encrypted; provide the current password first".into(),
                ));
            };
            let payload = envelope.open(current).map_err(|_| {
                NoteError::AccessDenied(
                    "current session password does not decrypt the file".into(),
                )
            })?;
            carried_notes(&payload)
        }
        FileRepresentation::Plaintext(text) => text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect(),
    };

    let sealed = Envelope::seal(&carried, new_password)?;
    store.write_envelope(&sealed)?;
    session.set_password(new_password);
    Ok(carried.len())
}

/// Coerce a decrypted payload into the notes to carry into a re-encryption
///
/// Arrays go through the usual coercion; a string payload is split on lines;
/// anything else carries nothing forward.
fn carried_notes(payload: &serde_json::Value) -> Vec<String> {
    match payload {
        serde_json::Value::String(text) => text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect(),
        other => notes_from_payload(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn notes(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_session_default_has_no_password() {
        let session = Session::new();
        assert!(!session.has_password());
        assert!(session.password().is_none());
    }

    #[test]
    fn test_empty_password_is_unusable() {
        let mut session = Session::new();
        session.set_password("");
        assert!(!session.has_password());
    }

    #[test]
    fn test_set_and_clear_password() {
        let mut session = Session::new();
        session.set_password("pw");
        assert_eq!(session.password(), Some("pw"));
        session.clear_password();
        assert!(session.password().is_none());
    }

    #[test]
    fn test_debug_never_shows_password() {
        let mut session = Session::new();
        session.set_password("hunter2");
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_verify_password() {
        let envelope = Envelope::seal(&notes(&["x"]), "pw").unwrap();
        assert!(verify_password(&envelope, "pw"));
        assert!(!verify_password(&envelope, "nope"));
        assert!(!verify_password(&envelope, ""));
    }

    #[test]
    fn test_set_new_password_encrypts_plaintext_file() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("notes"));
        std::fs::write(store.path(), "buy milk\ncall mom\n").unwrap();

        let mut session = Session::new();
        let carried = set_new_password(&store, &mut session, "s3cr3t").unwrap();
        assert_eq!(carried, 2);
        assert!(store.is_encrypted().unwrap());
        assert_eq!(session.password(), Some("s3cr3t"));

        let loaded = store.load(&session).unwrap().into_notes();
        assert_eq!(loaded, notes(&["buy milk", "call mom"]));
    }

    #[test]
    fn test_set_new_password_on_missing_file_creates_empty_envelope() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("fresh"));
        let mut session = Session::new();

        let carried = set_new_password(&store, &mut session, "pw").unwrap();
        assert_eq!(carried, 0);
        assert!(store.is_encrypted().unwrap());
        assert!(store.load(&session).unwrap().into_notes().is_empty());
    }

    #[test]
    fn test_rekey_requires_current_password() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("vault"));
        let mut session = Session::new();
        std::fs::write(store.path(), "secret note\n").unwrap();
        set_new_password(&store, &mut session, "old").unwrap();

        session.clear_password();
        let err = set_new_password(&store, &mut session, "new").unwrap_err();
        assert!(err.is_access_denied());

        session.set_password("wrong");
        let err = set_new_password(&store, &mut session, "new").unwrap_err();
        assert!(err.is_access_denied());
    }

    #[test]
    fn test_rekey_carries_notes_to_new_password() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("vault"));
        let mut session = Session::new();
        std::fs::write(store.path(), "secret note\n").unwrap();
        set_new_password(&store, &mut session, "old").unwrap();

        set_new_password(&store, &mut session, "new").unwrap();
        assert_eq!(session.password(), Some("new"));
        let loaded = store.load(&session).unwrap().into_notes();
        assert_eq!(loaded, notes(&["secret note"]));

        // The old password no longer opens the file
        session.set_password("old");
        assert!(store.load(&session).unwrap().is_locked());
    }

    #[test]
    fn test_set_session_password_warns_on_mismatch() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("vault"));
        let mut session = Session::new();
        set_new_password(&store, &mut session, "real").unwrap();

        let status = set_session_password(&store, &mut session, "guess").unwrap();
        assert_eq!(status, PasswordStatus::AcceptedWithWarning);
        // The password is still stored; the user may switch files next
        assert_eq!(session.password(), Some("guess"));

        let status = set_session_password(&store, &mut session, "real").unwrap();
        assert_eq!(status, PasswordStatus::Accepted);
    }

    #[test]
    fn test_set_session_password_on_plaintext_never_warns() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("plain"));
        std::fs::write(store.path(), "a note\n").unwrap();

        let mut session = Session::new();
        let status = set_session_password(&store, &mut session, "anything").unwrap();
        assert_eq!(status, PasswordStatus::Accepted);
    }

    #[test]
    fn test_string_payload_carries_as_lines() {
        let payload = serde_json::json!("one\n  two  \n\nthree");
        assert_eq!(carried_notes(&payload), notes(&["one", "two", "three"]));
    }

    #[test]
    fn test_scenario_plaintext_to_encrypted_lifecycle() {
        // spec scenario: plaintext lines, set password, load with and without it
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("notes"));
        std::fs::write(store.path(), "buy milk\ncall mom\n").unwrap();

        let mut session = Session::new();
        set_new_password(&store, &mut session, "s3cr3t").unwrap();

        let loaded = store.load(&session).unwrap().into_notes();
        assert_eq!(loaded, notes(&["buy milk", "call mom"]));

        session.clear_password();
        let outcome = store.load(&session).unwrap();
        assert!(outcome.is_locked());
        assert!(outcome.into_notes().is_empty());
    }
}
