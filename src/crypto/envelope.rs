//! Encrypted envelope codec
//!
//! An encrypted note file is a single JSON document holding three hex-encoded
//! fields: a key-derivation salt, a CBC initialization vector, and the
//! ciphertext of the JSON-serialized note array.
//!
//! ```text
//! {"salt":"<32 hex>","iv":"<32 hex>","data":"<hex ciphertext>"}
//! ```
//!
//! The cipher is AES-256-CBC with PKCS#7 padding. CBC does not authenticate,
//! so a wrong password surfaces as a padding or parse failure; every failure
//! on the decrypt path maps to [`NoteError::Decrypt`] and callers must treat
//! "wrong password" and "corrupted data" as indistinguishable.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{NoteError, NoteResult};

use super::key_derivation::derive_key;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Size of the key-derivation salt in bytes
pub const SALT_SIZE: usize = 16;

/// Size of the CBC initialization vector in bytes (one AES block)
pub const IV_SIZE: usize = 16;

/// The on-disk document of an encrypted note file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Key-derivation salt (lowercase hex)
    pub salt: String,
    /// CBC initialization vector (lowercase hex)
    pub iv: String,
    /// Ciphertext with PKCS#7 padding (lowercase hex)
    pub data: String,
}

/// How a note file is physically represented on disk
#[derive(Debug, Clone)]
pub enum FileRepresentation {
    /// Newline-separated notes, possibly empty
    Plaintext(String),
    /// The three-field encrypted envelope
    Encrypted(Envelope),
}

impl FileRepresentation {
    /// Check if this is the encrypted representation
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Self::Encrypted(_))
    }
}

/// Classify a raw on-disk document as plaintext or an encrypted envelope
///
/// A document is Encrypted iff it parses as JSON with all three envelope
/// fields present and non-empty. Every other outcome, including JSON parse
/// failure, is Plaintext; classification never errors.
pub fn classify(raw: &str) -> FileRepresentation {
    let trimmed = raw.trim();
    if let Ok(envelope) = serde_json::from_str::<Envelope>(trimmed) {
        if !envelope.salt.is_empty() && !envelope.iv.is_empty() && !envelope.data.is_empty() {
            return FileRepresentation::Encrypted(envelope);
        }
    }
    FileRepresentation::Plaintext(raw.to_string())
}

impl Envelope {
    /// Encrypt a note sequence under a password
    ///
    /// Generates a fresh random salt and IV on every call, so sealing the
    /// same notes under the same password never yields the same ciphertext.
    /// This is the only way an encrypted note file is produced.
    pub fn seal(notes: &[String], password: &str) -> NoteResult<Self> {
        let mut salt = [0u8; SALT_SIZE];
        let mut iv = [0u8; IV_SIZE];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut iv);

        let key = derive_key(password, &salt);
        let payload = serde_json::to_vec(notes)?;

        let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
            .map_err(|e| NoteError::Io(format!("Failed to initialize cipher: {}", e)))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(&payload);

        Ok(Self {
            salt: hex::encode(salt),
            iv: hex::encode(iv),
            data: hex::encode(ciphertext),
        })
    }

    /// Decrypt the envelope and parse its JSON payload
    ///
    /// Any failure along the way (bad hex, bad IV length, invalid padding,
    /// invalid UTF-8, malformed JSON) collapses into `NoteError::Decrypt`.
    pub fn open(&self, password: &str) -> NoteResult<serde_json::Value> {
        let salt = hex::decode(&self.salt).map_err(|_| NoteError::Decrypt)?;
        let iv = hex::decode(&self.iv).map_err(|_| NoteError::Decrypt)?;
        let ciphertext = hex::decode(&self.data).map_err(|_| NoteError::Decrypt)?;
        if iv.len() != IV_SIZE {
            return Err(NoteError::Decrypt);
        }

        let key = derive_key(password, &salt);
        let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), &iv)
            .map_err(|_| NoteError::Decrypt)?;
        let payload = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| NoteError::Decrypt)?;

        let text = String::from_utf8(payload).map_err(|_| NoteError::Decrypt)?;
        serde_json::from_str(&text).map_err(|_| NoteError::Decrypt)
    }

    /// Decrypt the envelope into a note sequence
    ///
    /// The payload is expected to be a JSON array; each element is coerced to
    /// a trimmed string and empties are dropped. A well-formed but non-array
    /// payload yields an empty sequence rather than an error.
    pub fn open_notes(&self, password: &str) -> NoteResult<Vec<String>> {
        Ok(notes_from_payload(&self.open(password)?))
    }
}

/// Coerce a decrypted JSON payload into a note sequence
///
/// Non-string array elements are rendered through their JSON form.
pub fn notes_from_payload(payload: &serde_json::Value) -> Vec<String> {
    match payload {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.trim().to_string(),
                other => other.to_string().trim().to_string(),
            })
            .filter(|line| !line.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
