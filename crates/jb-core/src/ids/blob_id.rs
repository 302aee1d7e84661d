use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// URL-safe alphabet used for generated blob identifiers.
pub const BLOB_ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

pub const DEFAULT_BLOB_ID_LENGTH: usize = 10;

pub const MAX_BLOB_ID_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlobIdError {
    #[error("blob id must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("blob id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Short opaque identifier of a stored JSON document.
///
/// Only two ways to obtain one: [`BlobId::parse`] for untrusted input, and
/// [`BlobId::from_trusted`] for values that already went through the
/// generator or the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobId(String);

impl BlobId {
    /// Validate `raw` against the ID alphabet and the exact configured length.
    pub fn parse(raw: &str, expected_len: usize) -> Result<Self, BlobIdError> {
        if let Some(bad) = raw.chars().find(|c| !is_id_char(*c)) {
            return Err(BlobIdError::InvalidCharacter(bad));
        }

        // All characters are ASCII at this point, so byte length == char count
        if raw.len() != expected_len {
            return Err(BlobIdError::InvalidLength {
                expected: expected_len,
                actual: raw.len(),
            });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn from_trusted(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl Display for BlobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BlobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_full_alphabet() {
        let id = BlobId::parse("aZ09_-bY8x", 10).unwrap();
        assert_eq!(id.as_str(), "aZ09_-bY8x");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = BlobId::parse("nonexistent", 10).unwrap_err();
        assert_eq!(
            err,
            BlobIdError::InvalidLength {
                expected: 10,
                actual: 11
            }
        );
    }

    #[test]
    fn test_parse_rejects_characters_outside_alphabet() {
        assert_eq!(
            BlobId::parse("abc.efghij", 10).unwrap_err(),
            BlobIdError::InvalidCharacter('.')
        );
        // Multi-byte characters must not sneak past the length check
        assert!(matches!(
            BlobId::parse("ééééé", 10),
            Err(BlobIdError::InvalidCharacter('é'))
        ));
    }

    #[test]
    fn test_parse_respects_configured_length() {
        assert!(BlobId::parse("abcd", 4).is_ok());
        assert!(BlobId::parse("abcd", 10).is_err());
    }

    #[test]
    fn test_alphabet_matches_predicate() {
        assert!(BLOB_ID_ALPHABET.iter().all(|b| is_id_char(*b as char)));
        assert_eq!(BLOB_ID_ALPHABET.len(), 64);
    }
}
