//! Internal implementation of document identifiers.

use crate::{IdError, IdResult};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Longest identifier accepted from outside the store.
pub const MAX_ID_LEN: usize = 128;

/// File extension used for stored documents.
const DOCUMENT_EXTENSION: &str = "json";

/// A validated document identifier.
///
/// Once constructed, the id is guaranteed to be safe to use as a single path component.
///
/// # Construction
/// - [`DocumentId::generate`] allocates a fresh canonical UUID for new records.
/// - [`DocumentId::parse`] validates an externally supplied identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generates a new identifier in canonical UUID form.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Validates and wraps an externally supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is empty, longer than [`MAX_ID_LEN`],
    /// contains characters outside `[A-Za-z0-9_.-]`, or is `.`/`..`.
    pub fn parse(input: &str) -> IdResult<Self> {
        if input.is_empty() {
            return Err(IdError::InvalidInput("id cannot be empty".into()));
        }
        if input.len() > MAX_ID_LEN {
            return Err(IdError::InvalidInput(format!(
                "id must be at most {MAX_ID_LEN} characters, got {}",
                input.len()
            )));
        }
        if input == "." || input == ".." {
            return Err(IdError::InvalidInput(format!("'{input}' is not a valid id")));
        }
        if !input
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
        {
            return Err(IdError::InvalidInput(format!(
                "id may only contain letters, digits, '_', '-' and '.', got: '{input}'"
            )));
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns true if this id has the shape of a generated (canonical UUID) id.
    pub fn is_canonical_uuid(&self) -> bool {
        self.0.len() == 32
            && self
                .0
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `parent_dir/<s1>/<s2>/<id>.json`, with `s1`/`s2` taken from the SHA-256 of the id.
    pub fn sharded_path(&self, parent_dir: &Path) -> PathBuf {
        let digest = hex::encode(Sha256::digest(self.0.as_bytes()));
        parent_dir
            .join(&digest[0..2])
            .join(&digest[2..4])
            .join(format!("{}.{DOCUMENT_EXTENSION}", self.0))
    }

    /// Recovers the id from a document path produced by [`DocumentId::sharded_path`].
    ///
    /// Returns `None` for files that are not stored documents (temp files, foreign files).
    pub fn from_document_path(path: &Path) -> Option<Self> {
        if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        Self::parse(stem).ok()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentId::parse(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DocumentId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_canonical_uuid() {
        let id = DocumentId::generate();

        assert_eq!(id.as_str().len(), 32);
        assert!(id.is_canonical_uuid());
        assert_ne!(id, DocumentId::generate());
    }

    #[test]
    fn test_parse_accepts_supplied_ids() {
        for input in ["31452104", "NCT01234567", "pmc-6.2_b", "550e8400e29b41d4a716446655440000"] {
            let id = DocumentId::parse(input).expect("id should parse");
            assert_eq!(id.to_string(), input);
        }
        assert!(!DocumentId::parse("31452104").unwrap().is_canonical_uuid());
    }

    #[test]
    fn test_parse_rejects_path_like_ids() {
        for input in ["", ".", "..", "../etc", "a/b", "a\\b", "with space", "é"] {
            assert!(
                matches!(DocumentId::parse(input), Err(IdError::InvalidInput(_))),
                "expected '{input}' to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overlong_id() {
        let long = "a".repeat(MAX_ID_LEN + 1);
        assert!(DocumentId::parse(&long).is_err());
        assert!(DocumentId::parse(&long[..MAX_ID_LEN]).is_ok());
    }

    #[test]
    fn test_sharded_path_is_deterministic_and_round_trips() {
        let id = DocumentId::parse("31452104").unwrap();
        let parent = Path::new("/data/publication");

        let path = id.sharded_path(parent);
        assert_eq!(path, id.sharded_path(parent));
        assert!(path.starts_with(parent));
        assert_eq!(path.components().count(), parent.components().count() + 3);
        assert_eq!(path.file_name().unwrap(), "31452104.json");
        assert_eq!(DocumentId::from_document_path(&path), Some(id));
    }

    #[test]
    fn test_from_document_path_ignores_other_files() {
        assert_eq!(DocumentId::from_document_path(Path::new("/x/ab/cd/foo.json.tmp")), None);
        assert_eq!(DocumentId::from_document_path(Path::new("/x/ab/cd/notes.txt")), None);
    }

    #[test]
    fn test_serde_validates_ids() {
        let id: DocumentId = serde_json::from_str("\"NCT01234567\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"NCT01234567\"");

        let bad: Result<DocumentId, _> = serde_json::from_str("\"../escape\"");
        assert!(bad.is_err());
    }
}
