use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::errors::ValidationError;

/// Name of a library. Case-sensitive, `[a-z0-9-_]`, 1 to `max_chars` characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryName(String);

impl LibraryName {
    pub fn parse(raw: &str, max_chars: usize) -> Result<Self, ValidationError> {
        let valid = !raw.is_empty()
            && raw.chars().count() <= max_chars
            && raw.chars().all(is_name_char);

        if !valid {
            return Err(ValidationError::InvalidName {
                name: raw.to_string(),
                max_chars,
            });
        }

        Ok(LibraryName(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
}

impl std::fmt::Display for LibraryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chunk identifier. Generated once per chunk and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn generate() -> Self {
        ChunkId(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(ChunkId)
    }
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowercase hex SHA-256 of a chunk's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn from_content(content: &[u8]) -> Self {
        Self::from_raw(&Self::raw(content))
    }

    /// Raw 32-byte digest, for callers that need the seed bytes as well as the hex form.
    pub fn raw(content: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hasher.finalize().into()
    }

    pub fn from_raw(raw: &[u8; 32]) -> Self {
        ContentDigest(hex::encode(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
