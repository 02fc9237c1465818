use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encoding::Descriptor;
use crate::types::errors::DescriptorError;
use crate::types::identifiers::{ChunkId, ContentDigest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub word_count: usize,
    pub char_count: usize,
    pub created_at: DateTime<Utc>,
}

/// The atomic unit of stored text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub content: String,
    pub digest: ContentDigest,
    pub descriptor: Descriptor,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Encode `content` into a new chunk with a fresh identifier.
    ///
    /// This is the only way the engine constructs a chunk, so the digest is
    /// always computed over the content the chunk actually holds.
    pub fn encode(content: String, n_max: usize, now: DateTime<Utc>) -> Result<Self, DescriptorError> {
        let descriptor = Descriptor::encode(&content, n_max)?;
        let metadata = ChunkMetadata {
            word_count: content.split_whitespace().count(),
            char_count: content.chars().count(),
            created_at: now,
        };

        Ok(Chunk {
            id: ChunkId::generate(),
            digest: descriptor.digest.clone(),
            content,
            descriptor,
            metadata,
        })
    }
}
