use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chunk::Chunk;
use crate::chunking::split_words;
use crate::types::errors::DescriptorError;
use crate::types::identifiers::LibraryName;
use crate::types::results::LibrarySummary;

/// A named, ordered collection of chunks.
///
/// Chunk order is chunking order and is what ranking falls back to on ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub name: LibraryName,
    pub chunks: Vec<Chunk>,
    /// Byte length of the text the library was built from.
    pub source_bytes: usize,
    pub compression_ratio: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Library {
    /// Chunk `text`, encode every piece and assemble the library.
    pub fn build(
        name: LibraryName,
        text: &str,
        target_words: usize,
        n_max: usize,
    ) -> Result<Self, DescriptorError> {
        let now = Utc::now();
        let chunks = split_words(text, target_words)
            .into_iter()
            .map(|piece| Chunk::encode(piece, n_max, now))
            .collect::<Result<Vec<_>, _>>()?;

        let mut library = Library {
            name,
            chunks,
            source_bytes: text.len(),
            compression_ratio: 0.0,
            created_at: now,
            updated_at: now,
        };
        library.compression_ratio = library.computed_compression_ratio();

        Ok(library)
    }

    /// Source bytes over modeled descriptor bytes; 0.0 when there are no descriptors.
    pub fn computed_compression_ratio(&self) -> f64 {
        let descriptor_bytes = self.descriptor_bytes();
        if descriptor_bytes == 0 {
            0.0
        } else {
            self.source_bytes as f64 / descriptor_bytes as f64
        }
    }

    pub fn total_words(&self) -> usize {
        self.chunks.iter().map(|c| c.metadata.word_count).sum()
    }

    pub fn total_characters(&self) -> usize {
        self.chunks.iter().map(|c| c.metadata.char_count).sum()
    }

    /// Bytes of verbatim content the library keeps in memory.
    pub fn retained_content_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.content.len()).sum()
    }

    /// Modeled size of all descriptors, the denominator of the ratio.
    pub fn descriptor_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.descriptor.serialized_size()).sum()
    }

    /// Level count of the first chunk's descriptor.
    pub fn n_max(&self) -> Option<usize> {
        self.chunks.first().map(|c| c.descriptor.n_max)
    }

    pub fn summary(&self) -> LibrarySummary {
        LibrarySummary {
            name: self.name.as_str().to_string(),
            chunk_count: self.chunks.len(),
            total_words: self.total_words(),
            compression_ratio: self.compression_ratio,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
