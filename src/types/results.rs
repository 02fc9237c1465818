use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::library::Chunk;
use crate::types::identifiers::ContentDigest;

/// Minimum character count for a query term to take part in keyword matching.
pub const MIN_TERM_CHARS: usize = 4;

/// A normalized query.
/// Normalization rules:
/// - Lowercase
/// - Split on non-word characters (anything but Unicode alphanumerics and `_`)
/// - Terms shorter than four characters are dropped
/// - Digest is taken over the lowercased query, not the raw one
#[derive(Debug, Clone)]
pub struct Query {
    pub raw: String,
    pub terms: Vec<String>,
    pub digest: ContentDigest,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let lowered = raw.to_lowercase();
        let terms = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
            .map(|t| t.to_string())
            .collect();
        let digest = ContentDigest::from_content(lowered.as_bytes());

        Self { raw, terms, digest }
    }
}

/// Internal: detailed scoring components before they are blended.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDetails {
    pub keyword_score: f32,
    pub digest_score: f32,
    pub matched_terms: Vec<String>,
}

/// Internal: a chunk that has been scored but not yet cut to top-K.
/// Borrows the chunk so content is only cloned for the survivors.
#[derive(Debug, Clone)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub position: usize,
    pub score: f32,
    pub details: ScoreDetails,
}

/// Summary returned after a library is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLibraryResult {
    pub library: String,
    pub chunks_created: usize,
    pub total_words: usize,
    pub n_max: usize,
    pub retained_content_bytes: usize,
    pub descriptor_bytes: usize,
    pub compression_ratio: f64,
    pub replaced_existing: bool,
    pub created_at: DateTime<Utc>,
}

/// Full chunks returned by a top-K query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub library: String,
    pub query: String,
    pub chunks_considered: usize,
    pub chunks: Vec<Chunk>,
}

/// Per-library metadata as enumerated by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySummary {
    pub name: String,
    pub chunk_count: usize,
    pub total_words: usize,
    pub compression_ratio: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryStats {
    pub name: String,
    pub chunk_count: usize,
    pub total_words: usize,
    pub total_characters: usize,
    pub average_chunk_words: f64,
    pub average_chunk_characters: f64,
    pub retained_content_bytes: usize,
    pub descriptor_bytes: usize,
    pub compression_ratio: f64,
    /// Taken from the first chunk's descriptor; absent for an empty library.
    pub n_max: Option<usize>,
    /// Theoretical ceiling: log2 of the descriptor's total addressable states.
    pub addressable_bits: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub library: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub library: String,
    pub total_chunks: usize,
    pub verified: usize,
    pub failed: usize,
    pub failed_chunk_ids: Vec<String>,
    pub all_verified: bool,
}

/// A ranked search hit: score and preview instead of the full chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub chunk_id: String,
    pub rank: usize,
    pub relevance: f32,
    pub preview: String,
    pub word_count: usize,
    pub why: SearchWhy,
}

/// Explanation for why a chunk received its relevance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchWhy {
    pub query_terms: Vec<String>,
    pub matched_terms: Vec<String>,
    pub keyword_score: f32,
    pub digest_score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub library: String,
    pub query: String,
    pub chunks_considered: usize,
    pub results: Vec<SearchHit>,
}
