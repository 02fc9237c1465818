use thiserror::Error;

/// Malformed caller input. Always raised before any store mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid library name {name:?}: expected 1-{max_chars} characters of [a-z0-9-_]")]
    InvalidName { name: String, max_chars: usize },

    #[error("Text too short: {length} characters, minimum is {minimum}")]
    TextTooShort { length: usize, minimum: usize },

    #[error("{parameter} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        parameter: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Contract breach inside the descriptor encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("Descriptor level count must be within 1..={max}, got {0}", max = crate::encoding::MAX_LEVELS)]
    InvalidLevelCount(usize),
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Library not found: {0}")]
    NotFound(String),

    #[error("Chunk {chunk_id} not found in library {library}")]
    ChunkNotFound { library: String, chunk_id: String },

    #[error("Precondition violated: {0}")]
    Precondition(#[from] DescriptorError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Chunk {chunk_id} content does not match its recorded digest")]
    IntegrityMismatch { chunk_id: String },
}
