use tracing::warn;

use super::chunk::Chunk;
use super::library::Library;
use crate::types::identifiers::ContentDigest;
use crate::types::results::IntegrityReport;

/// Recompute the digest from the stored content and compare to the recorded one.
pub fn verify_chunk(chunk: &Chunk) -> bool {
    ContentDigest::from_content(chunk.content.as_bytes()) == chunk.digest
}

pub fn verify_library(library: &Library) -> IntegrityReport {
    let failed_chunk_ids: Vec<String> = library
        .chunks
        .iter()
        .filter(|chunk| !verify_chunk(chunk))
        .map(|chunk| chunk.id.to_string())
        .collect();

    let total_chunks = library.chunks.len();
    let failed = failed_chunk_ids.len();

    if failed > 0 {
        warn!(
            library = %library.name,
            failed,
            total_chunks,
            "integrity verification found mismatching chunks"
        );
    }

    IntegrityReport {
        library: library.name.as_str().to_string(),
        total_chunks,
        verified: total_chunks - failed,
        failed,
        failed_chunk_ids,
        all_verified: failed == 0,
    }
}
