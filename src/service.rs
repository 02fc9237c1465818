//! Library Service: the operations exposed to the tool adapter.
//!
//! Every operation validates its inputs before touching the store, so a
//! failed call never leaves partial state behind.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::encoding::{addressable_bits, Descriptor};
use crate::library::{verify_chunk, verify_library, Chunk, Library, LibraryStore};
use crate::selection::{BlendedScorer, ChunkRanker};
use crate::types::errors::{LibraryError, ValidationError};
use crate::types::identifiers::{ChunkId, LibraryName};
use crate::types::results::{
    CreateLibraryResult, DeleteResult, IntegrityReport, LibraryStats, LibrarySummary, Query,
    QueryResult, SearchHit, SearchResult, SearchWhy,
};

pub struct LibraryService {
    store: Arc<LibraryStore>,
    config: EngineConfig,
    ranker: ChunkRanker<BlendedScorer>,
}

impl LibraryService {
    /// Service over `store` with the default configuration.
    pub fn new(store: Arc<LibraryStore>) -> Self {
        let config = EngineConfig::v1();
        let ranker = ChunkRanker::new(scorer_for(&config));
        Self { store, config, ranker }
    }

    pub fn with_config(store: Arc<LibraryStore>, config: EngineConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let ranker = ChunkRanker::new(scorer_for(&config));
        Ok(Self { store, config, ranker })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<LibraryStore> {
        &self.store
    }

    /// Chunk and encode `text` into a library, replacing any library of the same name.
    pub fn create_library(
        &self,
        name: &str,
        text: &str,
        n_max: Option<usize>,
    ) -> Result<CreateLibraryResult, LibraryError> {
        let name = self.parse_name(name)?;
        let n_max = check_range(
            "n_max",
            n_max.unwrap_or(self.config.default_n_max),
            self.config.min_n_max,
            self.config.max_n_max,
        )?;

        let length = text.chars().count();
        if length < self.config.min_text_chars {
            return Err(ValidationError::TextTooShort {
                length,
                minimum: self.config.min_text_chars,
            }
            .into());
        }

        let library = Library::build(name, text, self.config.target_words, n_max)?;
        let result = CreateLibraryResult {
            library: library.name.as_str().to_string(),
            chunks_created: library.chunks.len(),
            total_words: library.total_words(),
            n_max,
            retained_content_bytes: library.retained_content_bytes(),
            descriptor_bytes: library.descriptor_bytes(),
            compression_ratio: library.compression_ratio,
            replaced_existing: false,
            created_at: library.created_at,
        };

        let replaced = self.store.save(library).is_some();
        info!(
            library = %result.library,
            chunks = result.chunks_created,
            words = result.total_words,
            n_max,
            replaced,
            "library created"
        );

        Ok(CreateLibraryResult {
            replaced_existing: replaced,
            ..result
        })
    }

    /// Top-K full chunks for `query`, best first, ties in insertion order.
    pub fn query_library(
        &self,
        name: &str,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<QueryResult, LibraryError> {
        let top_k = check_range(
            "top_k",
            top_k.unwrap_or(self.config.default_top_k),
            1,
            self.config.max_top_k,
        )?;
        let library = self.lookup(name)?;
        let query = Query::new(query);

        let ranked = self.ranker.rank(&library, &query, top_k);
        let chunks: Vec<Chunk> = ranked.iter().map(|s| s.chunk.clone()).collect();

        debug!(library = %library.name, returned = chunks.len(), "library queried");

        Ok(QueryResult {
            library: library.name.as_str().to_string(),
            query: query.raw,
            chunks_considered: library.chunks.len(),
            chunks,
        })
    }

    pub fn list_libraries(&self) -> Vec<LibrarySummary> {
        self.store.list().iter().map(|lib| lib.summary()).collect()
    }

    pub fn get_library_stats(&self, name: &str) -> Result<LibraryStats, LibraryError> {
        let library = self.lookup(name)?;

        let chunk_count = library.chunks.len();
        let total_words = library.total_words();
        let total_characters = library.total_characters();
        let average = |total: usize| {
            if chunk_count == 0 {
                0.0
            } else {
                total as f64 / chunk_count as f64
            }
        };
        let n_max = library.n_max();

        Ok(LibraryStats {
            name: library.name.as_str().to_string(),
            chunk_count,
            total_words,
            total_characters,
            average_chunk_words: average(total_words),
            average_chunk_characters: average(total_characters),
            retained_content_bytes: library.retained_content_bytes(),
            descriptor_bytes: library.descriptor_bytes(),
            compression_ratio: library.compression_ratio,
            n_max,
            addressable_bits: n_max.map(addressable_bits),
            created_at: library.created_at,
            updated_at: library.updated_at,
        })
    }

    /// Remove a library. Deleting an absent library reports `deleted: false`.
    pub fn delete_library(&self, name: &str) -> Result<DeleteResult, LibraryError> {
        let name = self.parse_name(name)?;
        let deleted = self.store.delete(&name);
        if deleted {
            info!(library = %name, "library deleted");
        }

        Ok(DeleteResult {
            library: name.as_str().to_string(),
            deleted,
        })
    }

    pub fn verify_integrity(&self, name: &str) -> Result<IntegrityReport, LibraryError> {
        let library = self.lookup(name)?;
        Ok(verify_library(&library))
    }

    /// Ranked like [`query_library`](Self::query_library), but returns scores and previews.
    pub fn search_documents(
        &self,
        name: &str,
        query: &str,
        max_results: Option<usize>,
    ) -> Result<SearchResult, LibraryError> {
        let max_results = check_range(
            "max_results",
            max_results.unwrap_or(self.config.default_max_results),
            1,
            self.config.max_max_results,
        )?;
        let library = self.lookup(name)?;
        let query = Query::new(query);

        let results: Vec<SearchHit> = self
            .ranker
            .rank(&library, &query, max_results)
            .into_iter()
            .enumerate()
            .map(|(i, scored)| SearchHit {
                chunk_id: scored.chunk.id.to_string(),
                rank: i + 1,
                relevance: scored.score,
                preview: preview(&scored.chunk.content, self.config.preview_chars),
                word_count: scored.chunk.metadata.word_count,
                why: SearchWhy {
                    query_terms: query.terms.clone(),
                    matched_terms: scored.details.matched_terms,
                    keyword_score: scored.details.keyword_score,
                    digest_score: scored.details.digest_score,
                },
            })
            .collect();

        debug!(library = %library.name, returned = results.len(), "library searched");

        Ok(SearchResult {
            library: library.name.as_str().to_string(),
            query: query.raw,
            chunks_considered: library.chunks.len(),
            results,
        })
    }

    pub fn get_chunk(&self, name: &str, chunk_id: &str) -> Result<Chunk, LibraryError> {
        let library = self.lookup(name)?;
        let not_found = || LibraryError::ChunkNotFound {
            library: library.name.as_str().to_string(),
            chunk_id: chunk_id.to_string(),
        };

        let id = ChunkId::parse(chunk_id).ok_or_else(not_found)?;
        library
            .chunks
            .iter()
            .find(|chunk| chunk.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    /// Serialize a library as a JSON snapshot for an external persistence layer.
    pub fn export_library(&self, name: &str) -> Result<String, LibraryError> {
        let library = self.lookup(name)?;
        Ok(serde_json::to_string_pretty(&*library)?)
    }

    /// Restore a library from a JSON snapshot, replacing any library of the same name.
    ///
    /// The name and level count are re-validated and every chunk's digest and
    /// descriptor are recomputed before the store is touched. Imported chunks
    /// get fresh ids and the compression ratio is recomputed, so nothing
    /// derived is taken from the snapshot on trust.
    pub fn import_library(&self, json: &str) -> Result<LibrarySummary, LibraryError> {
        let mut library: Library = serde_json::from_str(json)?;
        self.parse_name(library.name.as_str())?;

        let n_max = match library.chunks.first() {
            Some(first) => check_range(
                "n_max",
                first.descriptor.n_max,
                self.config.min_n_max,
                self.config.max_n_max,
            )?,
            None => return Err(ValidationError::InvalidSnapshot("library has no chunks".into()).into()),
        };

        for chunk in &library.chunks {
            if chunk.descriptor.n_max != n_max {
                return Err(ValidationError::InvalidSnapshot(format!(
                    "chunk {} has {} descriptor levels, expected {n_max}",
                    chunk.id, chunk.descriptor.n_max
                ))
                .into());
            }

            let descriptor = Descriptor::encode(&chunk.content, n_max)?;
            if !verify_chunk(chunk) || descriptor != chunk.descriptor {
                return Err(LibraryError::IntegrityMismatch {
                    chunk_id: chunk.id.to_string(),
                });
            }
        }

        if library.source_bytes < library.retained_content_bytes() {
            return Err(ValidationError::InvalidSnapshot(format!(
                "source_bytes {} is smaller than the {} bytes of retained content",
                library.source_bytes,
                library.retained_content_bytes()
            ))
            .into());
        }

        for chunk in &mut library.chunks {
            chunk.id = ChunkId::generate();
            chunk.metadata.word_count = chunk.content.split_whitespace().count();
            chunk.metadata.char_count = chunk.content.chars().count();
        }
        library.compression_ratio = library.computed_compression_ratio();
        library.updated_at = Utc::now();
        let summary = library.summary();
        let replaced = self.store.save(library).is_some();
        info!(library = %summary.name, chunks = summary.chunk_count, replaced, "library imported");

        Ok(summary)
    }

    fn parse_name(&self, name: &str) -> Result<LibraryName, ValidationError> {
        LibraryName::parse(name, self.config.max_name_chars)
    }

    fn lookup(&self, name: &str) -> Result<Arc<Library>, LibraryError> {
        let name = self.parse_name(name)?;
        self.store
            .get(&name)
            .ok_or_else(|| LibraryError::NotFound(name.as_str().to_string()))
    }
}

fn scorer_for(config: &EngineConfig) -> BlendedScorer {
    BlendedScorer {
        keyword_weight: config.keyword_weight,
        digest_weight: config.digest_weight,
    }
}

/// Range-check without clamping.
fn check_range(parameter: &'static str, value: usize, min: usize, max: usize) -> Result<usize, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}

/// First `max_chars` characters of `content`, with an ellipsis when cut.
fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
