//! Deterministic chunk store with digest-derived descriptors.
//!
//! `context-vault` splits text into word-bounded chunks, fingerprints each
//! chunk with a SHA-256 digest and a fixed-length numeric descriptor, keeps
//! chunks in named in-process libraries and retrieves the top-K chunks for a
//! query by blending keyword overlap with digest agreement. Identical inputs
//! always produce identical descriptors and identical rankings.
//!
//! Chunks are always retained verbatim. The reported compression ratio is a
//! theoretical figure over descriptor size, not a storage saving.

pub mod chunking;
pub mod config;
pub mod encoding;
pub mod library;
pub mod selection;
pub mod service;
pub mod types;

pub use config::{ConfigError, EngineConfig};
pub use library::LibraryStore;
pub use service::LibraryService;
pub use types::{LibraryError, ValidationError};
