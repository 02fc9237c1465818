pub mod chunk;
pub mod integrity;
pub mod library;
pub mod store;

pub use chunk::{Chunk, ChunkMetadata};
pub use integrity::{verify_chunk, verify_library};
pub use library::Library;
pub use store::LibraryStore;
