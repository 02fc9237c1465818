pub mod errors;
pub mod identifiers;
pub mod results;

pub use errors::{DescriptorError, LibraryError, ValidationError};
pub use identifiers::{ChunkId, ContentDigest, LibraryName};
pub use results::*;
