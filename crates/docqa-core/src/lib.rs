pub mod answer;
pub mod embeddings;
pub mod error;
pub mod evidence;
mod http;
pub mod index;
pub mod ingest;
pub mod llm;
pub mod models;
pub mod retrieval;

pub use error::{BackendError, IndexError, IngestError, RetrievalError};
pub use models::{Chunk, ChunkMetadata, Page, PageMetadata};
