//! Configuration type definitions
//!
//! Each section is self-contained with validation and sensible defaults.

pub mod chunking;
pub mod embedding;
pub mod llm;
pub mod retrieval;
pub mod storage;

pub use chunking::ChunkingConfig;
pub use embedding::{EmbeddingBackend, EmbeddingConfig};
pub use llm::{LlmConfig, LlmProvider};
pub use retrieval::{RetrievalConfig, RetrievalMode};
pub use storage::StorageConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration, organized by functional area
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Retrieval strategy and result counts
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Page splitting
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding backend used to build and query the vector index
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Answer generation backend
    #[serde(default)]
    pub llm: LlmConfig,

    /// On-disk locations
    #[serde(default)]
    pub storage: StorageConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.retrieval.validate()?;
        self.chunking.validate()?;
        self.embedding.validate()?;
        self.llm.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
