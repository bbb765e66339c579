//! Configuration merging logic
//!
//! Merges configurations from multiple sources with proper precedence.

use crate::{types::*, Config};

/// Merge two configurations, with `overlay` taking precedence.
///
/// A field from `overlay` wins only when it differs from that field's
/// default, so a partially specified overlay never resets `base`.
pub fn merge(base: Config, overlay: Config) -> Config {
    Config {
        retrieval: merge_retrieval(base.retrieval, overlay.retrieval),
        chunking: merge_chunking(base.chunking, overlay.chunking),
        embedding: merge_embedding(base.embedding, overlay.embedding),
        llm: merge_llm(base.llm, overlay.llm),
        storage: merge_storage(base.storage, overlay.storage),
    }
}

/// Pick `overlay` if it was explicitly changed from the default
fn pick<T: PartialEq>(base: T, overlay: T, default: &T) -> T {
    if overlay != *default {
        overlay
    } else {
        base
    }
}

fn merge_retrieval(base: RetrievalConfig, overlay: RetrievalConfig) -> RetrievalConfig {
    let default = RetrievalConfig::default();
    RetrievalConfig {
        mode: pick(base.mode, overlay.mode, &default.mode),
        top_k: pick(base.top_k, overlay.top_k, &default.top_k),
        vector_top_k: pick(base.vector_top_k, overlay.vector_top_k, &default.vector_top_k),
    }
}

fn merge_chunking(base: ChunkingConfig, overlay: ChunkingConfig) -> ChunkingConfig {
    let default = ChunkingConfig::default();
    ChunkingConfig {
        chunk_size: pick(base.chunk_size, overlay.chunk_size, &default.chunk_size),
        chunk_overlap: pick(base.chunk_overlap, overlay.chunk_overlap, &default.chunk_overlap),
    }
}

fn merge_embedding(base: EmbeddingConfig, overlay: EmbeddingConfig) -> EmbeddingConfig {
    let default = EmbeddingConfig::default();
    EmbeddingConfig {
        backend: pick(base.backend, overlay.backend, &default.backend),
        model_name: pick(base.model_name, overlay.model_name, &default.model_name),
        dimensions: pick(base.dimensions, overlay.dimensions, &default.dimensions),
        batch_size: pick(base.batch_size, overlay.batch_size, &default.batch_size),
        api_base: overlay.api_base.or(base.api_base),
    }
}

fn merge_llm(base: LlmConfig, overlay: LlmConfig) -> LlmConfig {
    let default = LlmConfig::default();
    LlmConfig {
        provider: pick(base.provider, overlay.provider, &default.provider),
        model: pick(base.model, overlay.model, &default.model),
        max_tokens: pick(base.max_tokens, overlay.max_tokens, &default.max_tokens),
        temperature: if (overlay.temperature - default.temperature).abs() > 0.001 {
            overlay.temperature
        } else {
            base.temperature
        },
        timeout_secs: pick(base.timeout_secs, overlay.timeout_secs, &default.timeout_secs),
        api_base: overlay.api_base.or(base.api_base),
    }
}

fn merge_storage(base: StorageConfig, overlay: StorageConfig) -> StorageConfig {
    let default = StorageConfig::default();
    StorageConfig {
        index_dir: pick(base.index_dir, overlay.index_dir, &default.index_dir),
    }
}
