use crate::error::BackendError;
use docqa_config::{EmbeddingBackend, EmbeddingConfig};
use tracing::info;

pub mod hashing;
pub mod ollama;
pub mod openai;

pub use hashing::HashingEmbedder;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;

/// Maps texts to fixed-dimension vectors. One instance must be used for both
/// building an index and querying it.
pub trait Embedder: Send + Sync {
    /// Identifies the model, stored alongside an index
    fn model_id(&self) -> &str;

    /// One vector per input text, in input order
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, BackendError>;

    fn embed_query(&self, text: &str) -> Result<Vec<f32>, BackendError> {
        self.embed(&[text.to_string()])?
            .pop()
            .ok_or_else(|| BackendError::malformed("embedder", "no vector returned for query"))
    }
}

/// Build the embedder named by `config.backend`.
pub fn select_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>, BackendError> {
    let embedder: Box<dyn Embedder> = match config.backend {
        EmbeddingBackend::Ollama => Box::new(OllamaEmbedder::new(
            config.model_name.clone(),
            config.api_base.clone(),
        )?),
        EmbeddingBackend::OpenAi => Box::new(OpenAiEmbedder::from_env(config)?),
        EmbeddingBackend::Hashing => Box::new(HashingEmbedder::new(config.dimensions)),
    };
    info!("using embedder {}", embedder.model_id());
    Ok(embedder)
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn select_hashing_backend() {
        let config = EmbeddingConfig {
            backend: EmbeddingBackend::Hashing,
            dimensions: 64,
            ..Default::default()
        };
        let embedder = select_embedder(&config).unwrap();
        assert_eq!(embedder.model_id(), "hashing-64");
        assert_eq!(embedder.embed_query("hello").unwrap().len(), 64);
    }
}
