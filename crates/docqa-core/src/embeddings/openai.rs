use super::Embedder;
use crate::error::BackendError;
use crate::http;
use docqa_config::EmbeddingConfig;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;

const BACKEND: &str = "openai embeddings";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_EMBEDDING_MODEL: &str = "text-embedding-3-small";

pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(model: String, api_key: String, api_base: Option<String>) -> Result<Self, BackendError> {
        if api_key.trim().is_empty() {
            return Err(BackendError::configuration(BACKEND, "API key is empty"));
        }
        Ok(Self {
            client: http::client(BACKEND, None)?,
            api_key,
            model,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    /// Reads the key from `OPENAI_API_KEY`. The configured model is used
    /// unless it is still the local default, which OpenAI does not serve.
    pub fn from_env(config: &EmbeddingConfig) -> Result<Self, BackendError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| BackendError::configuration(BACKEND, "OPENAI_API_KEY is not set"))?;
        let model = if config.model_name.is_empty()
            || config.model_name == EmbeddingConfig::default().model_name
        {
            DEFAULT_OPENAI_EMBEDDING_MODEL.to_string()
        } else {
            config.model_name.clone()
        };
        Self::new(model, api_key, config.api_base.clone())
    }
}

impl Embedder for OpenAiEmbedder {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, BackendError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let request = self
            .client
            .post(format!("{}/embeddings", self.api_base.trim_end_matches('/')))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "input": texts,
            }));
        let body = http::send_json(BACKEND, request)?;
        parse_embeddings(body, texts.len())
    }
}

pub(crate) fn parse_embeddings(body: Value, expected: usize) -> Result<Vec<Vec<f32>>, BackendError> {
    let mut parsed: EmbeddingResponse =
        serde_json::from_value(body).map_err(|e| BackendError::malformed(BACKEND, e.to_string()))?;
    if parsed.data.len() != expected {
        return Err(BackendError::malformed(
            BACKEND,
            format!("got {} embeddings, expected {}", parsed.data.len(), expected),
        ));
    }
    parsed.data.sort_by_key(|item| item.index.unwrap_or(0));
    Ok(parsed.data.into_iter().map(|item| item.embedding).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_orders_by_index() {
        let body = json!({
            "data": [
                { "index": 1, "embedding": [0.0, 1.0] },
                { "index": 0, "embedding": [1.0, 0.0] }
            ]
        });
        let vectors = parse_embeddings(body, 2).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn count_mismatch_is_malformed() {
        let body = json!({ "data": [ { "embedding": [1.0] } ] });
        let err = parse_embeddings(body, 2).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = OpenAiEmbedder::new("m".into(), "".into(), None).err().unwrap();
        assert!(matches!(err, BackendError::Configuration { .. }));
    }
}
