use super::Embedder;
use crate::error::BackendError;
use crate::http;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::env;

const BACKEND: &str = "ollama embeddings";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Embeds through a local Ollama server, one request per text
pub struct OllamaEmbedder {
    client: Client,
    model: String,
    base_url: String,
}

impl OllamaEmbedder {
    /// `base_url` falls back to `OLLAMA_BASE_URL`, then to the local default.
    pub fn new(model: String, base_url: Option<String>) -> Result<Self, BackendError> {
        if model.trim().is_empty() {
            return Err(BackendError::configuration(BACKEND, "model name is empty"));
        }
        let base_url = base_url
            .or_else(|| env::var("OLLAMA_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        Ok(Self {
            client: http::client(BACKEND, None)?,
            model,
            base_url,
        })
    }
}

impl Embedder for OllamaEmbedder {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, BackendError> {
        let url = format!("{}/api/embeddings", self.base_url.trim_end_matches('/'));
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            let request = self.client.post(&url).json(&json!({
                "model": self.model,
                "prompt": text,
            }));
            let body = http::send_json(BACKEND, request)?;
            out.push(parse_embedding(&body)?);
        }
        Ok(out)
    }
}

pub(crate) fn parse_embedding(body: &Value) -> Result<Vec<f32>, BackendError> {
    let values = body["embedding"]
        .as_array()
        .ok_or_else(|| BackendError::malformed(BACKEND, "no 'embedding' array"))?;
    values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| BackendError::malformed(BACKEND, "non-numeric embedding value"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_embedding_array() {
        let body = json!({ "embedding": [0.5, -1.0, 2] });
        assert_eq!(parse_embedding(&body).unwrap(), vec![0.5, -1.0, 2.0]);
    }

    #[test]
    fn missing_embedding_is_malformed() {
        let err = parse_embedding(&json!({ "error": "model not found" })).unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse { .. }));
    }

    #[test]
    fn empty_model_is_configuration_error() {
        let err = OllamaEmbedder::new(" ".into(), None).err().unwrap();
        assert!(matches!(err, BackendError::Configuration { .. }));
    }
}
