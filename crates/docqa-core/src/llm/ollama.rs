use super::{GenerationSettings, LlmClient};
use crate::embeddings::ollama::DEFAULT_OLLAMA_URL;
use crate::error::BackendError;
use crate::http;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::env;

pub(crate) const BACKEND: &str = "ollama";

pub struct OllamaClient {
    client: Client,
    settings: GenerationSettings,
    base_url: String,
}

impl OllamaClient {
    pub fn new(settings: GenerationSettings) -> Result<Self, BackendError> {
        let base_url = settings
            .api_base
            .clone()
            .or_else(|| env::var("OLLAMA_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        Ok(Self {
            client: http::client(BACKEND, Some(settings.timeout))?,
            settings,
            base_url,
        })
    }
}

impl LlmClient for OllamaClient {
    fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let request = self.client.post(url).json(&json!({
            "model": self.settings.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "stream": false,
            "options": {
                "num_predict": self.settings.max_tokens,
                "temperature": self.settings.temperature,
            }
        }));
        let body = http::send_json(BACKEND, request)?;
        parse_response(&body)
    }
}

pub(crate) fn parse_response(body: &Value) -> Result<String, BackendError> {
    if let Some(error) = body["error"].as_str() {
        return Err(BackendError::malformed(BACKEND, error.to_string()));
    }
    Ok(body["message"]["content"]
        .as_str()
        .unwrap_or("")
        .trim()
        .to_string())
}
