use super::{GenerationSettings, LlmClient};
use crate::error::BackendError;
use crate::http;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

pub(crate) const BACKEND: &str = "openai";
pub(crate) const API_KEY_VAR: &str = "OPENAI_API_KEY";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    client: Client,
    settings: GenerationSettings,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(settings: GenerationSettings, api_key: String) -> Result<Self, BackendError> {
        Ok(Self {
            client: http::client(BACKEND, Some(settings.timeout))?,
            settings,
            api_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResp {
    choices: Vec<ChatRespChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatRespChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl LlmClient for OpenAiClient {
    fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let base = self
            .settings
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        let request = self
            .client
            .post(format!("{}/chat/completions", base))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.settings.model,
                "messages": [
                    { "role": "user", "content": prompt }
                ],
                "max_tokens": self.settings.max_tokens,
                "temperature": self.settings.temperature,
            }));
        let body = http::send_json(BACKEND, request)?;
        parse_response(body)
    }
}

pub(crate) fn parse_response(body: Value) -> Result<String, BackendError> {
    let parsed: ChatResp =
        serde_json::from_value(body).map_err(|e| BackendError::malformed(BACKEND, e.to_string()))?;
    Ok(parsed
        .choices
        .first()
        .and_then(|c| c.message.content.as_deref())
        .unwrap_or_default()
        .trim()
        .to_string())
}
