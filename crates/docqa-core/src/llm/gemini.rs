use super::{GenerationSettings, LlmClient};
use crate::error::BackendError;
use crate::http;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::debug;

pub(crate) const BACKEND: &str = "gemini";
pub(crate) const API_KEY_VAR: &str = "GEMINI_API_KEY";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    settings: GenerationSettings,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: GenerationSettings, api_key: String) -> Result<Self, BackendError> {
        Ok(Self {
            client: http::client(BACKEND, Some(settings.timeout))?,
            settings,
            api_key,
        })
    }
}

impl LlmClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let base = self
            .settings
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        let url = format!("{}/models/{}:generateContent", base, self.settings.model);
        debug!("gemini request: {} prompt chars", prompt.chars().count());

        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [
                    { "role": "user", "parts": [ { "text": prompt } ] }
                ],
                "generationConfig": {
                    "maxOutputTokens": self.settings.max_tokens,
                    "temperature": self.settings.temperature,
                }
            }));
        let body = http::send_json(BACKEND, request)?;
        parse_response(&body)
    }
}

/// Concatenate the text parts of the first candidate. A reply without
/// candidates (e.g. blocked by safety filters) yields an empty string.
pub(crate) fn parse_response(body: &Value) -> Result<String, BackendError> {
    if let Some(message) = body["error"]["message"].as_str() {
        return Err(BackendError::malformed(BACKEND, message.to_string()));
    }
    if !body.is_object() {
        return Err(BackendError::malformed(BACKEND, "expected a JSON object"));
    }

    let text: String = body["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();
    Ok(text.trim().to_string())
}
