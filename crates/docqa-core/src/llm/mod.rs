use crate::error::BackendError;
use docqa_config::{LlmConfig, LlmProvider};
use std::env;
use std::time::Duration;
use tracing::info;

pub mod gemini;
pub mod ollama;
pub mod openai;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

/// Text generation backend. Returned text is trimmed; an empty reply is an
/// empty string, not an error.
pub trait LlmClient: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Generation knobs shared by every provider
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub api_base: Option<String>,
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
            api_base: config.api_base.clone(),
        }
    }
}

/// Build the client named by `config.provider`.
///
/// `api_key` takes precedence over the provider's environment variable
/// (`GEMINI_API_KEY` or `OPENAI_API_KEY`). Ollama needs no key.
pub fn select_llm(config: &LlmConfig, api_key: Option<&str>) -> Result<Box<dyn LlmClient>, BackendError> {
    let settings = GenerationSettings::from(config);
    let client: Box<dyn LlmClient> = match config.provider {
        LlmProvider::Gemini => {
            let key = resolve_key(api_key, gemini::API_KEY_VAR, gemini::BACKEND)?;
            Box::new(GeminiClient::new(settings, key)?)
        }
        LlmProvider::OpenAi => {
            let key = resolve_key(api_key, openai::API_KEY_VAR, openai::BACKEND)?;
            Box::new(OpenAiClient::new(settings, key)?)
        }
        LlmProvider::Ollama => Box::new(OllamaClient::new(settings)?),
    };
    info!("using {} model {}", config.provider, config.model);
    Ok(client)
}

fn resolve_key(explicit: Option<&str>, var: &str, backend: &'static str) -> Result<String, BackendError> {
    explicit
        .map(str::to_string)
        .or_else(|| env::var(var).ok())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            BackendError::configuration(backend, format!("{} is not set. Pass an API key or set the variable.", var))
        })
}
