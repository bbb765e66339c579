//! LLM configuration

use serde::{Deserialize, Serialize};

/// Answer-generation backend configuration
///
/// Credentials are not part of the file configuration; they are read from
/// the provider's environment variable or passed explicitly when the client
/// is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// Model name
    ///
    /// Examples: "gemini-1.5-flash", "gemini-1.5-pro", "gpt-4o-mini", "llama3.2"
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens for model responses
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional API base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini (requires GEMINI_API_KEY)
    #[default]
    Gemini,
    /// OpenAI-compatible chat completions (requires OPENAI_API_KEY)
    #[serde(rename = "openai")]
    OpenAi,
    /// Local Ollama server
    Ollama,
}

impl LlmProvider {
    pub const OPTIONS: [&'static str; 3] = ["gemini", "openai", "ollama"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAi),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        };
        write!(f, "{}", name)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            api_base: None,
        }
    }
}

impl crate::validation::Validate for LlmConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::{validate_base_url, validate_positive, validate_range};

        if self.model.is_empty() {
            return Err(ConfigError::validation(
                "llm.model",
                "Model name cannot be empty",
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::validation(
                "llm.max_tokens",
                "max_tokens must be > 0",
            ));
        }

        validate_range("llm.temperature", self.temperature, 0.0, 2.0)?;
        validate_positive("llm.timeout_secs", self.timeout_secs as usize, 0)?;
        validate_base_url("llm.api_base", self.api_base.as_deref())?;

        Ok(())
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = LlmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_empty_model_invalid() {
        let config = LlmConfig {
            model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_tokens_invalid() {
        let config = LlmConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let config = LlmConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_api_base() {
        let config = LlmConfig {
            api_base: Some("not-a-url".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
