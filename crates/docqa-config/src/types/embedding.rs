//! Embedding provider configuration

use serde::{Deserialize, Serialize};

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Embedding backend to use
    #[serde(default)]
    pub backend: EmbeddingBackend,

    /// Model name for the selected backend
    ///
    /// Examples:
    /// - Ollama: "all-minilm", "nomic-embed-text"
    /// - OpenAI: "text-embedding-3-small"
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Vector width of the local hashing backend (ignored by remote backends)
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Texts sent per embedding request while building an index
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Optional API base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// Embedding backend options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Local Ollama server
    #[default]
    Ollama,

    /// OpenAI API (requires OPENAI_API_KEY)
    #[serde(rename = "openai")]
    OpenAi,

    /// In-process feature hashing; deterministic, no model download
    Hashing,
}

impl EmbeddingBackend {
    pub const OPTIONS: [&'static str; 3] = ["ollama", "openai", "hashing"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "openai" | "external" => Some(Self::OpenAi),
            "hashing" | "local" => Some(Self::Hashing),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Hashing => "hashing",
        };
        write!(f, "{}", name)
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            model_name: default_model_name(),
            dimensions: default_dimensions(),
            batch_size: default_batch_size(),
            api_base: None,
        }
    }
}

impl crate::validation::Validate for EmbeddingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::{validate_base_url, validate_positive};

        if self.model_name.is_empty() {
            return Err(ConfigError::validation(
                "embedding.model_name",
                "Model name cannot be empty",
            ));
        }

        validate_positive("embedding.batch_size", self.batch_size, 0)?;
        if self.backend == EmbeddingBackend::Hashing {
            validate_positive("embedding.dimensions", self.dimensions, 0)?;
        }
        validate_base_url("embedding.api_base", self.api_base.as_deref())?;

        Ok(())
    }
}

fn default_model_name() -> String {
    "all-minilm".to_string()
}

fn default_dimensions() -> usize {
    384
}

fn default_batch_size() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = EmbeddingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend, EmbeddingBackend::Ollama);
    }

    #[test]
    fn test_empty_model_name_invalid() {
        let config = EmbeddingConfig {
            model_name: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hashing_requires_dimensions() {
        let config = EmbeddingConfig {
            backend: EmbeddingBackend::Hashing,
            dimensions: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_serialization() {
        assert_eq!(
            serde_json::to_string(&EmbeddingBackend::OpenAi).unwrap(),
            "\"openai\""
        );
        assert_eq!(
            serde_json::to_string(&EmbeddingBackend::Hashing).unwrap(),
            "\"hashing\""
        );
        assert_eq!(EmbeddingBackend::parse("local"), Some(EmbeddingBackend::Hashing));
    }
}
