//! Retrieval configuration

use serde::{Deserialize, Serialize};

/// Retrieval behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Which retrieval strategy answers questions
    #[serde(default)]
    pub mode: RetrievalMode,

    /// Number of chunks the lexical retriever grounds on
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Number of nearest chunks the vector retriever returns
    #[serde(default = "default_vector_top_k")]
    pub vector_top_k: usize,
}

/// Retrieval strategy. The two strategies are independent; neither is a
/// fallback for the other.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Keyword overlap plus length prior over in-memory chunks
    #[default]
    Lexical,
    /// Dense similarity over a persisted embedding index
    Vector,
}

impl RetrievalMode {
    pub const OPTIONS: [&'static str; 2] = ["lexical", "vector"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "lexical" | "keyword" => Some(Self::Lexical),
            "vector" | "semantic" => Some(Self::Vector),
            _ => None,
        }
    }
}

impl std::fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lexical => "lexical",
            Self::Vector => "vector",
        };
        write!(f, "{}", name)
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            mode: RetrievalMode::default(),
            top_k: default_top_k(),
            vector_top_k: default_vector_top_k(),
        }
    }
}

impl crate::validation::Validate for RetrievalConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        validate_positive("retrieval.top_k", self.top_k, 0)?;
        validate_positive("retrieval.vector_top_k", self.vector_top_k, 0)?;

        for (field, value) in [
            ("retrieval.top_k", self.top_k),
            ("retrieval.vector_top_k", self.vector_top_k),
        ] {
            if value > 1000 {
                return Err(ConfigError::validation(
                    field,
                    format!("value too large ({}), consider using <= 1000", value),
                ));
            }
        }

        Ok(())
    }
}

fn default_top_k() -> usize {
    4
}

fn default_vector_top_k() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = RetrievalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, RetrievalMode::Lexical);
        assert_eq!(config.top_k, 4);
        assert_eq!(config.vector_top_k, 3);
    }

    #[test]
    fn test_zero_top_k_invalid() {
        let config = RetrievalConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_large_vector_top_k_invalid() {
        let config = RetrievalConfig {
            vector_top_k: 2000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&RetrievalMode::Vector).unwrap(),
            "\"vector\""
        );
        assert_eq!(RetrievalMode::parse("Semantic"), Some(RetrievalMode::Vector));
        assert_eq!(RetrievalMode::parse("bm25"), None);
    }
}
