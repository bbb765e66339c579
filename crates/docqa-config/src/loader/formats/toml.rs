//! TOML format parser

use crate::{error::ConfigError, Config, Result};

/// Parse configuration from TOML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse configuration from TOML string with file path for better errors
pub fn parse_with_path(content: &str, path: Option<&str>) -> Result<Config> {
    ::toml::from_str(content).map_err(|e| ConfigError::from_toml_error(e, content, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LlmProvider;

    #[test]
    fn test_parse_minimal_toml() {
        let toml = r#"
[llm]
provider = "ollama"
model = "llama3.2"

[chunking]
chunk_size = 800
"#;
        let config = parse(toml).unwrap();
        assert_eq!(config.llm.provider, LlmProvider::Ollama);
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.chunking.chunk_size, 800);
        assert_eq!(config.chunking.chunk_overlap, 50);
    }

    #[test]
    fn test_parse_type_error_has_context() {
        let toml = "[retrieval]\ntop_k = \"four\"\n";
        let err = parse_with_path(toml, Some("docqa.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::TomlError { .. }));
        assert!(err.to_string().contains("in docqa.toml"));
    }
}
