//! YAML format parser

use crate::{error::ConfigError, Config, Result};

/// Parse configuration from YAML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse configuration from YAML string with file path for better errors
pub fn parse_with_path(content: &str, path: Option<&str>) -> Result<Config> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::from_yaml_error(e, content, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RetrievalMode;

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
retrieval:
  mode: vector
  vector_top_k: 5
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.retrieval.mode, RetrievalMode::Vector);
        assert_eq!(config.retrieval.vector_top_k, 5);
        assert_eq!(config.retrieval.top_k, 4);
    }

    #[test]
    fn test_parse_empty_yaml() {
        let config = parse("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_invalid_yaml_shows_line() {
        let yaml = "retrieval:\n  mode: fuzzy\n";
        let err = parse_with_path(yaml, Some(".docqa.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::YamlError { .. }));
        assert!(err.to_string().contains("in .docqa.yml"));
    }
}
