//! Environment variable configuration overlay
//!
//! Supports environment variables in the format `DOCQA_<SECTION>_<FIELD>=value`.
//!
//! Examples:
//! - `DOCQA_RETRIEVAL_MODE=vector`
//! - `DOCQA_RETRIEVAL_TOP_K=6`
//! - `DOCQA_LLM_MODEL=gemini-1.5-pro`
//! - `DOCQA_STORAGE_INDEX_DIR=/data/index`

use crate::{error::ConfigError, types::*, Config, Result};
use std::env;
use std::path::PathBuf;

const PREFIX: &str = "DOCQA_";

/// Apply every `DOCQA_` variable onto `config`, on top of whatever earlier
/// layers set. Returns the number of variables applied; variables that fail
/// to parse are reported and skipped.
pub fn apply_to(config: &mut Config) -> usize {
    let mut env_vars: Vec<(String, String)> = env::vars()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .collect();
    env_vars.sort();

    let mut applied = 0;
    for (key, value) in env_vars {
        match apply_env_var(config, &key, &value) {
            Ok(()) => applied += 1,
            Err(e) => tracing::warn!("ignoring {}: {}", key, e),
        }
    }
    applied
}

/// Apply a single environment variable to config
fn apply_env_var(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let stripped = key.strip_prefix(PREFIX).unwrap_or(key);

    let Some((section, field)) = stripped.split_once('_') else {
        return Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: "Expected format: DOCQA_<SECTION>_<FIELD>".to_string(),
        });
    };

    let section = section.to_lowercase();
    let field = field.to_lowercase();

    match section.as_str() {
        "retrieval" => apply_retrieval_var(&mut config.retrieval, &field, value),
        "chunking" => apply_chunking_var(&mut config.chunking, &field, value),
        "embedding" => apply_embedding_var(&mut config.embedding, &field, value),
        "llm" => apply_llm_var(&mut config.llm, &field, value),
        "storage" => apply_storage_var(&mut config.storage, &field, value),
        _ => Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: format!("Unknown section: {}", section),
        }),
    }
}

fn var_name(section: &str, field: &str) -> String {
    format!("{}{}_{}", PREFIX, section.to_uppercase(), field.to_uppercase())
}

fn parse_usize(section: &str, field: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Invalid integer: {}", value),
    })
}

fn unknown_field(section: &str, field: &str) -> ConfigError {
    ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Unknown field: {}", field),
    }
}

fn apply_retrieval_var(config: &mut RetrievalConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "mode" => {
            config.mode = RetrievalMode::parse(value).ok_or_else(|| {
                ConfigError::invalid_enum("retrieval.mode", value, &RetrievalMode::OPTIONS)
            })?;
        }
        "top_k" => config.top_k = parse_usize("retrieval", field, value)?,
        "vector_top_k" => config.vector_top_k = parse_usize("retrieval", field, value)?,
        _ => return Err(unknown_field("retrieval", field)),
    }
    Ok(())
}

fn apply_chunking_var(config: &mut ChunkingConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "chunk_size" => config.chunk_size = parse_usize("chunking", field, value)?,
        "chunk_overlap" => config.chunk_overlap = parse_usize("chunking", field, value)?,
        _ => return Err(unknown_field("chunking", field)),
    }
    Ok(())
}

fn apply_embedding_var(config: &mut EmbeddingConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "backend" => {
            config.backend = EmbeddingBackend::parse(value).ok_or_else(|| {
                ConfigError::invalid_enum("embedding.backend", value, &EmbeddingBackend::OPTIONS)
            })?;
        }
        "model_name" => config.model_name = value.to_string(),
        "dimensions" => config.dimensions = parse_usize("embedding", field, value)?,
        "batch_size" => config.batch_size = parse_usize("embedding", field, value)?,
        "api_base" => config.api_base = Some(value.to_string()),
        _ => return Err(unknown_field("embedding", field)),
    }
    Ok(())
}

fn apply_llm_var(config: &mut LlmConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "provider" => {
            config.provider = LlmProvider::parse(value).ok_or_else(|| {
                ConfigError::invalid_enum("llm.provider", value, &LlmProvider::OPTIONS)
            })?;
        }
        "model" => config.model = value.to_string(),
        "max_tokens" => {
            config.max_tokens = value.parse().map_err(|_| ConfigError::EnvVarError {
                var: var_name("llm", field),
                message: format!("Invalid integer: {}", value),
            })?;
        }
        "temperature" => {
            config.temperature = value.parse().map_err(|_| ConfigError::EnvVarError {
                var: var_name("llm", field),
                message: format!("Invalid float: {}", value),
            })?;
        }
        "timeout_secs" => config.timeout_secs = parse_usize("llm", field, value)? as u64,
        "api_base" => config.api_base = Some(value.to_string()),
        _ => return Err(unknown_field("llm", field)),
    }
    Ok(())
}

fn apply_storage_var(config: &mut StorageConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "index_dir" => config.index_dir = PathBuf::from(value),
        _ => return Err(unknown_field("storage", field)),
    }
    Ok(())
}

/// Serializes tests that touch process-wide `DOCQA_` variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn clear_docqa_env_vars() {
    let keys: Vec<String> = env::vars()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .map(|(k, _)| k)
        .collect();
    for key in keys {
        env::remove_var(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_mode_env() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_docqa_env_vars();
        env::set_var("DOCQA_RETRIEVAL_MODE", "vector");
        let mut config = Config::default();
        assert_eq!(apply_to(&mut config), 1);
        assert_eq!(config.retrieval.mode, RetrievalMode::Vector);
        clear_docqa_env_vars();
    }

    #[test]
    fn test_multi_word_field_env() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_docqa_env_vars();
        env::set_var("DOCQA_STORAGE_INDEX_DIR", "/srv/docqa/index");
        env::set_var("DOCQA_CHUNKING_CHUNK_OVERLAP", "25");
        let mut config = Config::default();
        apply_to(&mut config);
        assert_eq!(config.storage.index_dir, PathBuf::from("/srv/docqa/index"));
        assert_eq!(config.chunking.chunk_overlap, 25);
        clear_docqa_env_vars();
    }

    #[test]
    fn test_bad_value_is_skipped() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_docqa_env_vars();
        env::set_var("DOCQA_RETRIEVAL_TOP_K", "many");
        let mut config = Config::default();
        assert_eq!(apply_to(&mut config), 0);
        assert_eq!(config.retrieval.top_k, RetrievalConfig::default().top_k);
        clear_docqa_env_vars();
    }

    #[test]
    fn test_apply_rejects_unknown_section() {
        let mut config = Config::default();
        let err = apply_env_var(&mut config, "DOCQA_GRAPH_DEPTH", "3").unwrap_err();
        assert!(err.to_string().contains("Unknown section"));
    }

    #[test]
    fn test_apply_rejects_bad_enum() {
        let mut config = Config::default();
        let err = apply_env_var(&mut config, "DOCQA_LLM_PROVIDER", "gemeni").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'gemini'?"));
    }

    #[test]
    fn test_no_env_vars() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_docqa_env_vars();
        let mut config = Config::default();
        assert_eq!(apply_to(&mut config), 0);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_valued_var_still_overrides() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_docqa_env_vars();
        env::set_var("DOCQA_RETRIEVAL_MODE", "lexical");
        let mut config = Config::default();
        config.retrieval.mode = RetrievalMode::Vector;
        apply_to(&mut config);
        assert_eq!(config.retrieval.mode, RetrievalMode::Lexical);
        clear_docqa_env_vars();
    }
}
