//! Page chunking configuration

use serde::{Deserialize, Serialize};

/// How extracted pages are split into chunks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between adjacent chunks of the same page
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl crate::validation::Validate for ChunkingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        validate_positive("chunking.chunk_size", self.chunk_size, 0)?;

        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::validation(
                "chunking.chunk_overlap",
                format!(
                    "chunk_overlap ({}) must be < chunk_size ({})",
                    self.chunk_overlap, self.chunk_size
                ),
            ));
        }

        Ok(())
    }
}

fn default_chunk_size() -> usize {
    500
}

fn default_chunk_overlap() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = ChunkingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.chunk_overlap, 50);
    }

    #[test]
    fn test_overlap_too_large() {
        let config = ChunkingConfig {
            chunk_size: 100,
            chunk_overlap: 100,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_chunk_size_invalid() {
        let config = ChunkingConfig {
            chunk_size: 0,
            chunk_overlap: 0,
        };
        assert!(config.validate().is_err());
    }
}
