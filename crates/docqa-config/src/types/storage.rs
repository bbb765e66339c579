//! Storage locations

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the persisted embedding index artifacts
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
        }
    }
}

impl crate::validation::Validate for StorageConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.index_dir.as_os_str().is_empty() {
            return Err(crate::error::ConfigError::validation(
                "storage.index_dir",
                "Index directory cannot be empty",
            ));
        }
        Ok(())
    }
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("vectorstore/index")
}
