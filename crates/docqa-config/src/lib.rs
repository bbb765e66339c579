//! Configuration management for docqa
//!
//! This crate provides a validated configuration system with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Config validation with helpful error messages
//! - Config merging (file + environment + explicit overrides)
//!
//! # Example
//!
//! ```no_run
//! use docqa_config::Config;
//!
//! // Load from default location (.docqa.{toml,yml,yaml,json})
//! let config = Config::load()?;
//!
//! // Or load from a specific file
//! let config = Config::from_file("path/to/config.toml")?;
//!
//! let top_k = config.retrieval.top_k;
//! let chunk_size = config.chunking.chunk_size;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::ConfigBuilder;
pub use types::*;
pub use validation::Validate;
