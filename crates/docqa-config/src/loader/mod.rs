//! Configuration loading from various sources

pub mod env;
pub mod file;
pub mod formats;
pub mod merge;

use crate::{Config, Result, Validate};
use std::path::{Path, PathBuf};

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Configuration source for layered loading
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File(PathBuf),
    Environment,
    /// Explicit config object (for programmatic use)
    Explicit(Config),
}

/// File names probed by [`Config::load`], in order
pub const DEFAULT_CONFIG_FILES: [&str; 4] =
    [".docqa.toml", ".docqa.yml", ".docqa.yaml", ".docqa.json"];

/// Builder for loading and merging configurations
///
/// Precedence: defaults < file < environment < explicit overrides, in the
/// order sources are added.
///
/// # Example
///
/// ```no_run
/// use docqa_config::loader::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file(".docqa.toml")
///     .with_env()
///     .build()?;
/// # Ok::<(), docqa_config::ConfigError>(())
/// ```
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Environment);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.sources.push(ConfigSource::Explicit(config));
        self
    }

    /// Merge all sources in order and validate the result
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        for source in self.sources {
            match source {
                ConfigSource::File(path) => {
                    let file_config = file::load_from_file(&path)?;
                    config = merge::merge(config, file_config);
                }
                ConfigSource::Environment => {
                    env::apply_to(&mut config);
                }
                ConfigSource::Explicit(explicit_config) => {
                    config = merge::merge(config, explicit_config);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from the first of [`DEFAULT_CONFIG_FILES`] found in
    /// the working directory, falling back to defaults, then apply the
    /// environment overlay.
    pub fn load() -> Result<Self> {
        Self::load_from_dir(Path::new("."))
    }

    /// Same as [`Config::load`], probing `dir` instead of the working directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::new();

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
        {
            builder = builder.with_file(path);
        }

        builder.with_env().build()
    }

    /// Load configuration from a specific file, then apply the environment overlay
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}
