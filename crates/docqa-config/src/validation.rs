//! Validation trait and helpers for configuration types

use crate::error::{ConfigError, Result};

/// Trait for validating configuration values beyond type-level checks
pub trait Validate {
    /// Returns `Ok(())` if validation passes, or a `ConfigError` describing
    /// what failed.
    fn validate(&self) -> Result<()>;
}

/// Validate that a float lies within `[min, max]`
pub fn validate_range(field: impl Into<String>, value: f32, min: f32, max: f32) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate that an integer is strictly above `min`
pub fn validate_positive(field: impl Into<String>, value: usize, min: usize) -> Result<()> {
    if value <= min {
        return Err(ConfigError::InvalidInteger {
            field: field.into(),
            value,
            min,
        });
    }
    Ok(())
}

/// Validate an optional HTTP(S) base URL
pub fn validate_base_url(field: &str, url: Option<&str>) -> Result<()> {
    let Some(url) = url else {
        return Ok(());
    };
    if url.is_empty() {
        return Err(ConfigError::validation(
            field,
            "URL cannot be empty string (omit the key to unset)",
        ));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::validation(
            field,
            format!("URL must start with http:// or https://, got: {}", url),
        ));
    }
    Ok(())
}
