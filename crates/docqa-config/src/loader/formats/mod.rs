//! Parsers for the supported configuration file formats

pub mod json;
pub mod toml;
pub mod yaml;
