use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a page came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub source: String,
    /// 1-based physical page number; gaps mean empty pages were dropped
    pub page_number: u32,
}

/// Normalised text of one PDF page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub content: String,
    pub metadata: PageMetadata,
}

/// Provenance of a chunk. Every field is optional so that chunks built from
/// bare strings carry no metadata at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// 0-based position within its page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl From<&PageMetadata> for ChunkMetadata {
    fn from(page: &PageMetadata) -> Self {
        Self {
            source: Some(page.source.clone()),
            page_number: Some(page.page_number),
            chunk_index: None,
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    #[serde(default)]
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Content with surrounding whitespace removed; what retrieval scores and joins
    pub fn text(&self) -> &str {
        self.content.trim()
    }
}

impl From<String> for Chunk {
    fn from(content: String) -> Self {
        Self::new(content, ChunkMetadata::default())
    }
}

impl From<&str> for Chunk {
    fn from(content: &str) -> Self {
        Self::new(content, ChunkMetadata::default())
    }
}
