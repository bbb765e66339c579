//! Display of the chunks an answer was grounded on

use crate::models::Chunk;
use std::fmt;

pub const PREVIEW_CHARS: usize = 1200;

/// One selected chunk, ready to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceEntry {
    /// 1-based rank
    pub rank: usize,
    pub source: String,
    pub page: String,
    pub chunk_index: String,
    pub preview: String,
}

impl fmt::Display for EvidenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk {} (source: {}, page: {}, chunk_index: {})",
            self.rank, self.source, self.page, self.chunk_index
        )
    }
}

/// Build entries for `selected`, in rank order. `doc_label` stands in for a
/// missing source; missing page or index show as `?`.
pub fn evidence_entries(selected: &[&Chunk], doc_label: &str) -> Vec<EvidenceEntry> {
    selected
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let meta = &chunk.metadata;
            EvidenceEntry {
                rank: i + 1,
                source: meta.source.clone().unwrap_or_else(|| doc_label.to_string()),
                page: meta
                    .page_number
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "?".to_string()),
                chunk_index: meta
                    .chunk_index
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "?".to_string()),
                preview: preview(&chunk.content, PREVIEW_CHARS),
            }
        })
        .collect()
}

/// First `max_chars` characters, with an ellipsis when cut
pub fn preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}…", &content[..byte_idx]),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChunkMetadata;

    #[test]
    fn missing_metadata_falls_back() {
        let chunk = Chunk::from("plain");
        let entries = evidence_entries(&[&chunk], "upload.pdf");
        assert_eq!(
            entries[0],
            EvidenceEntry {
                rank: 1,
                source: "upload.pdf".into(),
                page: "?".into(),
                chunk_index: "?".into(),
                preview: "plain".into(),
            }
        );
        assert_eq!(
            entries[0].to_string(),
            "Chunk 1 (source: upload.pdf, page: ?, chunk_index: ?)"
        );
    }

    #[test]
    fn metadata_is_shown_and_preview_cut() {
        let chunk = Chunk::new(
            "z".repeat(PREVIEW_CHARS + 1),
            ChunkMetadata {
                source: Some("budget.pdf".into()),
                page_number: Some(4),
                chunk_index: Some(0),
                ..Default::default()
            },
        );
        let other = Chunk::from("second");
        let entries = evidence_entries(&[&chunk, &other], "label");
        assert_eq!(entries[0].source, "budget.pdf");
        assert_eq!(entries[0].page, "4");
        assert_eq!(entries[0].chunk_index, "0");
        assert!(entries[0].preview.ends_with('…'));
        assert_eq!(entries[0].preview.chars().count(), PREVIEW_CHARS + 1);
        assert_eq!(entries[1].rank, 2);
    }
}
