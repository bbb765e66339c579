use crate::error::IngestError;
use crate::models::{Chunk, ChunkMetadata, Page};
use docqa_config::ChunkingConfig;
use text_splitter::{ChunkConfig, TextSplitter};
use tracing::debug;

/// Split pages into character-bounded chunks, numbering chunks per page from 0.
pub fn split_pages(pages: &[Page], config: &ChunkingConfig) -> Result<Vec<Chunk>, IngestError> {
    let chunk_config = ChunkConfig::new(config.chunk_size)
        .with_overlap(config.chunk_overlap)
        .map_err(|e| IngestError::InvalidChunking(e.to_string()))?
        .with_trim(true);
    let splitter = TextSplitter::new(chunk_config);

    let mut chunks = Vec::new();
    for page in pages {
        let text = page.content.trim();
        if text.is_empty() {
            continue;
        }

        for (i, piece) in splitter.chunks(text).enumerate() {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            let mut metadata = ChunkMetadata::from(&page.metadata);
            metadata.chunk_index = Some(i);
            chunks.push(Chunk::new(piece, metadata));
        }
    }

    debug!("split {} pages into {} chunks", pages.len(), chunks.len());
    Ok(chunks)
}
