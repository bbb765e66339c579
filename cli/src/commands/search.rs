use super::ui;
use anyhow::Result;
use docqa_config::Config;
use docqa_core::embeddings::select_embedder;
use docqa_core::evidence::evidence_entries;
use docqa_core::index::EmbeddingIndex;
use docqa_core::retrieval::VectorRetriever;
use std::path::PathBuf;

pub fn handle_search(
    query: &str,
    index_dir: Option<PathBuf>,
    top_k: Option<usize>,
    config: &Config,
) -> Result<()> {
    let index_dir = index_dir.unwrap_or_else(|| config.storage.index_dir.clone());
    let top_k = top_k.unwrap_or(config.retrieval.vector_top_k);

    let embedder = select_embedder(&config.embedding)?;
    let index = EmbeddingIndex::load(&index_dir)?;
    let hits = VectorRetriever::new(&index, embedder.as_ref()).retrieve_hits(query, top_k)?;

    ui::print_header(&format!("Results for: {}", query));
    let chunks: Vec<_> = hits.iter().map(|h| h.chunk).collect();
    let label = index_dir.display().to_string();
    for (hit, entry) in hits.iter().zip(evidence_entries(&chunks, &label)) {
        ui::print_search_hit(entry.rank, hit.score, &entry);
    }
    Ok(())
}
