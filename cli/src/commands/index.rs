use super::ui;
use super::utils::{document_label, load_chunks, spinner};
use anyhow::{bail, Context, Result};
use docqa_config::Config;
use docqa_core::embeddings::select_embedder;
use docqa_core::index::EmbeddingIndex;
use std::path::{Path, PathBuf};

pub fn handle_index(pdf: &Path, index_dir: Option<PathBuf>, config: &Config) -> Result<()> {
    let index_dir = index_dir.unwrap_or_else(|| config.storage.index_dir.clone());
    let embedder = select_embedder(&config.embedding)?;

    let (_, chunks) = load_chunks(pdf, config)?;
    if chunks.is_empty() {
        bail!("{} has no extractable text", document_label(pdf));
    }

    let spinner = spinner(&format!("Embedding {} chunks...", chunks.len()));
    let index = EmbeddingIndex::build(&chunks, embedder.as_ref(), config.embedding.batch_size)?;
    spinner.finish_with_message(format!(
        "Embedded {} chunks ({} dims).",
        index.len(),
        index.dimension()
    ));

    index
        .save(&index_dir)
        .with_context(|| format!("failed to save index to {}", index_dir.display()))?;
    ui::print_success(&format!(
        "Indexed {} into {}",
        document_label(pdf),
        index_dir.display()
    ));
    Ok(())
}
