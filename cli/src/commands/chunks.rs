use super::ui;
use super::utils::{document_label, load_chunks};
use anyhow::Result;
use console::Style;
use docqa_config::Config;
use docqa_core::evidence::evidence_entries;
use docqa_core::models::Chunk;
use std::path::Path;

pub fn handle_chunks(pdf: &Path, count: usize, config: &Config) -> Result<()> {
    let (pages, chunks) = load_chunks(pdf, config)?;

    ui::print_header(&document_label(pdf));
    ui::print_key_value("Pages with text", &pages.to_string());
    ui::print_key_value("Chunks", &chunks.len().to_string());
    ui::print_key_value(
        "Chunk size / overlap",
        &format!("{} / {}", config.chunking.chunk_size, config.chunking.chunk_overlap),
    );

    let shown: Vec<&Chunk> = chunks.iter().take(count).collect();
    for entry in evidence_entries(&shown, &document_label(pdf)) {
        let title = format!("page {} · chunk {}", entry.page, entry.chunk_index);
        ui::Panel::new(&title, Style::new().cyan()).print(&entry.preview);
    }
    Ok(())
}
