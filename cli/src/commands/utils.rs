use anyhow::{Context, Result};
use docqa_config::Config;
use docqa_core::ingest::{split_pages, PageExtractor, PdfToTextExtractor};
use docqa_core::Chunk;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use termimad::{FmtText, MadSkin};
use tracing::info;

pub fn render_markdown_answer(text: &str) -> String {
    let skin = MadSkin::default();
    let (w, _) = termimad::terminal_size();
    let width = std::cmp::max(20, w.saturating_sub(4) as usize);
    FmtText::from(&skin, text, Some(width)).to_string()
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// File name used to label a document in output
pub fn document_label(pdf: &Path) -> String {
    pdf.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf.display().to_string())
}

/// Extract and split `pdf`; returns the page count and the chunks
pub fn load_chunks(pdf: &Path, config: &Config) -> Result<(usize, Vec<Chunk>)> {
    let spinner = spinner(&format!("Reading {}...", document_label(pdf)));
    let pages = PdfToTextExtractor::default()
        .extract(pdf)
        .with_context(|| format!("failed to read {}", pdf.display()))?;
    let chunks = split_pages(&pages, &config.chunking)?;
    spinner.finish_and_clear();

    info!("{} pages, {} chunks", pages.len(), chunks.len());
    Ok((pages.len(), chunks))
}
