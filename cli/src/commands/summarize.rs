use super::ui;
use super::utils::{document_label, load_chunks, render_markdown_answer, spinner};
use anyhow::{bail, Result};
use docqa_config::Config;
use docqa_core::answer::summarize;
use docqa_core::llm::select_llm;
use std::path::Path;

pub fn handle_summarize(pdf: &Path, api_key: Option<&str>, config: &Config) -> Result<()> {
    let llm = select_llm(&config.llm, api_key)?;
    let (_, chunks) = load_chunks(pdf, config)?;
    if chunks.is_empty() {
        bail!("{} has no extractable text", document_label(pdf));
    }

    let spinner = spinner(&format!("Summarizing with {}...", config.llm.model));
    let summary = summarize(llm.as_ref(), &chunks)?;
    spinner.finish_and_clear();

    ui::print_header(&format!("Summary of {}", document_label(pdf)));
    println!("{}", render_markdown_answer(&summary));
    Ok(())
}
