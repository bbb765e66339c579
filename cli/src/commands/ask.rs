use super::ui;
use super::utils::{document_label, load_chunks, render_markdown_answer, spinner};
use super::CliRetrievalMode;
use anyhow::{Context, Result};
use clap::Args;
use docqa_config::{Config, RetrievalMode};
use docqa_core::answer::{answer, ask_with_retrieval};
use docqa_core::embeddings::select_embedder;
use docqa_core::evidence::evidence_entries;
use docqa_core::index::EmbeddingIndex;
use docqa_core::llm::{select_llm, LlmClient};
use docqa_core::retrieval::{LexicalRetriever, VectorRetriever};
use std::path::PathBuf;

#[derive(Args)]
pub struct AskArgs {
    pub question: String,

    /// PDF to retrieve from (lexical mode)
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// Retrieval strategy (defaults to retrieval.mode)
    #[arg(long, value_enum)]
    pub mode: Option<CliRetrievalMode>,

    #[arg(long)]
    pub top_k: Option<usize>,

    /// Saved index to retrieve from (vector mode)
    #[arg(long)]
    pub index_dir: Option<PathBuf>,

    /// Show the chunks the answer was grounded on
    #[arg(long)]
    pub evidence: bool,

    /// Overrides the provider's API key variable
    #[arg(long)]
    pub api_key: Option<String>,
}

pub fn handle_ask(args: AskArgs, config: &Config) -> Result<()> {
    let mode = args.mode.map(RetrievalMode::from).unwrap_or(config.retrieval.mode);
    let llm = select_llm(&config.llm, args.api_key.as_deref())?;

    ui::print_header(&format!("Q: {}", args.question));
    match mode {
        RetrievalMode::Lexical => ask_lexical(&args, llm.as_ref(), config),
        RetrievalMode::Vector => ask_vector(&args, llm.as_ref(), config),
    }
}

fn ask_lexical(args: &AskArgs, llm: &dyn LlmClient, config: &Config) -> Result<()> {
    let pdf = args
        .pdf
        .as_ref()
        .context("--pdf is required for lexical retrieval")?;
    let (_, chunks) = load_chunks(pdf, config)?;

    let retriever = LexicalRetriever::new(args.top_k.unwrap_or(config.retrieval.top_k));
    let retrieved = retriever.retrieve(&chunks, &args.question);
    if retrieved.is_empty() {
        ui::print_warning(&format!("{} has no text to ground on", document_label(pdf)));
    }

    let spinner = spinner("Answering...");
    let reply = answer(llm, &args.question, &retrieved.context)?;
    spinner.finish_and_clear();

    println!("{}", render_markdown_answer(&reply));
    if args.evidence {
        ui::print_evidence(&evidence_entries(&retrieved.selected, &document_label(pdf)));
    }
    Ok(())
}

fn ask_vector(args: &AskArgs, llm: &dyn LlmClient, config: &Config) -> Result<()> {
    let index_dir = args
        .index_dir
        .clone()
        .unwrap_or_else(|| config.storage.index_dir.clone());
    let top_k = args.top_k.unwrap_or(config.retrieval.vector_top_k);

    let embedder = select_embedder(&config.embedding)?;
    let index = EmbeddingIndex::load(&index_dir)?;

    let spinner = spinner("Retrieving and answering...");
    if !args.evidence {
        let reply = ask_with_retrieval(&args.question, &index, embedder.as_ref(), llm, top_k)?;
        spinner.finish_and_clear();
        println!("{}", render_markdown_answer(&reply));
        return Ok(());
    }

    let retrieved = VectorRetriever::new(&index, embedder.as_ref())
        .retrieve_context(&args.question, top_k)?;
    let reply = answer(llm, &args.question, &retrieved.context)?;
    spinner.finish_and_clear();

    println!("{}", render_markdown_answer(&reply));
    ui::print_evidence(&evidence_entries(
        &retrieved.selected,
        &index_dir.display().to_string(),
    ));
    Ok(())
}
