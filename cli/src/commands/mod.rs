pub mod ask;
pub mod chunks;
pub mod index;
pub mod search;
pub mod summarize;
pub mod ui;
pub mod utils;

pub use ask::{handle_ask, AskArgs};
pub use chunks::handle_chunks;
pub use index::handle_index;
pub use search::handle_search;
pub use summarize::handle_summarize;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docqa_config::{Config, ErrorFormatter, RetrievalMode};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docqa")]
#[command(about = "Ask questions about a PDF, answered from its most relevant passages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log pipeline progress (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract and split a PDF, then show what the chunks look like
    Chunks {
        pdf: PathBuf,
        /// Number of chunks to preview
        #[arg(long, default_value_t = 1)]
        preview: usize,
    },
    /// Build and save an embedding index for a PDF
    Index {
        pdf: PathBuf,
        /// Where to write the index (defaults to storage.index_dir)
        #[arg(long)]
        index_dir: Option<PathBuf>,
    },
    /// Nearest chunks in a saved index
    Search {
        query: String,
        #[arg(long)]
        index_dir: Option<PathBuf>,
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Answer a question from retrieved context
    Ask(AskArgs),
    /// Summarize a PDF into bullet points
    Summarize {
        pdf: PathBuf,
        /// Overrides the provider's API key variable
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliRetrievalMode {
    Lexical,
    Vector,
}

impl From<CliRetrievalMode> for RetrievalMode {
    fn from(mode: CliRetrievalMode) -> Self {
        match mode {
            CliRetrievalMode::Lexical => RetrievalMode::Lexical,
            CliRetrievalMode::Vector => RetrievalMode::Vector,
        }
    }
}

/// Load from `path` when given, otherwise from the default files in the working directory.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(p) => Config::from_file(p),
        None => Config::load(),
    };
    loaded.map_err(|e| anyhow!("{}", ErrorFormatter::new(e)))
}
