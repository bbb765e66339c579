mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{
    handle_ask, handle_chunks, handle_index, handle_search, handle_summarize, load_config, Cli,
    Commands,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Chunks { pdf, preview } => handle_chunks(&pdf, preview, &config)?,
        Commands::Index { pdf, index_dir } => handle_index(&pdf, index_dir, &config)?,
        Commands::Search {
            query,
            index_dir,
            top_k,
        } => handle_search(&query, index_dir, top_k, &config)?,
        Commands::Ask(args) => handle_ask(args, &config)?,
        Commands::Summarize { pdf, api_key } => handle_summarize(&pdf, api_key.as_deref(), &config)?,
    }

    Ok(())
}
