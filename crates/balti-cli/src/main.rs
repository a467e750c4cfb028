//! Balti CLI - Command-line front end for the Balti dictionary
//!
//! Autocomplete, filtered search, saved searches and word-by-word
//! translation from the terminal.

mod cli;
mod commands;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::{open_backend, resolve_config, GlobalArgs};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::filters::run_filters;
use crate::commands::presets::run_presets;
use crate::commands::search::run_search;
use crate::commands::suggest::run_suggest;
use crate::commands::translate::run_translate;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "warn,balti=info,balti_core=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let args = GlobalArgs {
        config_path: cli.config.as_deref(),
        api_url: cli.api_url.clone(),
        user: cli.user.clone(),
        words_file: cli.words_file.as_deref(),
    };

    match cli.command {
        Commands::Suggest { query, json } => {
            let backend = open_backend(&args)?;
            run_suggest(&query, json, &backend).await?;
        }
        Commands::Search {
            query,
            filters,
            fuzzy,
            limit,
            json,
        } => {
            let backend = open_backend(&args)?;
            run_search(&query, &filters, fuzzy, limit, json, &backend).await?;
        }
        Commands::Translate {
            text,
            direction,
            matches,
            json,
        } => {
            let backend = open_backend(&args)?;
            run_translate(&text, direction.into(), matches, json, &backend).await?;
        }
        Commands::Filters { json } => {
            let config = resolve_config(&args)?;
            run_filters(&config.filter_options, json)?;
        }
        Commands::Presets { command } => {
            let backend = open_backend(&args)?;
            run_presets(command, &backend).await?;
        }
        Commands::Config { command } => run_config(&command, &args)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
