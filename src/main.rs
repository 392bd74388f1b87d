//! DeckFX CLI - offline front end for the effect chain
//!
//! Renders WAV files through the same processor a plugin shell would drive
//! in real time, and prints parameter snapshot templates.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deckfx::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Render {
            input,
            output,
            params,
            block_size,
        } => commands::render(&input, &output, params.as_deref(), block_size)
            .with_context(|| format!("failed to render {}", input.display()))?,
        Commands::Params => commands::params()?,
    }

    Ok(())
}
