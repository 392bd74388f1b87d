//! CLI Module
//!
//! Command-line interface for offline rendering through the DeckFX chain.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DeckFX - DJ-style audio effects processor
#[derive(Parser, Debug)]
#[command(name = "deckfx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a WAV file through the effect chain
    Render {
        /// Input WAV file (mono or stereo)
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file (16-bit PCM)
        #[arg(short, long)]
        output: PathBuf,

        /// Parameter snapshot JSON (defaults when omitted; see `params`)
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Samples per processing block
        #[arg(long, default_value_t = 512)]
        block_size: usize,
    },

    /// Print the default parameter snapshot as a JSON template
    Params,
}
