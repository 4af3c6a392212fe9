// ABOUTME: CLI argument parsing and command routing for cardforge
//
// Provides command-line interface for:
// - Launching the wizard TUI (tui, default)
// - Splitting a text file into card segments without the TUI (split)
// - Listing the available card templates (templates)

pub mod split;
pub mod templates;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Turn long-form text into styled share-card images
#[derive(Parser)]
#[command(name = "cardforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for commands
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the wizard TUI (default if no command given)
    Tui,

    /// Split a text file into card segments and print them
    Split(SplitArgs),

    /// List available card templates
    Templates,
}

/// Arguments for the split command
#[derive(Parser)]
pub struct SplitArgs {
    /// Path to the text file to split
    pub input: PathBuf,

    /// Maximum characters per segment
    #[arg(long, default_value_t = crate::split::MAX_SEGMENT_LEN)]
    pub max_segment_len: usize,

    /// Maximum number of segments
    #[arg(long, default_value_t = crate::split::MAX_CARDS)]
    pub max_cards: usize,
}
