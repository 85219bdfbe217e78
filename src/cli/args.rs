//! Command line argument parsing for the mistranslate CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::injection::config::{DEFAULT_ERROR_PROBABILITY, InjectorConfig};

/// mistranslate - inject plausible interpreter errors into medical dialogue
#[derive(Parser, Debug, Clone)]
#[command(name = "mistranslate")]
#[command(about = "Inject plausible interpreter mistranslations into medical dialogue")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct MistranslateArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Probability (0.0-1.0) that each candidate is modified
    #[arg(short, long, default_value_t = DEFAULT_ERROR_PROBABILITY)]
    pub probability: f64,

    /// Seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// JSON file with table additions/overrides
    #[arg(short, long, value_name = "TABLES_FILE")]
    pub tables: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl MistranslateArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Injector configuration derived from the global flags.
    ///
    /// The seed is applied per call, not at construction.
    pub fn injector_config(&self) -> InjectorConfig {
        InjectorConfig::new(self.probability)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Inject errors into a single text
    Text(TextArgs),

    /// Inject errors into a JSON conversation file
    Conversation(ConversationArgs),

    /// List candidate matches without applying them
    Candidates(CandidatesArgs),
}

/// Arguments for single-text injection
#[derive(Parser, Debug, Clone)]
pub struct TextArgs {
    /// Text to perturb
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for conversation injection
#[derive(Parser, Debug, Clone)]
pub struct ConversationArgs {
    /// Conversation file: a JSON array of {"speaker": ..., "text": ...}
    #[arg(value_name = "CONVERSATION_FILE")]
    pub conversation_file: PathBuf,

    /// Print only the modified conversation, not the original
    #[arg(long)]
    pub modified_only: bool,
}

/// Arguments for listing candidates
#[derive(Parser, Debug, Clone)]
pub struct CandidatesArgs {
    /// Text to scan
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
