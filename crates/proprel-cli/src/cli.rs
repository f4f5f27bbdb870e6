//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Proprel CLI - Check property combinations against a relationship corpus.
#[derive(Debug, Parser)]
#[command(name = "proprel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Tables and messages (default)
    Text,
    /// The JSON response envelope
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load and index a corpus, then print its figures
    Check(CheckArgs),

    /// Validate an assignment and suggest improvements
    Validate(ValidateArgs),

    /// Rank values for one property
    Recommend(RecommendArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Corpus file or directory
    pub corpus: PathBuf,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Corpus file or directory
    #[arg(long, env = "PROPREL_CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Material type whose rules apply
    #[arg(short, long)]
    pub material: String,

    /// Assigned values (format: property=value)
    pub properties: Vec<String>,
}

/// Arguments for the recommend command.
#[derive(Debug, Parser)]
pub struct RecommendArgs {
    /// Corpus file or directory
    #[arg(long, env = "PROPREL_CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Material type whose rules apply
    #[arg(short, long)]
    pub material: String,

    /// Property to rank values for
    #[arg(short, long)]
    pub target: String,

    /// Assigned values (format: property=value)
    pub properties: Vec<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
