//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use fabulist::Framework;
use std::path::PathBuf;

/// Fabulist - personalized, validated picture books
#[derive(Parser, Debug)]
#[command(name = "fabulist")]
#[command(about = "Personalized, validated children's picture books", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a story for each profile
    Generate(GenerateArgs),

    /// Check a saved story against a profile
    Validate(ValidateArgs),

    /// Show a subject's recorded adventures
    History(HistoryArgs),

    /// Write the sample profile (Leo, age 5)
    DemoProfile {
        /// Destination file; stdout when absent
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Arguments for `generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Profile JSON files, written concurrently
    #[arg(long = "profile", required = true, num_args = 1..)]
    pub profiles: Vec<PathBuf>,

    /// Continuity store directory
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Replay recorded responses from this directory instead of calling the API
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Directory for `<subject_id>_story.json` files
    #[arg(long, default_value = "stories")]
    pub output: PathBuf,

    /// Record degraded stories in history as well
    #[arg(long)]
    pub accept_degraded: bool,

    /// Configuration file to use instead of the layered defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `validate`
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Story JSON file (raw generator output is accepted)
    #[arg(long)]
    pub story: PathBuf,

    /// Profile JSON file the story was written for
    #[arg(long)]
    pub profile: PathBuf,

    /// Framework the story was asked to follow; selected from the profile when absent
    #[arg(long)]
    pub framework: Option<Framework>,

    /// Configuration file to use instead of the layered defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `history`
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Continuity store directory
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Subject id
    #[arg(long)]
    pub subject: String,

    /// Maximum number of entries to display, most recent last
    #[arg(long, default_value = "20")]
    pub limit: usize,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
