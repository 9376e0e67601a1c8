//! Fabulist CLI binary.
//!
//! - Generate stories for one or more profiles
//! - Validate a saved story against a profile
//! - Inspect a subject's adventure history

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, emit_demo_profile, run_generate, run_history, run_validate};

    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    fabulist::init_logging(cli.verbose, cli.json_logs)?;

    let failures = match cli.command {
        Commands::Generate(args) => run_generate(args).await?,
        Commands::Validate(args) => run_validate(args)?,
        Commands::History(args) => {
            run_history(args).await?;
            0
        }
        Commands::DemoProfile { output } => {
            emit_demo_profile(output.as_deref())?;
            0
        }
    };

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
