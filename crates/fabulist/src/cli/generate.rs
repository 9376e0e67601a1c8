//! `generate` and `demo-profile` command handlers.

use super::commands::GenerateArgs;
use super::{default_store_dir, load_config, read_profile};
use fabulist::{
    AnthropicClient, FabulistResult, FileContinuityStore, ReplayGenerator, StoryGenerator,
    StoryOrchestrator, StoryOutcome, demo_profile_json, write_demo_profile, write_story,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Write a story for every profile, concurrently.
///
/// Returns how many profiles failed outright. Degraded stories are written
/// and reported but only count as failures when they could not be saved.
pub async fn run_generate(args: GenerateArgs) -> FabulistResult<usize> {
    let config = load_config(args.config.as_deref())?;
    let generator: Arc<dyn StoryGenerator> = match &args.replay {
        Some(dir) => Arc::new(ReplayGenerator::from_dir(dir)?),
        None => Arc::new(AnthropicClient::from_env(config.generator.clone())?),
    };
    let store_dir = args.store.clone().unwrap_or_else(default_store_dir);
    let store = Arc::new(FileContinuityStore::new(store_dir)?);
    let orchestrator = StoryOrchestrator::new(config, generator, store)?;

    tracing::info!(profiles = args.profiles.len(), "Generating stories");

    let requests = args
        .profiles
        .iter()
        .map(|path| generate_one(&orchestrator, path, args.accept_degraded, &args.output));
    let results = futures::future::join_all(requests).await;

    let mut failures = 0;
    for (path, result) in args.profiles.iter().zip(results) {
        match result {
            Ok((outcome, story_path)) => print_outcome(&outcome, &story_path),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }
    Ok(failures)
}

async fn generate_one(
    orchestrator: &StoryOrchestrator,
    profile_path: &Path,
    accept_degraded: bool,
    output: &Path,
) -> FabulistResult<(StoryOutcome, PathBuf)> {
    let raw = read_profile(profile_path)?;
    let mut outcome = orchestrator.generate(raw).await?;
    if outcome.is_degraded() && accept_degraded {
        outcome = orchestrator.accept_degraded(outcome).await?;
    }
    let path = write_story(output, &outcome)?;
    Ok((outcome, path))
}

fn print_outcome(outcome: &StoryOutcome, path: &Path) {
    println!(
        "{}: {} \"{}\" ({}) after {} attempt(s) -> {}",
        outcome.subject_id,
        outcome.status,
        outcome.candidate.title,
        outcome.framework,
        outcome.attempts.len(),
        path.display()
    );
    for violation in &outcome.residual_violations {
        println!("    {}", violation);
    }
    match &outcome.summary {
        Some(summary) => println!("    recorded as adventure #{}", summary.sequence()),
        None => println!("    not recorded in history (use --accept-degraded to keep it)"),
    }
}

/// Write the sample profile to `output`, or stdout.
pub fn emit_demo_profile(output: Option<&Path>) -> FabulistResult<()> {
    match output {
        Some(path) => {
            write_demo_profile(path)?;
            println!("Wrote sample profile to {}", path.display());
        }
        None => println!("{}", demo_profile_json()?),
    }
    Ok(())
}
