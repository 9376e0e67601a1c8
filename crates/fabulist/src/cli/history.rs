//! `history` command handler.

use super::commands::{HistoryArgs, OutputFormat};
use super::default_store_dir;
use fabulist::{ContinuityStore, FabulistResult, FileContinuityStore, JsonError, SubjectId};

/// Print a subject's most recent adventures, oldest first.
pub async fn run_history(args: HistoryArgs) -> FabulistResult<()> {
    let store = FileContinuityStore::new(args.store.clone().unwrap_or_else(default_store_dir))?;
    let subject_id = SubjectId::parse(&args.subject)?;
    let entries = store.recent(&subject_id, args.limit).await?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No adventures recorded for '{}'", subject_id);
                return Ok(());
            }
            println!("Adventures for '{}':", subject_id);
            println!("{:-<80}", "");
            for entry in &entries {
                println!(
                    "#{} {} [{}, {}] {}",
                    entry.sequence(),
                    entry.title(),
                    entry.framework(),
                    entry.theme(),
                    entry.recorded_at().format("%Y-%m-%d")
                );
                println!("    {}", entry.recap());
                if !entry.characters().is_empty() {
                    let friends: Vec<&str> = entry.characters().iter().map(String::as_str).collect();
                    println!("    friends: {}", friends.join(", "));
                }
            }
            println!("{:-<80}", "");
            println!("Showing {} entries", entries.len());
        }
    }
    Ok(())
}
