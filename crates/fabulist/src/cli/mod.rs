//! Command-line interface module.

mod commands;
mod generate;
mod history;
mod validate;

pub use commands::{Cli, Commands};
pub use generate::{emit_demo_profile, run_generate};
pub use history::run_history;
pub use validate::run_validate;

use fabulist::{FabulistConfig, FabulistResult, JsonError, RawProfile};
use std::path::Path;

fn load_config(path: Option<&Path>) -> FabulistResult<FabulistConfig> {
    match path {
        Some(path) => FabulistConfig::from_file(path),
        None => FabulistConfig::load(),
    }
}

fn read_profile(path: &Path) -> FabulistResult<RawProfile> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| JsonError::new(format!("{}: {}", path.display(), e)))?;
    let profile = serde_json::from_str(&text)
        .map_err(|e| JsonError::new(format!("{}: {}", path.display(), e)))?;
    Ok(profile)
}

fn default_store_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("fabulist")
        .join("history")
}
