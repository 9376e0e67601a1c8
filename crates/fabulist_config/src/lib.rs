//! Layered configuration for the Fabulist story orchestrator.
//!
//! Sources, later overriding earlier:
//! 1. Code defaults (every field has one)
//! 2. Bundled `fabulist.toml`
//! 3. `~/.config/fabulist/fabulist.toml`
//! 4. `./fabulist.toml`
//! 5. `FABULIST__SECTION__KEY` environment variables
//!
//! The lexicon tables merge key by key with the curated defaults, so a user
//! file only needs the entries it adds or replaces.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod lexicon;
mod sections;

pub use config::FabulistConfig;
pub use lexicon::LexiconConfig;
pub use sections::{GeneratorConfig, OrchestratorConfig, ProfileConfig, ValidationConfig};
