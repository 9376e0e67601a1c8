//! Fabulist writes personalized children's picture books with a generative
//! model and refuses to hand back anything that breaks the book's contract.
//!
//! A request takes a subject profile (name, age, interests, topics to
//! avoid, earlier adventures), picks a narrative framework, prompts the
//! generator, and validates the twelve-page result against structure,
//! reading level, personalization, safety, and exclusion rules. Failed
//! drafts are discarded and regenerated with corrections until one passes
//! or the attempt budget runs out.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fabulist::{
//!     AnthropicClient, FabulistConfig, FileContinuityStore, StoryOrchestrator, demo_profile,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FabulistConfig::load()?;
//!     let generator = Arc::new(AnthropicClient::from_env(config.generator.clone())?);
//!     let store = Arc::new(FileContinuityStore::new("history")?);
//!     let orchestrator = StoryOrchestrator::new(config, generator, store)?;
//!
//!     let outcome = orchestrator.generate(demo_profile()).await?;
//!     println!("{}: {}", outcome.candidate.title, outcome.status);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Fabulist is organized as a workspace with focused crates:
//!
//! - `fabulist_error` - Error types
//! - `fabulist_core` - Profiles, stories, reports, outcomes
//! - `fabulist_interface` - `StoryGenerator` and `ContinuityStore` traits
//! - `fabulist_config` - Layered configuration
//! - `fabulist_validation` - Profile and output validators
//! - `fabulist_storage` - Continuity stores
//! - `fabulist_narrative` - Framework selection, prompts, the repair loop
//! - `fabulist_models` - Anthropic and replay generators
//!
//! This crate (`fabulist`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod demo;
mod logging;
mod story_file;

pub use demo::{demo_profile, demo_profile_json, write_demo_profile};
pub use logging::init_logging;
pub use story_file::{story_path, write_story};

pub use fabulist_config::*;
pub use fabulist_core::*;
pub use fabulist_error::*;
pub use fabulist_interface::*;
pub use fabulist_models::*;
pub use fabulist_narrative::*;
pub use fabulist_storage::*;
pub use fabulist_validation::{
    ExclusionMatcher, OutputValidator, ProfileValidator, SafetyScanner, extract_json, parse_json,
};
