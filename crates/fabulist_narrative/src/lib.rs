//! Story orchestration for Fabulist.
//!
//! This crate turns a validated subject profile into a released story:
//!
//! - [`FrameworkSelector`] picks the narrative archetype from the subject's
//!   interests and history.
//! - [`PromptAssembler`] builds the generator prompt, including corrective
//!   feedback after a failed attempt.
//! - [`RepairLoop`] runs generate, validate, and repair until a candidate is
//!   accepted or the attempt budget runs out.
//! - [`StoryOrchestrator`] ties these to profile validation and the
//!   continuity store.
//!
//! # Example
//!
//! ```rust,ignore
//! use fabulist_config::FabulistConfig;
//! use fabulist_narrative::StoryOrchestrator;
//! use std::sync::Arc;
//!
//! # async fn example(generator: Arc<dyn fabulist_interface::StoryGenerator>,
//! #                  store: Arc<dyn fabulist_interface::ContinuityStore>,
//! #                  raw: fabulist_core::RawProfile) -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = StoryOrchestrator::new(FabulistConfig::load()?, generator, store)?;
//! let outcome = orchestrator.generate(raw).await?;
//! println!("{} ({})", outcome.candidate.title, outcome.status);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod feedback;
mod orchestrator;
mod repair;
mod selector;

pub use assembler::PromptAssembler;
pub use feedback::AttemptFeedback;
pub use orchestrator::StoryOrchestrator;
pub use repair::{RepairLoop, RepairState};
pub use selector::{FrameworkSelector, PriorityTieBreak, TieBreak};
