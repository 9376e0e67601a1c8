//! Trait definitions for the Fabulist story orchestrator.
//!
//! Fabulist talks to its two external collaborators through these seams:
//! the generative model behind [`StoryGenerator`] and the history backend
//! behind [`ContinuityStore`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ContinuityStore, StoryGenerator};
