//! Core data types for the Fabulist story orchestrator.
//!
//! This crate provides the data model shared by every Fabulist component:
//! subject profiles, narrative frameworks and themes, generated story
//! candidates, validation reports, prompts, and request outcomes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod framework;
mod outcome;
mod profile;
mod prompt;
mod reading_level;
mod report;
mod story;
mod summary;
mod theme;

pub use framework::Framework;
pub use outcome::{AttemptRecord, OutcomeStatus, StoryOutcome};
pub use profile::{RawProfile, SubjectId, SubjectProfile, SubjectProfileBuilder};
pub use prompt::{Prompt, PromptBuilder, RawCandidate};
pub use reading_level::{ReadingLevel, WordBand};
pub use report::{ValidationReport, Violation, ViolationCode};
pub use story::{CharacterBibleUpdate, Page, StoryCandidate, PAGE_COUNT};
pub use summary::AdventureSummary;
pub use theme::Theme;
