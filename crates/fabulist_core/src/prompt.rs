//! The instruction payload sent to the generator and what comes back.

use crate::Framework;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Instructions for one generation attempt.
///
/// # Examples
///
/// ```
/// use fabulist_core::{Framework, Prompt};
///
/// let prompt = Prompt::builder()
///     .system("You write picture books.")
///     .user("Write about Leo.")
///     .attempt(1u32)
///     .framework(Framework::Builder)
///     .build()
///     .unwrap();
///
/// assert_eq!(*prompt.attempt(), 1);
/// assert!(prompt.user().contains("Leo"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct Prompt {
    /// Fixed rules: structure, calibration, tone, safety, schema
    system: String,
    /// Request-specific content: subject, framework, continuity, feedback
    user: String,
    /// 1-based attempt number this prompt belongs to
    attempt: u32,
    /// Framework the story must follow
    framework: Framework,
}

impl Prompt {
    /// Start building a prompt.
    pub fn builder() -> PromptBuilder {
        PromptBuilder::default()
    }
}

/// Untrusted text returned by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From, derive_more::Display)]
pub struct RawCandidate(String);

impl RawCandidate {
    /// Wrap generator output.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
