//! What a story request returns to its caller.

use crate::{AdventureSummary, Framework, StoryCandidate, SubjectId, Violation};
use serde::{Deserialize, Serialize};

/// Whether the returned candidate met the whole contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutcomeStatus {
    /// Every check passed
    Accepted,
    /// Attempts ran out; the best candidate is returned with its residual violations
    Degraded,
}

/// Audit entry for one generation attempt.
///
/// Kept for every attempt, including discarded ones, so that a later success
/// never hides what earlier attempts got wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt number
    pub attempt: u32,
    /// Violations found, or the transient failure recorded as one
    pub violations: Vec<Violation>,
    /// Whether a candidate was produced at all
    pub produced_candidate: bool,
}

impl AttemptRecord {
    /// Whether this attempt passed validation.
    pub fn passed(&self) -> bool {
        self.produced_candidate && self.violations.is_empty()
    }
}

/// Result of a story request.
///
/// A degraded outcome is never silent: `status` says so and
/// `residual_violations` lists what is still wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOutcome {
    /// Subject the story was written for
    pub subject_id: SubjectId,
    /// Accepted or degraded
    pub status: OutcomeStatus,
    /// Framework that was requested
    pub framework: Framework,
    /// The returned story
    pub candidate: StoryCandidate,
    /// Violations the returned story still has (empty when accepted)
    pub residual_violations: Vec<Violation>,
    /// Every attempt in order
    pub attempts: Vec<AttemptRecord>,
    /// History entry, present once the story has been recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<AdventureSummary>,
}

impl StoryOutcome {
    /// Whether the story is degraded.
    pub fn is_degraded(&self) -> bool {
        self.status == OutcomeStatus::Degraded
    }

    /// Whether the story has been recorded in the subject's history.
    pub fn is_recorded(&self) -> bool {
        self.summary.is_some()
    }
}
