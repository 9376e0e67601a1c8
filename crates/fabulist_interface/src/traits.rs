//! Trait definitions for generators and continuity stores.

use async_trait::async_trait;
use fabulist_core::{AdventureSummary, Prompt, RawCandidate, StoryCandidate, SubjectId};
use fabulist_error::FabulistResult;

/// Opaque producer of story candidates.
///
/// Output is untrusted until the output validator accepts it. Implementations
/// report transient trouble as a retryable `GeneratorError`
/// (`Unavailable`, `Timeout`, throttling HTTP statuses); the repair loop owns
/// the deadline, so implementations need not enforce one themselves.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Produce raw output for a prompt.
    async fn generate(&self, prompt: &Prompt) -> FabulistResult<RawCandidate>;

    /// Provider name (e.g., "anthropic", "replay").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

/// Append-only per-subject history of accepted adventures.
///
/// Appends for one subject are serialized: a `recent` call always observes
/// every `record` that completed before it. Different subjects never
/// contend with each other. A `record` that fails or is cancelled leaves no
/// partial entry behind.
#[async_trait]
pub trait ContinuityStore: Send + Sync {
    /// Append the summary of an accepted candidate and return it with its
    /// assigned sequence number.
    async fn record(
        &self,
        subject_id: &SubjectId,
        candidate: &StoryCandidate,
    ) -> FabulistResult<AdventureSummary>;

    /// The last `n` summaries in the order they were recorded.
    async fn recent(&self, subject_id: &SubjectId, n: usize) -> FabulistResult<Vec<AdventureSummary>>;

    /// Every summary in the order it was recorded.
    async fn history(&self, subject_id: &SubjectId) -> FabulistResult<Vec<AdventureSummary>> {
        self.recent(subject_id, usize::MAX).await
    }
}
