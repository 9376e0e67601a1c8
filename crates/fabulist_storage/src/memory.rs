//! Process-local continuity store.

use async_trait::async_trait;
use dashmap::DashMap;
use fabulist_core::{AdventureSummary, StoryCandidate, SubjectId};
use fabulist_error::FabulistResult;
use fabulist_interface::ContinuityStore;
use std::sync::Arc;
use tokio::sync::Mutex;

type SubjectLog = Arc<Mutex<Vec<AdventureSummary>>>;

/// Keeps each subject's history in memory behind its own async mutex.
///
/// The map only hands out the per-subject log; no map guard is held across
/// an await.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContinuityStore {
    logs: Arc<DashMap<SubjectId, SubjectLog>>,
}

impl InMemoryContinuityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, subject_id: &SubjectId) -> SubjectLog {
        self.logs.entry(subject_id.clone()).or_default().clone()
    }

    fn existing_log(&self, subject_id: &SubjectId) -> Option<SubjectLog> {
        self.logs.get(subject_id).map(|log| log.value().clone())
    }

    /// Number of subjects the store holds a log for.
    pub fn subject_count(&self) -> usize {
        self.logs.len()
    }
}

#[async_trait]
impl ContinuityStore for InMemoryContinuityStore {
    #[tracing::instrument(skip_all, fields(subject_id = %subject_id))]
    async fn record(
        &self,
        subject_id: &SubjectId,
        candidate: &StoryCandidate,
    ) -> FabulistResult<AdventureSummary> {
        let log = self.log(subject_id);
        let mut entries = log.lock().await;
        let summary = AdventureSummary::from_candidate(entries.len() as u64 + 1, candidate)?;
        entries.push(summary.clone());
        tracing::debug!(sequence = summary.sequence(), "Recorded adventure");
        Ok(summary)
    }

    async fn recent(&self, subject_id: &SubjectId, n: usize) -> FabulistResult<Vec<AdventureSummary>> {
        let Some(log) = self.existing_log(subject_id) else {
            return Ok(Vec::new());
        };
        let entries = log.lock().await;
        let start = entries.len().saturating_sub(n);
        Ok(entries[start..].to_vec())
    }
}
