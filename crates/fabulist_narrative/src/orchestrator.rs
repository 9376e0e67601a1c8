//! The end-to-end story request.

use crate::{FrameworkSelector, PromptAssembler, RepairLoop, TieBreak};
use fabulist_config::FabulistConfig;
use fabulist_core::{RawProfile, StoryOutcome, SubjectProfile};
use fabulist_error::FabulistResult;
use fabulist_interface::{ContinuityStore, StoryGenerator};
use fabulist_validation::{OutputValidator, ProfileValidator};
use std::sync::Arc;

/// Validates a profile, writes a story for it, and keeps its history.
///
/// Only accepted stories are recorded automatically. A degraded outcome is
/// returned to the caller unrecorded; [`StoryOrchestrator::accept_degraded`]
/// records it when the caller decides to keep it anyway.
#[derive(Clone)]
pub struct StoryOrchestrator {
    profiles: ProfileValidator,
    selector: FrameworkSelector,
    repair: RepairLoop,
    store: Arc<dyn ContinuityStore>,
}

impl std::fmt::Debug for StoryOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryOrchestrator")
            .field("selector", &self.selector)
            .field("repair", &self.repair)
            .finish_non_exhaustive()
    }
}

impl StoryOrchestrator {
    /// Wire an orchestrator from configuration and its two collaborators.
    ///
    /// # Errors
    ///
    /// Fails when the validation rules in `config` are unusable.
    pub fn new(
        config: FabulistConfig,
        generator: Arc<dyn StoryGenerator>,
        store: Arc<dyn ContinuityStore>,
    ) -> FabulistResult<Self> {
        let validator = OutputValidator::new(&config)?;
        let assembler = PromptAssembler::new(&config);
        Ok(Self {
            profiles: ProfileValidator::new(config.profile.clone())
                .with_lexicon(&config.lexicon, config.validation.min_substring_stem_len),
            selector: FrameworkSelector::default(),
            repair: RepairLoop::new(generator, assembler, validator, config.orchestrator),
            store,
        })
    }

    /// Replace the final framework tie breaker.
    pub fn with_tie_break(mut self, tie_break: impl TieBreak + 'static) -> Self {
        self.selector = FrameworkSelector::new(tie_break);
        self
    }

    /// The output validator stories are checked with.
    pub fn validator(&self) -> &OutputValidator {
        self.repair.validator()
    }

    /// Validate a raw profile and write a story for it.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` for an invalid profile, a `GeneratorError` when
    /// the generator fails permanently or never produces a candidate, and a
    /// `StorageError` when history cannot be read or written.
    pub async fn generate(&self, raw: RawProfile) -> FabulistResult<StoryOutcome> {
        let profile = self.profiles.validate(raw)?;
        self.generate_for(profile).await
    }

    /// Write a story for an already validated profile.
    ///
    /// Stored history replaces the profile's own whenever the store has any
    /// for this subject.
    #[tracing::instrument(skip_all, fields(subject_id = %profile.subject_id()))]
    pub async fn generate_for(&self, profile: SubjectProfile) -> FabulistResult<StoryOutcome> {
        let stored = self.store.history(profile.subject_id()).await?;
        let profile = if stored.is_empty() {
            profile
        } else {
            tracing::debug!(entries = stored.len(), "Using stored history");
            profile.with_history(stored)
        };

        let framework = self.selector.select(&profile);
        let mut outcome = self.repair.run(&profile, framework).await?;

        if !outcome.is_degraded() {
            let summary = self
                .store
                .record(profile.subject_id(), &outcome.candidate)
                .await?;
            tracing::info!(sequence = summary.sequence(), "Story recorded");
            outcome.summary = Some(summary);
        } else {
            tracing::warn!(
                residual = outcome.residual_violations.len(),
                "Degraded story returned unrecorded"
            );
        }
        Ok(outcome)
    }

    /// Record a degraded story the caller chose to keep.
    ///
    /// Recording an outcome that already has a summary is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the append fails, or `StoryError` when
    /// the candidate's framework or theme cannot enter history.
    #[tracing::instrument(skip_all, fields(subject_id = %outcome.subject_id))]
    pub async fn accept_degraded(&self, mut outcome: StoryOutcome) -> FabulistResult<StoryOutcome> {
        if outcome.is_recorded() {
            return Ok(outcome);
        }
        let summary = self
            .store
            .record(&outcome.subject_id, &outcome.candidate)
            .await?;
        tracing::info!(
            sequence = summary.sequence(),
            residual = outcome.residual_violations.len(),
            "Degraded story accepted into history"
        );
        outcome.summary = Some(summary);
        Ok(outcome)
    }
}
