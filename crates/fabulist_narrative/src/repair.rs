//! Generate, validate, repair.

use crate::{AttemptFeedback, PromptAssembler};
use fabulist_config::OrchestratorConfig;
use fabulist_core::{
    AttemptRecord, Framework, OutcomeStatus, StoryCandidate, StoryOutcome, SubjectProfile,
    Violation, ViolationCode,
};
use fabulist_error::{FabulistResult, GeneratorError, GeneratorErrorKind};
use fabulist_interface::StoryGenerator;
use fabulist_validation::OutputValidator;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};

/// Where a request is in the repair loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RepairState {
    /// Building the prompt and waiting on the generator
    Drafting,
    /// Checking the returned candidate
    Validating,
    /// A candidate passed every check
    Accepted,
    /// Carrying violations into the next attempt
    Repairing,
    /// Out of attempts or wall-clock budget
    Exhausted,
}

/// Runs attempts until a candidate is accepted or the budget is spent.
///
/// Every generator call gets the smaller of the per-call timeout and the
/// remaining wall-clock budget. A timeout or retryable generator failure is
/// recorded against the attempt and backed off with jittered exponential
/// delays; any other generator error ends the request at once. A failed
/// candidate is discarded, never patched, and its violations become the
/// corrections in the next prompt.
///
/// When attempts run out, the best candidate seen (fewest violations,
/// earliest on a tie) is returned as degraded. If no attempt produced a
/// candidate at all the request fails with `GeneratorError::Unavailable`.
#[derive(Clone)]
pub struct RepairLoop {
    generator: Arc<dyn StoryGenerator>,
    assembler: PromptAssembler,
    validator: OutputValidator,
    config: OrchestratorConfig,
}

impl std::fmt::Debug for RepairLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepairLoop")
            .field("provider", &self.generator.provider_name())
            .field("model", &self.generator.model_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

struct Best {
    attempt: u32,
    candidate: StoryCandidate,
    violations: Vec<Violation>,
}

impl RepairLoop {
    /// Create a repair loop.
    pub fn new(
        generator: Arc<dyn StoryGenerator>,
        assembler: PromptAssembler,
        validator: OutputValidator,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            generator,
            assembler,
            validator,
            config,
        }
    }

    /// The validator candidates are checked with.
    pub fn validator(&self) -> &OutputValidator {
        &self.validator
    }

    /// Run the loop for one request.
    ///
    /// # Errors
    ///
    /// Returns the generator's error when it is not retryable, a
    /// `GeneratorError` with `Unavailable` when no attempt produced a
    /// candidate, or a prompt assembly error.
    #[tracing::instrument(
        skip_all,
        fields(
            subject_id = %profile.subject_id(),
            %framework,
            provider = self.generator.provider_name(),
            max_attempts = self.config.max_attempts
        )
    )]
    pub async fn run(
        &self,
        profile: &SubjectProfile,
        framework: Framework,
    ) -> FabulistResult<StoryOutcome> {
        let started = Instant::now();
        let budget = self.config.wall_clock_budget();
        let mut backoff = ExponentialBackoff::from_millis(self.config.backoff_initial_ms.max(1))
            .factor(2)
            .max_delay(Duration::from_millis(self.config.backoff_max_ms))
            .map(jitter);

        let mut records: Vec<AttemptRecord> = Vec::new();
        let mut best: Option<Best> = None;
        let mut feedback: Option<AttemptFeedback> = None;

        for attempt in 1..=self.config.max_attempts {
            let remaining = budget.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                tracing::warn!(attempt, "Wall-clock budget spent before attempt");
                break;
            }

            tracing::debug!(attempt, state = %RepairState::Drafting, "Drafting");
            let prompt = self
                .assembler
                .build_attempt(profile, framework, attempt, feedback.as_ref())?;
            let call_timeout = self.config.generator_timeout().min(remaining);

            let raw = match tokio::time::timeout(call_timeout, self.generator.generate(&prompt)).await {
                Ok(Ok(raw)) => raw,
                Ok(Err(e)) if e.is_retryable() => {
                    tracing::warn!(attempt, error = %e, "Generator failed transiently");
                    let code = match e.generator_kind() {
                        Some(GeneratorErrorKind::Timeout { .. }) => ViolationCode::GeneratorTimeout,
                        _ => ViolationCode::GeneratorUnavailable,
                    };
                    records.push(transient(attempt, Violation::new(code, e.to_string())));
                    self.back_off(&mut backoff, started, budget, attempt).await;
                    continue;
                }
                Ok(Err(e)) => {
                    tracing::error!(attempt, error = %e, "Generator failed permanently");
                    return Err(e);
                }
                Err(_) => {
                    tracing::warn!(
                        attempt,
                        timeout_ms = call_timeout.as_millis() as u64,
                        "Generator call timed out"
                    );
                    let violation = Violation::new(
                        ViolationCode::GeneratorTimeout,
                        format!("no response within {}ms", call_timeout.as_millis()),
                    );
                    records.push(transient(attempt, violation));
                    self.back_off(&mut backoff, started, budget, attempt).await;
                    continue;
                }
            };

            tracing::debug!(attempt, state = %RepairState::Validating, "Validating");
            let (candidate, report) = self.validator.validate_raw(&raw, profile, framework);
            records.push(AttemptRecord {
                attempt,
                violations: report.violations().to_vec(),
                produced_candidate: candidate.is_some(),
            });

            if let Some(candidate) = candidate {
                if report.pass() {
                    tracing::info!(attempt, state = %RepairState::Accepted, "Candidate accepted");
                    return Ok(StoryOutcome {
                        subject_id: profile.subject_id().clone(),
                        status: OutcomeStatus::Accepted,
                        framework,
                        candidate,
                        residual_violations: Vec::new(),
                        attempts: records,
                        summary: None,
                    });
                }
                let improves = best
                    .as_ref()
                    .is_none_or(|best| report.violations().len() < best.violations.len());
                if improves {
                    best = Some(Best {
                        attempt,
                        candidate,
                        violations: report.violations().to_vec(),
                    });
                }
            }

            tracing::info!(
                attempt,
                state = %RepairState::Repairing,
                violations = report.violations().len(),
                "Candidate rejected"
            );
            feedback = Some(AttemptFeedback::new(attempt, report.into_violations()));
        }

        tracing::warn!(
            state = %RepairState::Exhausted,
            attempts = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Attempts exhausted"
        );

        match best {
            Some(best) => {
                tracing::warn!(
                    best_attempt = best.attempt,
                    residual = best.violations.len(),
                    "Returning degraded candidate"
                );
                Ok(StoryOutcome {
                    subject_id: profile.subject_id().clone(),
                    status: OutcomeStatus::Degraded,
                    framework,
                    candidate: best.candidate,
                    residual_violations: best.violations,
                    attempts: records,
                    summary: None,
                })
            }
            None => Err(GeneratorError::new(GeneratorErrorKind::Unavailable(format!(
                "no candidate produced in {} attempts",
                records.len()
            )))
            .into()),
        }
    }

    /// Sleep before the next attempt, never past the wall-clock budget and
    /// never after the last attempt.
    async fn back_off(
        &self,
        backoff: &mut impl Iterator<Item = Duration>,
        started: Instant,
        budget: Duration,
        attempt: u32,
    ) {
        if attempt >= self.config.max_attempts {
            return;
        }
        let remaining = budget.saturating_sub(started.elapsed());
        let delay = backoff
            .next()
            .unwrap_or(Duration::from_millis(self.config.backoff_max_ms))
            .min(remaining);
        tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "Backing off");
        tokio::time::sleep(delay).await;
    }
}

fn transient(attempt: u32, violation: Violation) -> AttemptRecord {
    AttemptRecord {
        attempt,
        violations: vec![violation],
        produced_candidate: false,
    }
}
