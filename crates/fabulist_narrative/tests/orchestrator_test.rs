mod common;

use common::{
    ConvergingGenerator, Reply, ScriptedGenerator, leo, leo_raw, test_config, thunder_candidate,
    too_long_candidate, valid_candidate,
};
use fabulist_config::FabulistConfig;
use fabulist_core::{Framework, OutcomeStatus, SubjectId, ViolationCode};
use fabulist_error::{FabulistErrorKind, GeneratorErrorKind};
use fabulist_interface::{ContinuityStore, StoryGenerator};
use fabulist_narrative::StoryOrchestrator;
use fabulist_storage::InMemoryContinuityStore;
use std::sync::Arc;
use std::time::Duration;

fn orchestrator(
    config: FabulistConfig,
    generator: Arc<dyn StoryGenerator>,
) -> (StoryOrchestrator, Arc<InMemoryContinuityStore>) {
    let store = Arc::new(InMemoryContinuityStore::new());
    let orchestrator = StoryOrchestrator::new(config, generator, store.clone()).unwrap();
    (orchestrator, store)
}

fn scripted(replies: Vec<Reply>) -> Arc<ScriptedGenerator> {
    Arc::new(ScriptedGenerator::new(replies))
}

fn leo_id() -> SubjectId {
    leo().subject_id().clone()
}

#[tokio::test]
async fn valid_first_draft_is_accepted_and_recorded() {
    let generator = scripted(vec![Reply::Story(valid_candidate())]);
    let (orchestrator, store) = orchestrator(test_config(), generator.clone());

    let outcome = orchestrator.generate(leo_raw()).await.unwrap();

    assert_eq!(outcome.status, OutcomeStatus::Accepted);
    assert_eq!(outcome.framework, Framework::Builder);
    assert_eq!(outcome.attempts.len(), 1);
    assert!(outcome.residual_violations.is_empty());
    assert_eq!(*outcome.summary.as_ref().unwrap().sequence(), 1);
    assert_eq!(generator.calls(), 1);

    let recorded = store.recent(&leo_id(), 5).await.unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].title(), "Leo and the Dinosaur Builders");
}

#[tokio::test]
async fn repair_converges_when_attempts_cover_the_violations() {
    let max_attempts = test_config().orchestrator.max_attempts as usize;
    for defects in 0..=max_attempts {
        let (orchestrator, store) =
            orchestrator(test_config(), Arc::new(ConvergingGenerator::new(defects)));

        let outcome = orchestrator.generate(leo_raw()).await.unwrap();

        assert_eq!(outcome.status, OutcomeStatus::Accepted, "defects = {}", defects);
        let attempts = defects.max(1);
        assert_eq!(outcome.attempts.len(), attempts);
        for (i, record) in outcome.attempts.iter().enumerate() {
            assert_eq!(record.attempt as usize, i + 1);
            assert_eq!(record.violations.len(), attempts - 1 - i);
            assert!(record.produced_candidate);
        }
        assert_eq!(store.recent(&leo_id(), 5).await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn exhausted_attempts_return_best_candidate_degraded() {
    let max_attempts = test_config().orchestrator.max_attempts as usize;
    let (orchestrator, store) = orchestrator(
        test_config(),
        Arc::new(ConvergingGenerator::new(max_attempts + 1)),
    );

    let outcome = orchestrator.generate(leo_raw()).await.unwrap();

    assert!(outcome.is_degraded());
    assert_eq!(outcome.attempts.len(), max_attempts);
    let counts: Vec<usize> = outcome.attempts.iter().map(|r| r.violations.len()).collect();
    assert_eq!(counts, vec![3, 2, 1]);
    assert_eq!(outcome.residual_violations.len(), 1);
    assert_eq!(outcome.residual_violations[0].code, ViolationCode::ThemeInvalid);
    assert!(outcome.summary.is_none());
    assert!(store.recent(&leo_id(), 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn persistent_length_failures_end_degraded_and_unrecorded() {
    let generator = scripted(vec![Reply::Story(too_long_candidate())]);
    let (orchestrator, store) = orchestrator(test_config(), generator.clone());

    let outcome = orchestrator.generate(leo_raw()).await.unwrap();

    assert_eq!(outcome.status, OutcomeStatus::Degraded);
    assert_eq!(generator.calls(), 3);
    assert_eq!(outcome.attempts.len(), 3);
    assert_eq!(outcome.residual_violations.len(), 1);
    assert_eq!(outcome.residual_violations[0].code, ViolationCode::LengthBand);
    assert_eq!(outcome.residual_violations[0].page_number, Some(4));
    assert!(!outcome.is_recorded());
    assert!(store.recent(&leo_id(), 5).await.unwrap().is_empty());

    // Each retry carries the same correction forward.
    for prompt in &generator.prompts()[1..] {
        assert!(prompt.user().contains("page 4 used"));
    }

    let kept = orchestrator.accept_degraded(outcome).await.unwrap();
    assert_eq!(*kept.summary.as_ref().unwrap().sequence(), 1);
    assert_eq!(store.recent(&leo_id(), 5).await.unwrap().len(), 1);

    // Accepting again does not append a second entry.
    let kept = orchestrator.accept_degraded(kept).await.unwrap();
    assert!(kept.is_recorded());
    assert_eq!(store.recent(&leo_id(), 5).await.unwrap().len(), 1);
}

#[tokio::test]
async fn excluded_topic_is_repaired_without_repeating_it() {
    let generator = scripted(vec![
        Reply::Story(thunder_candidate()),
        Reply::Story(valid_candidate()),
    ]);
    let (orchestrator, _) = orchestrator(test_config(), generator.clone());

    let outcome = orchestrator.generate(leo_raw()).await.unwrap();

    assert_eq!(outcome.status, OutcomeStatus::Accepted);
    assert_eq!(outcome.attempts.len(), 2);
    let first = &outcome.attempts[0];
    assert_eq!(first.violations.len(), 1);
    assert_eq!(first.violations[0].code, ViolationCode::ExclusionMatch);
    assert_eq!(first.violations[0].page_number, Some(6));

    let prompts = generator.prompts();
    assert_eq!(*prompts[1].attempt(), 2);
    let retry = prompts[1].user();
    assert!(retry.contains("page 6"));
    assert!(!retry.to_lowercase().contains("thunder"));
}

#[tokio::test]
async fn unparseable_reply_consumes_an_attempt() {
    let generator = scripted(vec![
        Reply::Text("Once upon a time there was a boy named Leo.".to_string()),
        Reply::Story(valid_candidate()),
    ]);
    let (orchestrator, _) = orchestrator(test_config(), generator.clone());

    let outcome = orchestrator.generate(leo_raw()).await.unwrap();

    assert_eq!(outcome.status, OutcomeStatus::Accepted);
    assert!(!outcome.attempts[0].produced_candidate);
    assert_eq!(outcome.attempts[0].violations[0].code, ViolationCode::SchemaInvalid);
    assert!(generator.prompts()[1].user().contains("not a valid story document"));
}

#[tokio::test(start_paused = true)]
async fn timed_out_attempt_is_recorded_and_retried() {
    let generator = scripted(vec![Reply::Hang, Reply::Story(valid_candidate())]);
    let (orchestrator, _) = orchestrator(test_config(), generator.clone());

    let outcome = orchestrator.generate(leo_raw()).await.unwrap();

    assert_eq!(outcome.status, OutcomeStatus::Accepted);
    assert_eq!(outcome.attempts.len(), 2);
    assert!(!outcome.attempts[0].produced_candidate);
    assert_eq!(outcome.attempts[0].violations[0].code, ViolationCode::GeneratorTimeout);
    assert!(outcome.attempts[1].passed());
}

#[tokio::test(start_paused = true)]
async fn generator_that_never_answers_is_unavailable() {
    let generator = scripted(vec![Reply::Hang]);
    let (orchestrator, store) = orchestrator(test_config(), generator.clone());

    let err = orchestrator.generate(leo_raw()).await.unwrap_err();

    assert!(matches!(
        err.generator_kind(),
        Some(GeneratorErrorKind::Unavailable(_))
    ));
    assert_eq!(generator.calls(), 3);
    assert!(store.recent(&leo_id(), 5).await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn wall_clock_budget_bounds_the_request() {
    let mut config = test_config();
    config.orchestrator.max_attempts = 5;
    config.orchestrator.wall_clock_budget_ms = 1_500;
    let generator = scripted(vec![Reply::Hang]);
    let (orchestrator, _) = orchestrator(config, generator.clone());

    let started = tokio::time::Instant::now();
    let err = orchestrator.generate(leo_raw()).await.unwrap_err();

    assert!(started.elapsed() <= Duration::from_millis(1_500));
    assert_eq!(generator.calls(), 2);
    assert!(matches!(
        err.generator_kind(),
        Some(GeneratorErrorKind::Unavailable(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn transient_http_failure_is_retried() {
    let generator = scripted(vec![
        Reply::Fail(GeneratorErrorKind::Http {
            status: 529,
            message: "overloaded".to_string(),
        }),
        Reply::Story(valid_candidate()),
    ]);
    let (orchestrator, _) = orchestrator(test_config(), generator.clone());

    let outcome = orchestrator.generate(leo_raw()).await.unwrap();

    assert_eq!(outcome.status, OutcomeStatus::Accepted);
    assert_eq!(
        outcome.attempts[0].violations[0].code,
        ViolationCode::GeneratorUnavailable
    );
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn permanent_generator_failure_surfaces_immediately() {
    let generator = scripted(vec![Reply::Fail(GeneratorErrorKind::MissingApiKey)]);
    let (orchestrator, _) = orchestrator(test_config(), generator.clone());

    let err = orchestrator.generate(leo_raw()).await.unwrap_err();

    assert_eq!(err.generator_kind(), Some(&GeneratorErrorKind::MissingApiKey));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn invalid_profile_never_reaches_the_generator() {
    let generator = scripted(vec![Reply::Story(valid_candidate())]);
    let (orchestrator, _) = orchestrator(test_config(), generator.clone());
    let mut raw = leo_raw();
    raw.age = Some(42);

    let err = orchestrator.generate(raw).await.unwrap_err();

    assert!(matches!(err.kind(), FabulistErrorKind::Profile(_)));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn stored_history_feeds_the_next_story() {
    let generator = scripted(vec![Reply::Story(valid_candidate())]);
    let (orchestrator, store) = orchestrator(test_config(), generator.clone());

    orchestrator.generate(leo_raw()).await.unwrap();
    let second = orchestrator.generate(leo_raw()).await.unwrap();

    assert_eq!(*second.summary.as_ref().unwrap().sequence(), 2);
    let prompts = generator.prompts();
    assert!(!prompts[0].user().contains("CONTINUITY"));
    assert!(prompts[1].user().contains("CONTINUITY"));
    assert!(prompts[1].user().contains("\"Leo and the Dinosaur Builders\" (builder, teamwork)"));
    assert_eq!(store.recent(&leo_id(), 5).await.unwrap().len(), 2);
}
