use fabulist_core::{Framework, Prompt};
use fabulist_error::GeneratorErrorKind;
use fabulist_interface::StoryGenerator;
use fabulist_models::ReplayGenerator;

fn prompt() -> Prompt {
    Prompt::builder()
        .system("rules")
        .user("story")
        .attempt(1u32)
        .framework(Framework::Mystery)
        .build()
        .unwrap()
}

#[tokio::test]
async fn replays_files_in_name_order_then_repeats_last() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("02_fixed.json"), "second").unwrap();
    std::fs::write(dir.path().join("01_draft.json"), "first").unwrap();
    std::fs::create_dir(dir.path().join("00_nested")).unwrap();

    let replay = ReplayGenerator::from_dir(dir.path()).unwrap();
    assert_eq!(replay.len(), 2);
    assert_eq!(replay.provider_name(), "replay");

    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(replay.generate(&prompt()).await.unwrap().as_str().to_string());
    }
    assert_eq!(seen, ["first", "second", "second", "second"]);
}

#[test]
fn empty_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReplayGenerator::from_dir(dir.path()).unwrap_err();
    assert!(matches!(
        err.generator_kind(),
        Some(GeneratorErrorKind::Rejected(_))
    ));
}

#[test]
fn missing_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReplayGenerator::from_dir(dir.path().join("absent")).unwrap_err();
    assert!(!err.is_retryable());
}
