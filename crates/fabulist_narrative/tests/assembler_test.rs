mod common;

use common::{leo, leo_raw};
use fabulist_config::FabulistConfig;
use fabulist_core::{
    AdventureSummary, Framework, RawProfile, SubjectProfile, Theme, Violation, ViolationCode,
};
use fabulist_narrative::{AttemptFeedback, PromptAssembler};
use fabulist_validation::ProfileValidator;

fn assembler() -> PromptAssembler {
    PromptAssembler::new(&FabulistConfig::default())
}

fn validate(raw: RawProfile) -> SubjectProfile {
    ProfileValidator::new(FabulistConfig::default().profile)
        .validate(raw)
        .unwrap()
}

fn summary(sequence: u64, title: &str, recap: &str) -> AdventureSummary {
    AdventureSummary::new(
        sequence,
        title,
        Framework::Exploration,
        Theme::Curiosity,
        recap,
        vec!["Pip".to_string()],
    )
}

#[test]
fn first_prompt_carries_the_request() {
    let prompt = assembler().build(&leo(), Framework::Builder, None).unwrap();

    assert_eq!(*prompt.attempt(), 1);
    assert_eq!(*prompt.framework(), Framework::Builder);
    assert!(prompt.system().contains("\"character_bible_update\""));
    assert!(prompt.system().contains("Exactly 12 pages"));

    let user = prompt.user();
    assert!(user.contains("\"name\": \"Leo\""));
    assert!(user.contains("Set framework_used to \"builder\""));
    assert!(user.contains("30-50 words on every page"));
    assert!(user.contains("A children's storybook illustration of Leo"));
    assert!(user.contains("Warm watercolor storybook style"));
    assert!(user.contains("teamwork"));
    assert!(!user.contains("CORRECTIONS"));
    assert!(!user.contains("CONTINUITY"));
}

#[test]
fn exclusions_reach_the_generator_only_as_categories() {
    let prompt = assembler().build(&leo(), Framework::Builder, None).unwrap();
    let user = prompt.user().to_lowercase();

    assert!(user.contains("stormy weather and sudden loud noises"));
    assert!(user.contains("creepy-crawly critters"));
    assert!(user.contains("unlit places and nighttime settings"));
    for raw_term in ["thunder", "spider", "alone", "dark"] {
        assert!(!user.contains(raw_term), "prompt leaked '{}'", raw_term);
    }
    assert!(!user.contains("do not mention"));
}

#[test]
fn uncategorized_exclusions_are_named_plainly() {
    let mut raw = leo_raw();
    raw.exclusions = Some(vec!["balloons".to_string(), "spiders".to_string()]);
    let prompt = assembler()
        .build(&validate(raw), Framework::Builder, None)
        .unwrap();

    assert!(prompt.user().contains("Do not mention: balloons."));
    assert!(prompt.user().contains("creepy-crawly critters"));
}

#[test]
fn favorites_touching_an_exclusion_are_left_out() {
    let mut raw = leo_raw();
    raw.favorite_things = Some(
        [
            ("toy".to_string(), "spider puppet".to_string()),
            ("food".to_string(), "pancakes".to_string()),
        ]
        .into_iter()
        .collect(),
    );
    let prompt = assembler()
        .build(&validate(raw), Framework::Builder, None)
        .unwrap();

    assert!(prompt.user().contains("pancakes"));
    assert!(!prompt.user().contains("puppet"));
}

#[test]
fn continuity_uses_recent_clean_history_only() {
    let history = vec![
        summary(1, "Leo and the Lost Kite", "Leo found a kite in a tree."),
        summary(2, "Leo Sails Away", "Leo sailed a tiny boat across the pond."),
        summary(3, "Leo and the Storm Cloud", "Leo hid from a thunderstorm with Pip."),
        summary(4, "Leo Digs Deep", "Leo dug a tunnel in the garden."),
    ];
    let profile = leo().with_history(history);
    let prompt = assembler().build(&profile, Framework::Builder, None).unwrap();
    let user = prompt.user();

    assert!(user.contains("CONTINUITY"));
    // Window of three: the oldest entry falls out.
    assert!(!user.contains("Lost Kite"));
    assert!(user.contains("\"Leo Sails Away\" (exploration, curiosity): Leo sailed a tiny boat across the pond. Friends: Pip."));
    assert!(user.contains("Leo Digs Deep"));
    assert!(!user.contains("Storm Cloud"));
    assert!(!user.to_lowercase().contains("thunder"));
}

#[test]
fn established_look_comes_from_latest_notes() {
    let history = vec![
        summary(1, "Leo Sails Away", "Leo sailed a boat.")
            .with_appearance_notes("red cap and blue overalls"),
        summary(2, "Leo Digs Deep", "Leo dug a tunnel.")
            .with_appearance_notes("green rain boots and a yellow raincoat"),
    ];
    let prompt = assembler()
        .build(&leo().with_history(history), Framework::Builder, None)
        .unwrap();

    assert!(prompt.user().contains("ESTABLISHED LOOK"));
    assert!(prompt.user().contains("green rain boots and a yellow raincoat"));
    assert!(!prompt.user().contains("red cap"));
}

#[test]
fn corrections_name_the_page_but_not_the_topic() {
    let feedback = AttemptFeedback::new(
        1,
        vec![
            Violation::on_page(
                ViolationCode::ExclusionMatch,
                6,
                "page 6 text mentions excluded topic 'loud thunder' via 'thunder'",
            ),
            Violation::on_page(
                ViolationCode::LengthBand,
                4,
                "page 4 used 71 words; target is 30-50",
            ),
        ],
    );
    let prompt = assembler()
        .build(&leo(), Framework::Builder, Some(&feedback))
        .unwrap();
    let user = prompt.user();

    assert_eq!(*prompt.attempt(), 2);
    assert!(user.contains("CORRECTIONS\nAttempt 1 was rejected."));
    assert!(user.contains("- page 6 strays into a topic this reader must never see"));
    assert!(user.contains("- page 4 used 71 words; target is 30-50"));
    assert!(!user.to_lowercase().contains("thunder"));
}

#[test]
fn transient_failures_add_no_corrections() {
    let feedback = AttemptFeedback::new(
        2,
        vec![Violation::new(
            ViolationCode::GeneratorTimeout,
            "no response within 1000ms",
        )],
    );
    let prompt = assembler()
        .build(&leo(), Framework::Builder, Some(&feedback))
        .unwrap();

    assert_eq!(*prompt.attempt(), 3);
    assert!(!prompt.user().contains("CORRECTIONS"));
}

#[test]
fn title_pattern_is_stated_when_configured() {
    let mut config = FabulistConfig::default();
    config.validation.title_pattern = Some("^Leo".to_string());
    let prompt = PromptAssembler::new(&config)
        .build(&leo(), Framework::Builder, None)
        .unwrap();

    assert!(prompt.user().contains("It must match the pattern ^Leo."));
}
