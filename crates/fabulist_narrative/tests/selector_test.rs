mod common;

use common::leo;
use fabulist_config::ProfileConfig;
use fabulist_core::{AdventureSummary, Framework, RawProfile, SubjectProfile, Theme};
use fabulist_narrative::{FrameworkSelector, TieBreak};
use fabulist_validation::ProfileValidator;

fn profile(interests: &[&str], used: &[Framework]) -> SubjectProfile {
    let raw = RawProfile {
        name: Some("Ada".to_string()),
        age: Some(6),
        interests: Some(interests.iter().map(|i| i.to_string()).collect()),
        ..Default::default()
    };
    let history = used
        .iter()
        .enumerate()
        .map(|(i, framework)| {
            AdventureSummary::new(
                i as u64 + 1,
                format!("Ada Story {}", i + 1),
                *framework,
                Theme::Kindness,
                "Ada had a nice day.",
                Vec::new(),
            )
        })
        .collect();
    ProfileValidator::new(ProfileConfig::default())
        .validate(raw)
        .unwrap()
        .with_history(history)
}

#[test]
fn strongest_affinity_wins() {
    let selector = FrameworkSelector::default();
    assert_eq!(selector.select(&leo()), Framework::Builder);
    assert_eq!(
        selector.select(&profile(&["rockets", "planets", "dinosaurs"], &[])),
        Framework::Exploration
    );
    assert_eq!(
        selector.select(&profile(&["puppies", "riddles", "horses"], &[])),
        Framework::RescueMission
    );
}

#[test]
fn affinity_beats_recency() {
    let selector = FrameworkSelector::default();
    let used = [Framework::Builder, Framework::Builder, Framework::Builder];
    assert_eq!(
        selector.select(&profile(&["trucks", "robots"], &used)),
        Framework::Builder
    );
}

#[test]
fn selection_is_deterministic() {
    let selector = FrameworkSelector::default();
    let subject = profile(&["stargazing", "origami"], &[Framework::Mystery]);
    let first = selector.select(&subject);
    for _ in 0..20 {
        assert_eq!(selector.select(&subject), first);
    }
}

#[test]
fn ties_go_to_never_used_frameworks_first() {
    let selector = FrameworkSelector::default();

    assert_eq!(
        selector.select(&profile(&["stargazing"], &[])),
        Framework::RescueMission
    );
    assert_eq!(
        selector.select(&profile(
            &["stargazing"],
            &[Framework::RescueMission, Framework::Exploration]
        )),
        Framework::Mystery
    );
}

#[test]
fn ties_among_used_frameworks_go_to_least_recent() {
    let selector = FrameworkSelector::default();
    let mut used = Framework::ALL.to_vec();
    used.rotate_left(3);
    // Oldest use is ALL[3] after the rotation.
    assert_eq!(
        selector.select(&profile(&["stargazing"], &used)),
        Framework::ALL[3]
    );

    // Equal scores between two frameworks; the one used longer ago wins.
    let used = [Framework::Exploration, Framework::Builder];
    assert_eq!(
        selector.select(&profile(&["trucks", "rockets"], &used)),
        Framework::Exploration
    );
}

#[derive(Debug)]
struct LastTieBreak;

impl TieBreak for LastTieBreak {
    fn choose(&self, tied: &[Framework]) -> Framework {
        *tied.last().unwrap()
    }
}

#[test]
fn custom_tie_break_decides_remaining_ties() {
    let selector = FrameworkSelector::new(LastTieBreak);
    assert_eq!(
        selector.select(&profile(&["stargazing"], &[])),
        *Framework::ALL.last().unwrap()
    );
    // Never consulted when scores already decide.
    assert_eq!(selector.select(&leo()), Framework::Builder);
}
