mod common;

use fabulist_config::{LexiconConfig, ProfileConfig};
use fabulist_core::{RawProfile, ReadingLevel};
use fabulist_error::FabulistErrorKind;
use fabulist_validation::ProfileValidator;

fn validator() -> ProfileValidator {
    ProfileValidator::new(ProfileConfig::default())
}

fn rejected_field(raw: RawProfile) -> String {
    let err = validator().validate(raw).unwrap_err();
    match err.kind() {
        FabulistErrorKind::Profile(e) => e.field.clone(),
        other => panic!("expected a profile error, got {}", other),
    }
}

#[test]
fn sample_profile_is_normalized() {
    let profile = common::leo();
    assert_eq!(profile.subject_id().as_str(), "leo");
    assert_eq!(*profile.age(), 5);
    assert_eq!(*profile.reading_level(), ReadingLevel::Emerging);
    assert_eq!(profile.interests()[2], "building things");
    assert!(profile.exclusions().contains("loud thunder"));
    assert_eq!(profile.favorite_things()["toy"], "dump truck");
}

#[test]
fn missing_name_is_rejected() {
    let mut raw = common::leo_raw();
    raw.name = Some("   ".to_string());
    assert_eq!(rejected_field(raw), "name");

    let mut raw = common::leo_raw();
    raw.name = Some("42".to_string());
    assert_eq!(rejected_field(raw), "name");
}

#[test]
fn age_outside_band_is_never_coerced() {
    for age in [None, Some(2), Some(11), Some(-1), Some(300)] {
        let mut raw = common::leo_raw();
        raw.age = age;
        raw.reading_level = None;
        assert_eq!(rejected_field(raw), "age", "age {:?}", age);
    }
}

#[test]
fn reading_level_must_match_age() {
    let mut raw = common::leo_raw();
    raw.reading_level = Some("confident".to_string());
    assert_eq!(rejected_field(raw), "reading_level");

    let mut raw = common::leo_raw();
    raw.reading_level = Some("expert".to_string());
    assert_eq!(rejected_field(raw), "reading_level");

    let mut raw = common::leo_raw();
    raw.age = Some(7);
    raw.reading_level = None;
    let profile = validator().validate(raw).unwrap();
    assert_eq!(*profile.reading_level(), ReadingLevel::Developing);
}

#[test]
fn empty_exclusion_entry_is_rejected() {
    let mut raw = common::leo_raw();
    raw.exclusions = Some(vec!["spiders".to_string(), " ".to_string()]);
    assert_eq!(rejected_field(raw), "exclusions");
}

#[test]
fn exclusions_are_lowercased_and_deduplicated() {
    let mut raw = common::leo_raw();
    raw.exclusions = Some(vec!["Spiders".to_string(), "spiders ".to_string()]);
    let profile = validator().validate(raw).unwrap();
    assert_eq!(profile.exclusions().len(), 1);
    assert!(profile.exclusions().contains("spiders"));
}

#[test]
fn exclusion_matching_the_name_is_rejected() {
    let mut raw = common::leo_raw();
    raw.name = Some("Storm".to_string());
    raw.exclusions = Some(vec!["thunder".to_string()]);
    assert_eq!(rejected_field(raw), "exclusions");

    let mut raw = common::leo_raw();
    raw.name = Some("Darcy Darkwood".to_string());
    raw.exclusions = Some(vec!["dark".to_string()]);
    assert_eq!(rejected_field(raw), "exclusions");
}

#[test]
fn name_collision_follows_the_configured_lexicon() {
    let lexicon = LexiconConfig {
        exclusion_synonyms: Default::default(),
        ..LexiconConfig::default()
    };
    let mut raw = common::leo_raw();
    raw.name = Some("Storm".to_string());
    raw.exclusions = Some(vec!["thunder".to_string()]);

    let profile = validator().with_lexicon(&lexicon, 4).validate(raw).unwrap();
    assert_eq!(profile.name(), "Storm");
}

#[test]
fn interests_are_required_and_bounded() {
    let mut raw = common::leo_raw();
    raw.interests = None;
    assert_eq!(rejected_field(raw), "interests");

    let mut raw = common::leo_raw();
    raw.interests = Some(vec!["mud".to_string(), String::new()]);
    assert_eq!(rejected_field(raw), "interests");

    let mut raw = common::leo_raw();
    raw.interests = Some((0..13).map(|n| format!("interest {}", n)).collect());
    assert_eq!(rejected_field(raw), "interests");
}

#[test]
fn blank_favorite_value_is_rejected() {
    let mut raw = common::leo_raw();
    raw.favorite_things = Some([("color".to_string(), " ".to_string())].into());
    assert_eq!(rejected_field(raw), "favorite_things");
}

#[test]
fn supplied_subject_id_is_validated() {
    let mut raw = common::leo_raw();
    raw.subject_id = Some("leo-2".to_string());
    assert_eq!(validator().validate(raw).unwrap().subject_id().as_str(), "leo-2");

    let mut raw = common::leo_raw();
    raw.subject_id = Some("../leo".to_string());
    assert_eq!(rejected_field(raw), "subject_id");
}

#[test]
fn blank_special_considerations_become_absent() {
    let mut raw = common::leo_raw();
    raw.special_considerations = Some("  ".to_string());
    assert_eq!(*validator().validate(raw).unwrap().special_considerations(), None);
}
