//! Shared fixtures for validation tests.

#![allow(dead_code)]

use fabulist_config::FabulistConfig;
use fabulist_core::{
    CharacterBibleUpdate, PAGE_COUNT, Page, RawProfile, StoryCandidate, SubjectProfile,
};
use fabulist_validation::ProfileValidator;

pub const PLACES: [&str; 12] = [
    "park", "pond", "farm", "garden", "beach", "river", "meadow", "school", "library", "bakery",
    "orchard", "playground",
];

/// Leo, age 5, the sample subject.
pub fn leo_raw() -> RawProfile {
    serde_json::from_value(serde_json::json!({
        "name": "Leo",
        "age": 5,
        "interests": ["dinosaurs", "trucks", "building things", "mud"],
        "favorite_things": {"color": "green", "food": "pancakes", "toy": "dump truck"},
        "fears_to_avoid": ["loud thunder", "being alone in the dark", "spiders"],
        "reading_level": "emerging"
    }))
    .unwrap()
}

pub fn leo() -> SubjectProfile {
    ProfileValidator::new(FabulistConfig::default().profile)
        .validate(leo_raw())
        .unwrap()
}

pub fn page_text(name: &str, place: &str) -> String {
    format!(
        "{name} and the friendly dinosaur named Pip rolled a big green truck up the sunny hill near the {place}. \
         {name} laughed as the dinosaur helped stack smooth stones into a tall tower. \
         Everyone cheered and waved happily together."
    )
}

pub fn illustration(name: &str, place: &str) -> String {
    let config = FabulistConfig::default();
    format!(
        "{} riding a friendly green dinosaur beside a big truck near the {}. {}",
        config.validation.opener_for(name),
        place,
        config.validation.illustration_style_suffix
    )
}

/// A candidate for Leo that satisfies every rule.
pub fn valid_candidate() -> StoryCandidate {
    candidate_with_pages(PAGE_COUNT)
}

pub fn candidate_with_pages(count: usize) -> StoryCandidate {
    StoryCandidate {
        title: "Leo and the Dinosaur Builders".to_string(),
        framework_used: "builder".to_string(),
        theme: "teamwork".to_string(),
        pages: (0..count)
            .map(|index| {
                let place = PLACES[index % PLACES.len()];
                Page {
                    page_number: index as u32 + 1,
                    text: page_text("Leo", place),
                    illustration_prompt: illustration("Leo", place),
                }
            })
            .collect(),
        character_bible_update: CharacterBibleUpdate {
            appearance_notes: "curly brown hair, green rain boots, yellow raincoat".to_string(),
            personality_shown: "curious, patient, proud of the tower".to_string(),
            friends_met: vec!["Pip".to_string()],
            adventure_summary: "Leo and Pip the dinosaur built a tall tower of stones on a sunny hill."
                .to_string(),
        },
    }
}
