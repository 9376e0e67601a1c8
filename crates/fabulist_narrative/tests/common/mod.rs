//! Shared fixtures and stub generators for orchestration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use fabulist_config::FabulistConfig;
use fabulist_core::{
    CharacterBibleUpdate, PAGE_COUNT, Page, Prompt, RawCandidate, RawProfile, StoryCandidate,
    SubjectProfile,
};
use fabulist_error::{FabulistResult, GeneratorError, GeneratorErrorKind};
use fabulist_interface::StoryGenerator;
use fabulist_validation::ProfileValidator;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

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

/// Replays scripted replies in order; the last one repeats.
#[derive(Debug)]
pub struct ScriptedGenerator {
    replies: Vec<Reply>,
    prompts: Mutex<Vec<Prompt>>,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Story(StoryCandidate),
    Text(String),
    Fail(GeneratorErrorKind),
    Hang,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl StoryGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &Prompt) -> FabulistResult<RawCandidate> {
        let reply = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.clone());
            let index = (prompts.len() - 1).min(self.replies.len() - 1);
            self.replies[index].clone()
        };
        match reply {
            Reply::Story(candidate) => Ok(RawCandidate::new(serde_json::to_string(&candidate).unwrap())),
            Reply::Text(text) => Ok(RawCandidate::new(text)),
            Reply::Fail(kind) => Err(GeneratorError::new(kind).into()),
            Reply::Hang => std::future::pending().await,
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Carries `defects` injected violations and fixes one on every call, so
/// call `n` returns a candidate with `defects - n` of them left.
///
/// Up to four defects are injected, each with its own violation code. The
/// theme is the last one fixed.
#[derive(Debug)]
pub struct ConvergingGenerator {
    defects: usize,
    calls: AtomicUsize,
}

impl ConvergingGenerator {
    pub fn new(defects: usize) -> Self {
        assert!(defects <= 4, "only four distinct defects are available");
        Self {
            defects,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StoryGenerator for ConvergingGenerator {
    async fn generate(&self, _prompt: &Prompt) -> FabulistResult<RawCandidate> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let remaining = self.defects.saturating_sub(call);
        let mut candidate = valid_candidate();
        if remaining >= 1 {
            candidate.theme = "bravery".to_string();
        }
        if remaining >= 2 {
            candidate.title = "The Dinosaur Builders".to_string();
        }
        if remaining >= 3 {
            candidate.character_bible_update.personality_shown = String::new();
        }
        if remaining >= 4 {
            candidate.framework_used = "mystery".to_string();
        }
        Ok(RawCandidate::new(serde_json::to_string(&candidate).unwrap()))
    }

    fn provider_name(&self) -> &'static str {
        "converging"
    }

    fn model_name(&self) -> &str {
        "converging"
    }
}

pub fn too_long_candidate() -> StoryCandidate {
    let mut candidate = valid_candidate();
    candidate.pages[3].text.push_str(&" Leo smiled.".repeat(10));
    candidate
}

pub fn thunder_candidate() -> StoryCandidate {
    let mut candidate = valid_candidate();
    candidate.pages[5].text.push_str(" Thunder rumbled far away.");
    candidate
}

pub fn test_config() -> FabulistConfig {
    let mut config = FabulistConfig::default();
    config.orchestrator.max_attempts = 3;
    config.orchestrator.generator_timeout_ms = 1_000;
    config.orchestrator.wall_clock_budget_ms = 60_000;
    config.orchestrator.backoff_initial_ms = 10;
    config.orchestrator.backoff_max_ms = 100;
    config
}
