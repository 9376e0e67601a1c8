//! Prompt assembly: fixed rules, the subject, continuity, and corrections.

use crate::AttemptFeedback;
use fabulist_config::{FabulistConfig, LexiconConfig, ValidationConfig};
use fabulist_core::{
    AdventureSummary, Framework, PAGE_COUNT, Prompt, SubjectProfile, Theme,
};
use fabulist_error::{FabulistResult, StoryError, StoryErrorKind};
use fabulist_validation::ExclusionMatcher;
use std::collections::BTreeMap;
use std::fmt::Write;

const SYSTEM_RULES: &str = "\
You write personalized picture books for young children. Reply with one JSON \
object and nothing else: no markdown fences, no commentary.

STRUCTURE
- Exactly 12 pages, numbered 1 to 12 in order.
- Each page has the text read aloud and one illustration prompt.
- Stay inside the requested word band on every page.

TONE AND SAFETY
- Warm, gentle, and reassuring. Problems are small and end kindly.
- No violence, weapons, injuries, or death. No brand names or licensed characters.
- No villains, monsters, or frightening imagery. A grumpy or difficult character \
is misunderstood or needs help, and the page says so.
- Never mention a topic the request asks you to avoid, not even as a sound, a \
metaphor, or a background detail.

OUTPUT SCHEMA
{
  \"title\": string,
  \"framework_used\": string,
  \"theme\": string,
  \"pages\": [
    {\"page_number\": integer, \"text\": string, \"illustration_prompt\": string}
  ],
  \"character_bible_update\": {
    \"appearance_notes\": string,
    \"personality_shown\": string,
    \"friends_met\": [string],
    \"adventure_summary\": string
  }
}
Use exactly these fields. The character bible records how the child looked, \
what they showed of themselves, named friends, and a one or two sentence recap.";

/// Builds generator prompts.
///
/// The system text holds the fixed rules and output schema. The user text
/// holds everything specific to the request. Exclusions reach the generator
/// only as category names where the lexicon has one, and neither the raw
/// exclusion list nor the raw history is ever embedded.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    validation: ValidationConfig,
    lexicon: LexiconConfig,
    continuity_window: usize,
}

impl PromptAssembler {
    /// Create an assembler from configuration.
    pub fn new(config: &FabulistConfig) -> Self {
        Self {
            validation: config.validation.clone(),
            lexicon: config.lexicon.clone(),
            continuity_window: config.orchestrator.continuity_window,
        }
    }

    /// Build the prompt for the attempt after `feedback`, or the first
    /// attempt when there is none.
    pub fn build(
        &self,
        profile: &SubjectProfile,
        framework: Framework,
        feedback: Option<&AttemptFeedback>,
    ) -> FabulistResult<Prompt> {
        let attempt = feedback.map(|f| f.attempt() + 1).unwrap_or(1);
        self.build_attempt(profile, framework, attempt, feedback)
    }

    /// Build the prompt for a specific attempt number.
    ///
    /// # Errors
    ///
    /// Returns `StoryError` with `PromptAssembly` if the profile view cannot
    /// be serialized or the prompt cannot be built.
    #[tracing::instrument(skip_all, fields(subject_id = %profile.subject_id(), %framework, attempt))]
    pub fn build_attempt(
        &self,
        profile: &SubjectProfile,
        framework: Framework,
        attempt: u32,
        feedback: Option<&AttemptFeedback>,
    ) -> FabulistResult<Prompt> {
        let matcher = ExclusionMatcher::new(
            profile.exclusions().iter().map(String::as_str),
            &self.lexicon,
            self.validation.min_substring_stem_len,
        );

        let mut user = String::new();
        self.write_subject(&mut user, profile, &matcher)?;
        self.write_story_shape(&mut user, profile, framework);
        self.write_continuity(&mut user, profile, &matcher);
        write_avoidance(&mut user, &matcher);
        if let Some(feedback) = feedback {
            write_corrections(&mut user, feedback);
        }

        let prompt = Prompt::builder()
            .system(SYSTEM_RULES)
            .user(user)
            .attempt(attempt)
            .framework(framework)
            .build()
            .map_err(|e| StoryError::new(StoryErrorKind::PromptAssembly(e.to_string())))?;

        tracing::debug!(
            user_chars = prompt.user().len(),
            corrections = feedback.map(|f| f.violations().len()).unwrap_or(0),
            "Prompt assembled"
        );
        Ok(prompt)
    }

    fn write_subject(
        &self,
        out: &mut String,
        profile: &SubjectProfile,
        matcher: &ExclusionMatcher,
    ) -> FabulistResult<()> {
        let favorites: BTreeMap<&String, &String> = profile
            .favorite_things()
            .iter()
            .filter(|(category, value)| matcher.is_clean(category) && matcher.is_clean(value))
            .collect();
        let notes = profile
            .special_considerations()
            .as_deref()
            .filter(|notes| matcher.is_clean(notes));

        let view = serde_json::json!({
            "name": profile.name(),
            "age": profile.age(),
            "reading_level": profile.reading_level(),
            "interests": profile.interests(),
            "favorite_things": favorites,
            "special_considerations": notes,
        });
        let view = serde_json::to_string_pretty(&view)
            .map_err(|e| StoryError::new(StoryErrorKind::PromptAssembly(e.to_string())))?;

        let _ = writeln!(out, "SUBJECT\n{}\n", view);
        Ok(())
    }

    fn write_story_shape(&self, out: &mut String, profile: &SubjectProfile, framework: Framework) {
        let name = profile.name();
        let level = profile.reading_level();
        let band = level.word_band();
        let mentions = PAGE_COUNT.div_ceil(self.validation.pages_per_name_mention.max(1));

        let _ = writeln!(
            out,
            "FRAMEWORK\n{} Set framework_used to \"{}\".\n",
            framework.blurb(),
            framework
        );
        let _ = writeln!(
            out,
            "READING LEVEL\n{}: {} words on every page. {}\n",
            level,
            band,
            level.calibration()
        );
        let _ = writeln!(
            out,
            "PERSONALIZATION\nName {} at least {} times across the pages. On at least {} pages, \
             {} and one of their interests appear in the same sentence and drive what happens.\n",
            name, mentions, self.validation.min_interest_pages, name
        );
        let _ = writeln!(
            out,
            "ILLUSTRATIONS\nEvery illustration_prompt starts with \"{}\" and ends with \"{}\"\n",
            self.validation.opener_for(name),
            self.validation.illustration_style_suffix.trim()
        );

        let _ = write!(
            out,
            "TITLE AND THEME\nThe title includes {} and is one line of at most {} characters.",
            name, self.validation.max_title_chars
        );
        if let Some(pattern) = &self.validation.title_pattern {
            let _ = write!(out, " It must match the pattern {}.", pattern);
        }
        let _ = writeln!(
            out,
            " The theme is exactly one of: {}.\n",
            Theme::vocabulary()
        );
    }

    fn write_continuity(&self, out: &mut String, profile: &SubjectProfile, matcher: &ExclusionMatcher) {
        let recent = profile.recent_history(self.continuity_window);
        let hooks: Vec<&AdventureSummary> = recent
            .iter()
            .filter(|summary| matcher.is_clean(&hook_text(summary)))
            .collect();
        if hooks.len() < recent.len() {
            tracing::debug!(
                omitted = recent.len() - hooks.len(),
                "Continuity hooks omitted for touching an exclusion"
            );
        }

        if !hooks.is_empty() {
            let _ = writeln!(
                out,
                "CONTINUITY\nEarlier adventures, oldest first. Nod to them lightly; this is a new story."
            );
            for summary in hooks {
                let _ = writeln!(out, "- {}", hook_text(summary));
            }
            out.push('\n');
        }

        let appearance = profile
            .history()
            .iter()
            .rev()
            .map(|summary| summary.appearance_notes().trim())
            .find(|notes| !notes.is_empty());
        if let Some(notes) = appearance.filter(|notes| matcher.is_clean(notes)) {
            let _ = writeln!(
                out,
                "ESTABLISHED LOOK\nKeep {} looking the same in every illustration: {}\n",
                profile.name(),
                notes
            );
        }
    }
}

fn hook_text(summary: &AdventureSummary) -> String {
    let mut text = format!(
        "\"{}\" ({}, {}): {}",
        summary.title(),
        summary.framework(),
        summary.theme(),
        summary.recap()
    );
    if !summary.characters().is_empty() {
        let friends: Vec<&str> = summary.characters().iter().map(String::as_str).collect();
        let _ = write!(text, " Friends: {}.", friends.join(", "));
    }
    text
}

fn write_avoidance(out: &mut String, matcher: &ExclusionMatcher) {
    let mut categories: Vec<&str> = Vec::new();
    let mut verbatim: Vec<&str> = Vec::new();
    for exclusion in matcher.categories() {
        match exclusion.category.as_deref() {
            Some(category) if !categories.contains(&category) => categories.push(category),
            Some(_) => {}
            None => verbatim.push(&exclusion.term),
        }
    }
    if categories.is_empty() && verbatim.is_empty() {
        return;
    }

    let _ = writeln!(out, "AVOID");
    if !categories.is_empty() {
        let _ = writeln!(
            out,
            "Keep the whole story, its pictures, and its title free of {}.",
            categories.join("; ")
        );
    }
    if !verbatim.is_empty() {
        let _ = writeln!(out, "Do not mention: {}.", verbatim.join("; "));
    }
    out.push('\n');
}

fn write_corrections(out: &mut String, feedback: &AttemptFeedback) {
    let corrections = feedback.corrections();
    if corrections.is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        "CORRECTIONS\nAttempt {} was rejected. Write a fresh story that fixes every point:",
        feedback.attempt()
    );
    for correction in corrections {
        let _ = writeln!(out, "- {}", correction);
    }
}
