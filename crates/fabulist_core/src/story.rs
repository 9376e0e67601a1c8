//! Generated story candidates, exactly as the generator shapes them.

use serde::{Deserialize, Serialize};

/// Number of pages every story must have.
pub const PAGE_COUNT: usize = 12;

/// One page of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Page {
    /// 1-based position in the book
    pub page_number: u32,
    /// Story text read aloud on this page
    pub text: String,
    /// Prompt handed to the illustration renderer
    pub illustration_prompt: String,
}

/// Character notes the generator reports alongside the story.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterBibleUpdate {
    /// How the subject looked in this story
    pub appearance_notes: String,
    /// Traits the subject showed
    pub personality_shown: String,
    /// Named friends introduced
    pub friends_met: Vec<String>,
    /// One or two sentence recap
    pub adventure_summary: String,
}

/// One generation attempt's structured output.
///
/// This is the bit-exact schema consumed by downstream rendering. The page
/// list is kept as parsed so that a wrong count is reported, never padded.
/// `framework_used` and `theme` stay as text because the generator is
/// untrusted; the output validator checks them against the vocabularies.
/// A candidate is never patched: a failed one is discarded and regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryCandidate {
    /// Book title
    pub title: String,
    /// Framework name the generator claims to have followed
    pub framework_used: String,
    /// Theme word
    pub theme: String,
    /// Pages in order
    pub pages: Vec<Page>,
    /// Character notes for continuity
    pub character_bible_update: CharacterBibleUpdate,
}

impl StoryCandidate {
    /// Look up a page by its number.
    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|page| page.page_number == page_number)
    }
}
