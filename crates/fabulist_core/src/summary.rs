//! Compact record of a finished adventure.

use crate::{Framework, StoryCandidate, Theme};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use fabulist_error::{StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a subject has already experienced.
///
/// Immutable once created; the continuity store only ever appends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct AdventureSummary {
    /// Per-subject ordering token, 1-based, assigned by the store
    #[serde(default)]
    sequence: u64,
    /// Story title
    #[serde(default)]
    title: String,
    /// Framework the story followed
    framework: Framework,
    /// Theme the story explored
    theme: Theme,
    /// Short recap of what happened
    recap: String,
    /// Named characters introduced
    #[serde(default)]
    characters: BTreeSet<String>,
    /// How the subject looked, for consistent illustrations later
    #[serde(default)]
    appearance_notes: String,
    /// When the adventure was recorded
    #[serde(default)]
    recorded_at: DateTime<Utc>,
}

impl AdventureSummary {
    /// Create a summary directly.
    pub fn new(
        sequence: u64,
        title: impl Into<String>,
        framework: Framework,
        theme: Theme,
        recap: impl Into<String>,
        characters: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            sequence,
            title: title.into(),
            framework,
            theme,
            recap: recap.into(),
            characters: characters.into_iter().collect(),
            appearance_notes: String::new(),
            recorded_at: Utc::now(),
        }
    }

    /// Derive the summary of a candidate accepted for the record.
    ///
    /// # Errors
    ///
    /// Fails when the candidate names an unknown framework or a theme
    /// outside the vocabulary; such a candidate cannot enter history.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabulist_core::{AdventureSummary, CharacterBibleUpdate, Framework, StoryCandidate};
    ///
    /// let candidate = StoryCandidate {
    ///     title: "Leo Builds a Bridge".to_string(),
    ///     framework_used: "builder".to_string(),
    ///     theme: "teamwork".to_string(),
    ///     pages: vec![],
    ///     character_bible_update: CharacterBibleUpdate {
    ///         appearance_notes: "green rain boots".to_string(),
    ///         personality_shown: "patient".to_string(),
    ///         friends_met: vec!["Pip".to_string()],
    ///         adventure_summary: "Leo and Pip built a bridge.".to_string(),
    ///     },
    /// };
    ///
    /// let summary = AdventureSummary::from_candidate(3, &candidate).unwrap();
    /// assert_eq!(*summary.sequence(), 3);
    /// assert_eq!(*summary.framework(), Framework::Builder);
    /// assert!(summary.characters().contains("Pip"));
    /// ```
    #[track_caller]
    pub fn from_candidate(sequence: u64, candidate: &StoryCandidate) -> Result<Self, StoryError> {
        let framework: Framework = candidate.framework_used.trim().parse().map_err(|_| {
            StoryError::new(StoryErrorKind::UnknownFramework(
                candidate.framework_used.clone(),
            ))
        })?;
        let theme: Theme = candidate
            .theme
            .trim()
            .parse()
            .map_err(|_| StoryError::new(StoryErrorKind::InvalidTheme(candidate.theme.clone())))?;
        let bible = &candidate.character_bible_update;

        Ok(Self {
            sequence,
            title: candidate.title.trim().to_string(),
            framework,
            theme,
            recap: bible.adventure_summary.trim().to_string(),
            characters: bible
                .friends_met
                .iter()
                .map(|friend| friend.trim().to_string())
                .filter(|friend| !friend.is_empty())
                .collect(),
            appearance_notes: bible.appearance_notes.trim().to_string(),
            recorded_at: Utc::now(),
        })
    }

    /// Same summary with a different ordering token.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Same summary with appearance notes attached.
    pub fn with_appearance_notes(mut self, notes: impl Into<String>) -> Self {
        self.appearance_notes = notes.into();
        self
    }
}
