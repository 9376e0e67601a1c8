//! Subject profiles, raw and validated.

use crate::{AdventureSummary, ReadingLevel};
use derive_builder::Builder;
use derive_getters::Getters;
use fabulist_error::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const MAX_SUBJECT_ID_LEN: usize = 64;

/// Storage key for a subject: a slug of `[a-z0-9_-]`, at most 64 characters.
///
/// # Examples
///
/// ```
/// use fabulist_core::SubjectId;
///
/// let id = SubjectId::parse("leo-2019").unwrap();
/// assert_eq!(id.as_str(), "leo-2019");
/// assert!(SubjectId::parse("../etc").is_err());
///
/// assert_eq!(SubjectId::from_name("Mary Ann O'Neil").as_str(), "mary-ann-o-neil");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
    /// Validate a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` on the `subject_id` field when the value is
    /// empty, too long, or contains characters outside `[a-z0-9_-]`.
    #[track_caller]
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ProfileError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(ProfileError::new("subject_id", "must not be empty"));
        }
        if value.len() > MAX_SUBJECT_ID_LEN {
            return Err(ProfileError::new(
                "subject_id",
                format!("must be at most {} characters", MAX_SUBJECT_ID_LEN),
            ));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
        {
            return Err(ProfileError::new(
                "subject_id",
                format!("character '{}' is not allowed; use a-z, 0-9, '-' or '_'", bad),
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Derive an identifier from a display name.
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        for c in name.trim().chars().flat_map(char::to_lowercase) {
            if c.is_ascii_alphanumeric() {
                slug.push(c);
            } else if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let mut slug: String = slug.trim_matches('-').chars().take(MAX_SUBJECT_ID_LEN).collect();
        while slug.ends_with('-') {
            slug.pop();
        }
        if slug.is_empty() {
            slug.push_str("subject");
        }
        Self(slug)
    }

    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubjectId {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SubjectId> for String {
    fn from(id: SubjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Untrusted profile payload from a caller.
///
/// Every field is optional so that a missing field surfaces as an
/// `InvalidProfile` naming it, not as a deserialization failure.
///
/// # Examples
///
/// ```
/// use fabulist_core::RawProfile;
///
/// let raw: RawProfile = serde_json::from_str(r#"{
///     "name": "Leo",
///     "age": 5,
///     "interests": ["dinosaurs"],
///     "fears_to_avoid": ["thunder"]
/// }"#).unwrap();
/// assert_eq!(raw.exclusions, Some(vec!["thunder".to_string()]));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawProfile {
    /// Storage key; derived from the name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Age in years
    #[serde(default)]
    pub age: Option<i64>,
    /// Interest tags, most important first
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    /// Favorite things by category
    #[serde(default)]
    pub favorite_things: Option<BTreeMap<String, String>>,
    /// Topics that must never appear
    #[serde(default, alias = "fears_to_avoid")]
    pub exclusions: Option<Vec<String>>,
    /// Declared reading level
    #[serde(default)]
    pub reading_level: Option<String>,
    /// Free-text notes for the author
    #[serde(default)]
    pub special_considerations: Option<String>,
    /// Earlier adventures, oldest first
    #[serde(default)]
    pub history: Option<Vec<AdventureSummary>>,
}

/// A validated subject profile.
///
/// Built by the profile validator; every invariant holds once constructed:
/// the name is non-empty, the age is in the supported band, interests are
/// non-empty, exclusions are lowercase non-empty tokens, and the reading
/// level matches the age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct SubjectProfile {
    /// Storage key
    subject_id: SubjectId,
    /// Display name
    name: String,
    /// Age in years
    age: u8,
    /// Interest tags in caller order, deduplicated
    interests: Vec<String>,
    /// Favorite things by category
    #[builder(default)]
    favorite_things: BTreeMap<String, String>,
    /// Normalized exclusion tokens
    #[builder(default)]
    exclusions: BTreeSet<String>,
    /// Reading level
    reading_level: ReadingLevel,
    /// Free-text notes for the author
    #[builder(default)]
    special_considerations: Option<String>,
    /// Earlier adventures, oldest first
    #[builder(default)]
    history: Vec<AdventureSummary>,
}

impl SubjectProfile {
    /// Start building a profile.
    pub fn builder() -> SubjectProfileBuilder {
        SubjectProfileBuilder::default()
    }

    /// Replace the history with one loaded from the continuity store.
    pub fn with_history(mut self, history: Vec<AdventureSummary>) -> Self {
        self.history = history;
        self
    }

    /// The most recent `n` adventures, oldest first.
    pub fn recent_history(&self, n: usize) -> &[AdventureSummary] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }
}
