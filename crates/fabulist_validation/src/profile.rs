//! Turning an untrusted profile payload into a [`SubjectProfile`].

use crate::exclusion::ExclusionMatcher;
use crate::text::StemmedText;
use fabulist_config::{LexiconConfig, ProfileConfig, ValidationConfig};
use fabulist_core::{RawProfile, ReadingLevel, SubjectId, SubjectProfile};
use fabulist_error::{FabulistResult, ProfileError};
use std::collections::{BTreeMap, BTreeSet};

/// Validates caller profiles against the configured bounds.
///
/// Nothing is coerced: an out-of-range age or a reading level that disagrees
/// with the age is rejected, never adjusted. An exclusion that the subject's
/// own name would trip is rejected as well.
///
/// # Examples
///
/// ```
/// use fabulist_config::ProfileConfig;
/// use fabulist_core::{RawProfile, ReadingLevel};
/// use fabulist_validation::ProfileValidator;
///
/// let raw = RawProfile {
///     name: Some(" Leo ".to_string()),
///     age: Some(5),
///     interests: Some(vec!["Dinosaurs".to_string(), "dinosaurs".to_string()]),
///     ..Default::default()
/// };
///
/// let profile = ProfileValidator::new(ProfileConfig::default()).validate(raw).unwrap();
/// assert_eq!(profile.name(), "Leo");
/// assert_eq!(profile.interests(), &vec!["dinosaurs".to_string()]);
/// assert_eq!(*profile.reading_level(), ReadingLevel::Emerging);
/// ```
#[derive(Debug, Clone)]
pub struct ProfileValidator {
    config: ProfileConfig,
    lexicon: LexiconConfig,
    min_substring_len: usize,
}

impl Default for ProfileValidator {
    fn default() -> Self {
        Self::new(ProfileConfig::default())
    }
}

impl ProfileValidator {
    /// Create a validator with the given bounds and the default lexicon.
    pub fn new(config: ProfileConfig) -> Self {
        Self {
            config,
            lexicon: LexiconConfig::default(),
            min_substring_len: ValidationConfig::default().min_substring_stem_len,
        }
    }

    /// Match exclusions against the subject's name the way the output
    /// validator matches them against stories.
    pub fn with_lexicon(mut self, lexicon: &LexiconConfig, min_substring_len: usize) -> Self {
        self.lexicon = lexicon.clone();
        self.min_substring_len = min_substring_len;
        self
    }

    /// Validate a raw profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` naming the first offending field.
    #[tracing::instrument(skip_all)]
    pub fn validate(&self, raw: RawProfile) -> FabulistResult<SubjectProfile> {
        let name = self.name(raw.name.as_deref())?;
        let age = self.age(raw.age)?;
        let interests = self.interests(raw.interests.unwrap_or_default())?;
        let favorite_things = favorite_things(raw.favorite_things.unwrap_or_default())?;
        let exclusions = exclusions(raw.exclusions.unwrap_or_default())?;
        self.name_collision(&name, &exclusions)?;
        let reading_level = reading_level(raw.reading_level.as_deref(), age)?;
        let subject_id = match raw.subject_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => SubjectId::parse(id)?,
            _ => SubjectId::from_name(&name),
        };
        let special_considerations = raw
            .special_considerations
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        let profile = SubjectProfile::builder()
            .subject_id(subject_id)
            .name(name)
            .age(age)
            .interests(interests)
            .favorite_things(favorite_things)
            .exclusions(exclusions)
            .reading_level(reading_level)
            .special_considerations(special_considerations)
            .history(raw.history.unwrap_or_default())
            .build()
            .map_err(|e| ProfileError::new("profile", e.to_string()))?;

        tracing::debug!(
            subject_id = %profile.subject_id(),
            age = profile.age(),
            interests = profile.interests().len(),
            exclusions = profile.exclusions().len(),
            "Profile accepted"
        );
        Ok(profile)
    }

    fn name(&self, name: Option<&str>) -> FabulistResult<String> {
        let name = name.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            Err(ProfileError::new("name", "is required"))?
        }
        if !name.chars().any(char::is_alphabetic) {
            Err(ProfileError::new("name", "must contain a letter"))?
        }
        let length = name.chars().count();
        if length > self.config.max_name_chars {
            Err(ProfileError::new(
                "name",
                format!(
                    "is {} characters; at most {} allowed",
                    length, self.config.max_name_chars
                ),
            ))?
        }
        Ok(name.to_string())
    }

    fn name_collision(&self, name: &str, exclusions: &BTreeSet<String>) -> FabulistResult<()> {
        let matcher = ExclusionMatcher::new(
            exclusions.iter().map(String::as_str),
            &self.lexicon,
            self.min_substring_len,
        );
        if let Some(hit) = matcher.find(&StemmedText::new(name)).into_iter().next() {
            Err(ProfileError::new(
                "exclusions",
                format!(
                    "'{}' matches the name {} via '{}', and every story must use the name",
                    hit.label, name, hit.phrase
                ),
            ))?
        }
        Ok(())
    }

    fn age(&self, age: Option<i64>) -> FabulistResult<u8> {
        let Some(age) = age else {
            return Err(ProfileError::new("age", "is required").into());
        };
        let (min, max) = (self.config.min_age, self.config.max_age);
        match u8::try_from(age) {
            Ok(age) if (min..=max).contains(&age) => Ok(age),
            _ => Err(ProfileError::new(
                "age",
                format!("{} is outside the supported range {}-{}", age, min, max),
            )
            .into()),
        }
    }

    fn interests(&self, raw: Vec<String>) -> FabulistResult<Vec<String>> {
        let mut interests: Vec<String> = Vec::with_capacity(raw.len());
        for (index, entry) in raw.iter().enumerate() {
            let entry = entry.trim().to_lowercase();
            if entry.is_empty() {
                Err(ProfileError::new(
                    "interests",
                    format!("entry {} is empty", index + 1),
                ))?
            }
            if !interests.contains(&entry) {
                interests.push(entry);
            }
        }
        if interests.is_empty() {
            Err(ProfileError::new("interests", "at least one interest is required"))?
        }
        if interests.len() > self.config.max_interests {
            Err(ProfileError::new(
                "interests",
                format!(
                    "{} given; at most {} allowed",
                    interests.len(),
                    self.config.max_interests
                ),
            ))?
        }
        Ok(interests)
    }
}

fn favorite_things(raw: BTreeMap<String, String>) -> FabulistResult<BTreeMap<String, String>> {
    let mut favorites = BTreeMap::new();
    for (category, value) in raw {
        let (category, value) = (category.trim(), value.trim());
        if category.is_empty() {
            Err(ProfileError::new("favorite_things", "category names must not be blank"))?
        }
        if value.is_empty() {
            Err(ProfileError::new(
                "favorite_things",
                format!("'{}' has a blank value", category),
            ))?
        }
        favorites.insert(category.to_string(), value.to_string());
    }
    Ok(favorites)
}

fn exclusions(raw: Vec<String>) -> FabulistResult<BTreeSet<String>> {
    raw.iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry = entry.trim().to_lowercase();
            if entry.is_empty() {
                Err(ProfileError::new(
                    "exclusions",
                    format!("entry {} is empty", index + 1),
                ))?
            }
            Ok(entry)
        })
        .collect()
}

fn reading_level(declared: Option<&str>, age: u8) -> FabulistResult<ReadingLevel> {
    let expected = ReadingLevel::for_age(age);
    let Some(declared) = declared.map(str::trim).filter(|level| !level.is_empty()) else {
        return Ok(expected);
    };
    let level: ReadingLevel = declared.parse().map_err(|_| {
        ProfileError::new(
            "reading_level",
            format!("'{}' is not one of emerging, developing, confident", declared),
        )
    })?;
    if level != expected {
        Err(ProfileError::new(
            "reading_level",
            format!("{} does not match age {} (expected {})", level, age, expected),
        ))?
    }
    Ok(level)
}
