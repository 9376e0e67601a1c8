//! The fixed theme vocabulary.

use serde::{Deserialize, Serialize};

/// One-word theme a story explores.
///
/// # Examples
///
/// ```
/// use fabulist_core::Theme;
///
/// assert_eq!("Courage".parse::<Theme>().unwrap(), Theme::Courage);
/// assert!("bravery".parse::<Theme>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Courage
    Courage,
    /// Kindness
    Kindness,
    /// Curiosity
    Curiosity,
    /// Friendship
    Friendship,
    /// Perseverance
    Perseverance,
    /// Creativity
    Creativity,
    /// Teamwork
    Teamwork,
    /// Honesty
    Honesty,
    /// Patience
    Patience,
    /// Empathy
    Empathy,
    /// Gratitude
    Gratitude,
    /// Resilience
    Resilience,
}

impl Theme {
    /// Vocabulary as a comma-separated list for prompts.
    pub fn vocabulary() -> String {
        use strum::IntoEnumIterator;
        Theme::iter()
            .map(|theme| theme.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
