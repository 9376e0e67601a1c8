//! Reading levels and their per-page word bands.

use serde::{Deserialize, Serialize};

/// Reading level of the subject, derived from age.
///
/// # Examples
///
/// ```
/// use fabulist_core::ReadingLevel;
///
/// assert_eq!(ReadingLevel::for_age(5), ReadingLevel::Emerging);
/// assert_eq!(ReadingLevel::for_age(7), ReadingLevel::Developing);
/// assert_eq!(ReadingLevel::for_age(9), ReadingLevel::Confident);
/// assert_eq!("developing".parse::<ReadingLevel>().unwrap(), ReadingLevel::Developing);
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
pub enum ReadingLevel {
    /// Ages up to 5: short sentences, 30-50 words per page
    Emerging,
    /// Ages 6-7: 50-80 words per page
    Developing,
    /// Ages 8 and up: 80-120 words per page
    Confident,
}

impl ReadingLevel {
    /// The level a subject of the given age reads at.
    pub fn for_age(age: u8) -> Self {
        match age {
            0..=5 => ReadingLevel::Emerging,
            6..=7 => ReadingLevel::Developing,
            _ => ReadingLevel::Confident,
        }
    }

    /// Target words per page.
    pub fn word_band(&self) -> WordBand {
        match self {
            ReadingLevel::Emerging => WordBand::new(30, 50),
            ReadingLevel::Developing => WordBand::new(50, 80),
            ReadingLevel::Confident => WordBand::new(80, 120),
        }
    }

    /// Sentence guidance handed to the generator.
    pub fn calibration(&self) -> &'static str {
        match self {
            ReadingLevel::Emerging => {
                "Short, simple sentences of 5-8 words. Repetition and rhythm are welcome. Concrete, familiar words only."
            }
            ReadingLevel::Developing => {
                "Sentences of 8-12 words with some variety. A few new words are fine when the picture or context explains them."
            }
            ReadingLevel::Confident => {
                "Varied sentence length, light dialogue, and richer vocabulary. Paragraphs may carry a small twist or joke."
            }
        }
    }
}

/// Inclusive word-count range for a single page.
///
/// # Examples
///
/// ```
/// use fabulist_core::ReadingLevel;
///
/// let band = ReadingLevel::Emerging.word_band();
/// assert_eq!(band.tolerant(10), (27, 55));
/// assert!(band.accepts(54, 10));
/// assert!(!band.accepts(56, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}-{}", min, max)]
pub struct WordBand {
    /// Fewest words a page should have
    pub min: usize,
    /// Most words a page should have
    pub max: usize,
}

impl WordBand {
    /// Create a band from inclusive bounds.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Bounds widened by `percent` on each side (floor below, ceiling above).
    pub fn tolerant(&self, percent: u8) -> (usize, usize) {
        let percent = percent as usize;
        let lower = self.min * (100 - percent.min(100)) / 100;
        let upper = (self.max * (100 + percent)).div_ceil(100);
        (lower, upper)
    }

    /// Whether `words` falls inside the tolerant band.
    pub fn accepts(&self, words: usize, percent: u8) -> bool {
        let (lower, upper) = self.tolerant(percent);
        (lower..=upper).contains(&words)
    }
}
