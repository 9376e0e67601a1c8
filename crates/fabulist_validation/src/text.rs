//! Tokenizing, stemming, and phrase matching.
//!
//! Everything downstream compares stems, never raw substrings of the text,
//! so "Spiders", "spider's" and "spider" all match the same rule.

use std::collections::BTreeMap;

/// Split text into lowercase word tokens.
///
/// Hyphens and punctuation separate tokens, a trailing possessive `'s` is
/// dropped, and other apostrophes are removed.
///
/// # Examples
///
/// ```
/// use fabulist_validation::tokenize;
///
/// assert_eq!(tokenize("Leo's eight-legged friend!"), vec!["leo", "eight", "legged", "friend"]);
/// assert_eq!(tokenize("didn't"), vec!["didnt"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter_map(normalize_token)
        .collect()
}

fn normalize_token(raw: &str) -> Option<String> {
    let lower = raw.to_lowercase();
    let trimmed = lower.trim_matches(|c| c == '\'' || c == '\u{2019}');
    let base = trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("\u{2019}s"))
        .unwrap_or(trimmed);
    let token: String = base.chars().filter(|c| c.is_alphanumeric()).collect();
    (!token.is_empty()).then_some(token)
}

/// Reduce a lowercase word to a crude stem.
///
/// A small suffix stripper: plural `-s`/`-es`/`-ies`, `-ing`, and `-ed`,
/// with doubled final consonants undoubled. Words of three characters or
/// fewer are left alone.
///
/// # Examples
///
/// ```
/// use fabulist_validation::stem;
///
/// assert_eq!(stem("spiders"), "spider");
/// assert_eq!(stem("thundering"), "thunder");
/// assert_eq!(stem("legged"), "leg");
/// assert_eq!(stem("bunnies"), "bunny");
/// assert_eq!(stem("boxes"), "box");
/// assert_eq!(stem("glass"), "glass");
/// ```
pub fn stem(word: &str) -> String {
    let word = word.to_lowercase();
    if word.chars().count() <= 3 {
        return word;
    }
    if let Some(base) = word.strip_suffix("ies") {
        if base.chars().count() >= 2 {
            return format!("{}y", base);
        }
    }
    if let Some(base) = word.strip_suffix("sses") {
        return format!("{}ss", base);
    }
    for suffix in ["ing", "ed"] {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.chars().count() >= 3 {
                return undouble(base);
            }
        }
    }
    if let Some(base) = word.strip_suffix("es") {
        if base.chars().count() >= 3 && ["s", "x", "z", "ch", "sh"].iter().any(|end| base.ends_with(end)) {
            return base.to_string();
        }
    }
    if word.ends_with('s') && !["ss", "us", "is"].iter().any(|end| word.ends_with(end)) {
        return word[..word.len() - 1].to_string();
    }
    word
}

fn undouble(base: &str) -> String {
    let chars: Vec<char> = base.chars().collect();
    match chars.as_slice() {
        [.., a, b] if a == b && a.is_alphabetic() && !"aeioulsz".contains(*a) => {
            chars[..chars.len() - 1].iter().collect()
        }
        _ => base.to_string(),
    }
}

/// Stems of a phrase joined by single spaces, used as a table lookup key.
pub(crate) fn phrase_key(phrase: &str) -> String {
    tokenize(phrase)
        .iter()
        .map(|token| stem(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Re-key a word table by [`phrase_key`].
pub(crate) fn stem_index<V>(table: &BTreeMap<String, V>) -> BTreeMap<String, &V> {
    table
        .iter()
        .map(|(key, value)| (phrase_key(key), value))
        .collect()
}

/// Count the words on a page the way a reader would.
///
/// # Examples
///
/// ```
/// use fabulist_validation::word_count;
///
/// assert_eq!(word_count("Leo ran -- fast!"), 3);
/// ```
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|word| word.chars().any(char::is_alphanumeric))
        .count()
}

/// Split text into sentences on terminal punctuation and line breaks.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Text reduced to its stem sequence, ready for phrase lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemmedText {
    stems: Vec<String>,
}

impl StemmedText {
    /// Tokenize and stem `text`.
    pub fn new(text: &str) -> Self {
        Self {
            stems: tokenize(text).iter().map(|token| stem(token)).collect(),
        }
    }

    /// The stems in order.
    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    /// How many times the phrase occurs as a contiguous stem run.
    pub fn count_phrase(&self, phrase: &[String]) -> usize {
        if phrase.is_empty() || phrase.len() > self.stems.len() {
            return 0;
        }
        self.stems
            .windows(phrase.len())
            .filter(|window| *window == phrase)
            .count()
    }

    /// Whether the phrase occurs; a single-stem phrase with `substring` set
    /// also matches inside longer stems.
    pub fn contains_phrase(&self, phrase: &[String], substring: bool) -> bool {
        match phrase {
            [single] if substring => self.stems.iter().any(|s| s.contains(single.as_str())),
            _ => self.count_phrase(phrase) > 0,
        }
    }
}

/// A match reported by [`PhraseSet::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseHit<'a> {
    /// Label the phrase was registered under
    pub label: &'a str,
    /// The phrase as registered
    pub phrase: &'a str,
}

#[derive(Debug, Clone)]
struct Phrase {
    label: String,
    text: String,
    stems: Vec<String>,
    substring: bool,
}

/// Labelled phrases matched against [`StemmedText`].
///
/// # Examples
///
/// ```
/// use fabulist_validation::{PhraseSet, StemmedText};
///
/// let mut set = PhraseSet::default();
/// set.insert("spiders", "eight-legged", None);
/// set.insert("thunder", "thunder", Some(4));
///
/// let text = StemmedText::new("An eight-legged visitor waved during the thunderstorm.");
/// let labels: Vec<&str> = set.find(&text).iter().map(|hit| hit.label).collect();
/// assert_eq!(labels, vec!["spiders", "thunder"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhraseSet {
    phrases: Vec<Phrase>,
}

impl PhraseSet {
    /// Register a phrase under a label.
    ///
    /// With `substring_min = Some(n)`, a single-word phrase whose stem has at
    /// least `n` characters also matches inside longer words. Returns false
    /// when the phrase has no word tokens or is already registered under
    /// the label.
    pub fn insert(&mut self, label: &str, phrase: &str, substring_min: Option<usize>) -> bool {
        let stems: Vec<String> = tokenize(phrase).iter().map(|token| stem(token)).collect();
        if stems.is_empty()
            || self
                .phrases
                .iter()
                .any(|existing| existing.label == label && existing.stems == stems)
        {
            return false;
        }
        let substring = match (stems.as_slice(), substring_min) {
            ([single], Some(min)) => single.chars().count() >= min,
            _ => false,
        };
        self.phrases.push(Phrase {
            label: label.to_string(),
            text: phrase.trim().to_string(),
            stems,
            substring,
        });
        true
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Every registered phrase found in `text`, one hit per label, in
    /// registration order.
    pub fn find(&self, text: &StemmedText) -> Vec<PhraseHit<'_>> {
        let mut hits: Vec<PhraseHit<'_>> = Vec::new();
        for phrase in &self.phrases {
            if hits.iter().any(|hit| hit.label == phrase.label) {
                continue;
            }
            if text.contains_phrase(&phrase.stems, phrase.substring) {
                hits.push(PhraseHit {
                    label: &phrase.label,
                    phrase: &phrase.text,
                });
            }
        }
        hits
    }

    /// Whether any registered phrase occurs in `text`.
    pub fn matches(&self, text: &StemmedText) -> bool {
        self.phrases
            .iter()
            .any(|phrase| text.contains_phrase(&phrase.stems, phrase.substring))
    }
}
