//! Exclusion matching: a subject's excluded topics, their significant
//! tokens, and their registered synonyms and metaphors.

use crate::text::{PhraseHit, PhraseSet, StemmedText, phrase_key, stem, stem_index, tokenize};
use fabulist_config::LexiconConfig;

/// How the generator is told to avoid one exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionCategory {
    /// The exclusion as the caller wrote it
    pub term: String,
    /// Category name from the lexicon, if one is registered
    pub category: Option<String>,
}

/// Matches a subject's exclusions in generated text.
///
/// Each exclusion contributes its whole phrase, each significant token of a
/// multi-word phrase (modifiers such as "loud" or "being" are skipped), and
/// every synonym registered for the phrase or those tokens. Single-word
/// stems of at least `min_substring_len` characters also match inside longer
/// words, so "thunder" blocks "thunderstorm".
///
/// # Examples
///
/// ```
/// use fabulist_config::LexiconConfig;
/// use fabulist_validation::ExclusionMatcher;
///
/// let lexicon = LexiconConfig::default();
/// let matcher = ExclusionMatcher::new(["spiders", "loud thunder"], &lexicon, 4);
///
/// assert!(!matcher.is_clean("A web-spinner waved hello."));
/// assert!(!matcher.is_clean("The THUNDERSTORM passed."));
/// assert!(matcher.is_clean("The sun was shining."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    phrases: PhraseSet,
    categories: Vec<ExclusionCategory>,
}

impl ExclusionMatcher {
    /// Build a matcher for the given exclusion terms.
    pub fn new<'a>(
        exclusions: impl IntoIterator<Item = &'a str>,
        lexicon: &LexiconConfig,
        min_substring_len: usize,
    ) -> Self {
        let synonyms = stem_index(&lexicon.exclusion_synonyms);
        let category_names = stem_index(&lexicon.exclusion_categories);
        let ignored: Vec<String> = lexicon
            .ignored_modifiers
            .iter()
            .map(|word| stem(word))
            .collect();
        let substring = Some(min_substring_len);

        let mut phrases = PhraseSet::default();
        let mut categories = Vec::new();

        for term in exclusions {
            let term = term.trim();
            let tokens = tokenize(term);
            if tokens.is_empty() {
                continue;
            }
            phrases.insert(term, term, substring);

            let significant: Vec<String> = tokens
                .iter()
                .map(|token| stem(token))
                .filter(|token| !ignored.contains(token))
                .collect();
            if tokens.len() > 1 {
                for token in &significant {
                    phrases.insert(term, token, substring);
                }
            }

            let mut keys = vec![phrase_key(term)];
            keys.extend(significant.iter().cloned());

            for key in &keys {
                if let Some(words) = synonyms.get(key) {
                    for word in *words {
                        phrases.insert(term, word, substring);
                    }
                }
            }

            let category = keys
                .iter()
                .find_map(|key| category_names.get(key))
                .map(|name| name.to_string());
            categories.push(ExclusionCategory {
                term: term.to_string(),
                category,
            });
        }

        Self {
            phrases,
            categories,
        }
    }

    /// Whether the subject has no exclusions.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Every exclusion found in `text`; `label` is the exclusion term and
    /// `phrase` the word or synonym that matched.
    pub fn find<'a>(&'a self, text: &StemmedText) -> Vec<PhraseHit<'a>> {
        self.phrases.find(text)
    }

    /// Whether `text` is free of every exclusion.
    pub fn is_clean(&self, text: &str) -> bool {
        !self.phrases.matches(&StemmedText::new(text))
    }

    /// Category guidance for each exclusion, in profile order.
    pub fn categories(&self) -> &[ExclusionCategory] {
        &self.categories
    }
}
