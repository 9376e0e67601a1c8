//! Denylist and antagonist-tone scanning.

use crate::text::{PhraseSet, StemmedText};
use fabulist_config::LexiconConfig;

/// Finds denylisted terms and antagonists written without sympathy.
///
/// Denylist entries match whole words only, so "sword" does not trip on
/// "swordfish" being named by a child who loves the sea.
///
/// # Examples
///
/// ```
/// use fabulist_config::LexiconConfig;
/// use fabulist_validation::SafetyScanner;
///
/// let scanner = SafetyScanner::new(&LexiconConfig::default());
///
/// assert_eq!(scanner.denylist_hits("He grabbed a sword."), vec![("violence", "sword")]);
/// assert_eq!(scanner.antagonist_without_qualifier("The troll stomped."), Some("troll"));
/// assert_eq!(
///     scanner.antagonist_without_qualifier("The troll stomped. Leo waved. The troll was lost."),
///     None
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SafetyScanner {
    denylist: PhraseSet,
    antagonists: PhraseSet,
    qualifiers: PhraseSet,
}

impl SafetyScanner {
    /// Build a scanner from the lexicon tables.
    pub fn new(lexicon: &LexiconConfig) -> Self {
        let mut denylist = PhraseSet::default();
        for (category, words) in &lexicon.denylist {
            for word in words {
                denylist.insert(category, word, None);
            }
        }

        let mut antagonists = PhraseSet::default();
        for term in &lexicon.antagonist_terms {
            antagonists.insert(term, term, None);
        }

        let mut qualifiers = PhraseSet::default();
        for qualifier in &lexicon.antagonist_qualifiers {
            qualifiers.insert("qualifier", qualifier, None);
        }

        Self {
            denylist,
            antagonists,
            qualifiers,
        }
    }

    /// Denylisted terms in `text` as `(category, term)`, one per category.
    pub fn denylist_hits<'a>(&'a self, text: &str) -> Vec<(&'a str, &'a str)> {
        self.denylist
            .find(&StemmedText::new(text))
            .into_iter()
            .map(|hit| (hit.label, hit.phrase))
            .collect()
    }

    /// The first antagonist term on a page with no qualifier anywhere on
    /// that page showing it is misunderstood or in need of help.
    pub fn antagonist_without_qualifier<'a>(&'a self, page: &str) -> Option<&'a str> {
        let stemmed = StemmedText::new(page);
        let hit = self.antagonists.find(&stemmed).into_iter().next()?;
        (!self.qualifiers.matches(&stemmed)).then_some(hit.label)
    }
}
