//! The story contract: every rule a candidate must satisfy before release.

use crate::exclusion::ExclusionMatcher;
use crate::extraction::{extract_json, parse_json};
use crate::safety::SafetyScanner;
use crate::text::{
    PhraseSet, StemmedText, phrase_key, sentences, stem, stem_index, tokenize, word_count,
};
use fabulist_config::{FabulistConfig, LexiconConfig, ValidationConfig};
use fabulist_core::{
    Framework, PAGE_COUNT, Page, RawCandidate, StoryCandidate, SubjectProfile, Theme,
    ValidationReport, Violation, ViolationCode,
};
use fabulist_error::{FabulistErrorKind, FabulistResult, StoryError, StoryErrorKind};
use regex::Regex;
use std::collections::BTreeSet;

/// Checks generated candidates against the story contract.
///
/// Every check runs on every candidate and all violations are collected, so
/// a failing report is the complete diagnostic set the repair loop feeds
/// back to the generator. The validator never modifies a candidate.
#[derive(Debug, Clone)]
pub struct OutputValidator {
    validation: ValidationConfig,
    lexicon: LexiconConfig,
    safety: SafetyScanner,
    title_pattern: Option<Regex>,
}

impl OutputValidator {
    /// Build a validator from configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoryError` with `InvalidRule` when `title_pattern` is not a
    /// valid regular expression.
    pub fn new(config: &FabulistConfig) -> FabulistResult<Self> {
        let title_pattern = match config.validation.title_pattern.as_deref() {
            Some(pattern) => Some(Regex::new(pattern).map_err(|e| {
                StoryError::new(StoryErrorKind::InvalidRule(format!(
                    "title_pattern '{}': {}",
                    pattern, e
                )))
            })?),
            None => None,
        };

        Ok(Self {
            validation: config.validation.clone(),
            lexicon: config.lexicon.clone(),
            safety: SafetyScanner::new(&config.lexicon),
            title_pattern,
        })
    }

    /// The exclusion matcher for one subject, as this validator applies it.
    pub fn exclusion_matcher(&self, profile: &SubjectProfile) -> ExclusionMatcher {
        ExclusionMatcher::new(
            profile.exclusions().iter().map(String::as_str),
            &self.lexicon,
            self.validation.min_substring_stem_len,
        )
    }

    /// Parse raw generator output and validate it.
    ///
    /// Output that cannot be extracted or deserialized into the story schema
    /// yields no candidate and a single `SCHEMA_INVALID` violation.
    pub fn validate_raw(
        &self,
        raw: &RawCandidate,
        profile: &SubjectProfile,
        requested: Framework,
    ) -> (Option<StoryCandidate>, ValidationReport) {
        let parsed = extract_json(raw.as_str()).and_then(|json| parse_json::<StoryCandidate>(&json));
        match parsed {
            Ok(candidate) => {
                let report = self.validate(&candidate, profile, requested);
                (Some(candidate), report)
            }
            Err(e) => {
                let detail = match e.kind() {
                    FabulistErrorKind::Json(json) => json.message.clone(),
                    other => other.to_string(),
                };
                tracing::warn!(subject_id = %profile.subject_id(), %detail, "Generator output does not fit the story schema");
                let violation = Violation::new(
                    ViolationCode::SchemaInvalid,
                    format!("output is not a valid story document: {}", detail),
                );
                (None, ValidationReport::from_violations(vec![violation]))
            }
        }
    }

    /// Validate a parsed candidate.
    #[tracing::instrument(skip_all, fields(subject_id = %profile.subject_id(), framework = %requested))]
    pub fn validate(
        &self,
        candidate: &StoryCandidate,
        profile: &SubjectProfile,
        requested: Framework,
    ) -> ValidationReport {
        let name = SubjectName::new(profile.name());
        let mut violations = Vec::new();

        self.check_structure(candidate, &mut violations);
        self.check_length(candidate, profile, &mut violations);
        self.check_exclusions(candidate, profile, &mut violations);
        self.check_name_density(candidate, &name, &mut violations);
        self.check_interests(candidate, profile, &name, &mut violations);
        self.check_safety(candidate, &mut violations);
        self.check_illustrations(candidate, profile, &mut violations);
        self.check_title(candidate, &name, &mut violations);
        check_framework(candidate, requested, &mut violations);
        check_theme(candidate, &mut violations);
        check_bible(candidate, &mut violations);

        let report = ValidationReport::from_violations(violations);
        if report.pass() {
            tracing::debug!("Candidate satisfies the contract");
        } else {
            let codes: BTreeSet<ViolationCode> =
                report.violations().iter().map(|v| v.code).collect();
            tracing::warn!(
                violations = report.violations().len(),
                codes = ?codes,
                "Candidate failed validation"
            );
        }
        report
    }

    fn check_structure(&self, candidate: &StoryCandidate, violations: &mut Vec<Violation>) {
        let pages = candidate.pages.len();
        if pages != PAGE_COUNT {
            violations.push(Violation::new(
                ViolationCode::StructuralCount,
                format!("story has {} pages; exactly {} are required", pages, PAGE_COUNT),
            ));
        }

        let misnumbered = candidate
            .pages
            .iter()
            .zip(1u32..)
            .find(|(page, expected)| page.page_number != *expected);
        if let Some((page, expected)) = misnumbered {
            violations.push(Violation::on_page(
                ViolationCode::StructuralSequence,
                page.page_number,
                format!(
                    "page {} is numbered {}; pages must run 1 to {} in order",
                    expected, page.page_number, pages
                ),
            ));
        }
    }

    fn check_length(
        &self,
        candidate: &StoryCandidate,
        profile: &SubjectProfile,
        violations: &mut Vec<Violation>,
    ) {
        let band = profile.reading_level().word_band();
        let tolerance = self.validation.length_tolerance_percent;
        for page in &candidate.pages {
            let words = word_count(&page.text);
            if !band.accepts(words, tolerance) {
                violations.push(Violation::on_page(
                    ViolationCode::LengthBand,
                    page.page_number,
                    format!(
                        "page {} used {} words; target is {}",
                        page.page_number, words, band
                    ),
                ));
            }
        }
    }

    fn check_exclusions(
        &self,
        candidate: &StoryCandidate,
        profile: &SubjectProfile,
        violations: &mut Vec<Violation>,
    ) {
        let matcher = self.exclusion_matcher(profile);
        if matcher.is_empty() {
            return;
        }

        let opener = self.validation.opener_for(profile.name());
        let suffix = &self.validation.illustration_style_suffix;

        for page in &candidate.pages {
            let mut seen: Vec<&str> = Vec::new();
            let scene = illustration_scene(&page.illustration_prompt, &opener, suffix);
            for (field, text) in [("text", page.text.as_str()), ("illustration prompt", scene)] {
                for hit in matcher.find(&StemmedText::new(text)) {
                    if seen.contains(&hit.label) {
                        continue;
                    }
                    seen.push(hit.label);
                    violations.push(Violation::on_page(
                        ViolationCode::ExclusionMatch,
                        page.page_number,
                        format!(
                            "page {} {} mentions excluded topic '{}' via '{}'",
                            page.page_number, field, hit.label, hit.phrase
                        ),
                    ));
                }
            }
        }

        let bible = &candidate.character_bible_update;
        let extras = [
            ("title", candidate.title.clone()),
            (
                "character bible",
                [
                    bible.appearance_notes.as_str(),
                    bible.personality_shown.as_str(),
                    bible.adventure_summary.as_str(),
                    &bible.friends_met.join(", "),
                ]
                .join("\n"),
            ),
        ];
        for (field, text) in extras {
            for hit in matcher.find(&StemmedText::new(&text)) {
                violations.push(Violation::new(
                    ViolationCode::ExclusionMatch,
                    format!(
                        "{} mentions excluded topic '{}' via '{}'",
                        field, hit.label, hit.phrase
                    ),
                ));
            }
        }
    }

    fn check_name_density(
        &self,
        candidate: &StoryCandidate,
        name: &SubjectName,
        violations: &mut Vec<Violation>,
    ) {
        let per = self.validation.pages_per_name_mention.max(1);
        let required = candidate.pages.len().div_ceil(per);
        let mentions: usize = candidate
            .pages
            .iter()
            .map(|page| StemmedText::new(&page.text).count_phrase(&name.stems))
            .sum();
        if mentions < required {
            violations.push(Violation::new(
                ViolationCode::NameDensity,
                format!(
                    "{} is named {} times; at least {} mentions are required",
                    name.display, mentions, required
                ),
            ));
        }
    }

    fn check_interests(
        &self,
        candidate: &StoryCandidate,
        profile: &SubjectProfile,
        name: &SubjectName,
        violations: &mut Vec<Violation>,
    ) {
        let vocabulary = self.interest_vocabulary(profile.interests());
        let required = self.validation.min_interest_pages;

        let satisfied = profile.interests().iter().any(|interest| {
            candidate
                .pages
                .iter()
                .filter(|page| interest_drives_page(page, interest, &vocabulary, name))
                .map(|page| page.page_number)
                .collect::<BTreeSet<_>>()
                .len()
                >= required
        });

        if !satisfied {
            violations.push(Violation::new(
                ViolationCode::InterestPresence,
                format!(
                    "no interest ({}) shares a sentence with {} on at least {} pages",
                    profile.interests().join(", "),
                    name.display,
                    required
                ),
            ));
        }
    }

    /// Phrases that show each interest in action, labelled by interest.
    fn interest_vocabulary(&self, interests: &[String]) -> PhraseSet {
        let keywords = stem_index(&self.lexicon.interest_keywords);
        let ignored: Vec<String> = self
            .lexicon
            .ignored_modifiers
            .iter()
            .map(|word| stem(word))
            .collect();

        let mut vocabulary = PhraseSet::default();
        for interest in interests {
            vocabulary.insert(interest, interest, None);

            let mut keyed = false;
            let mut lookups = vec![phrase_key(interest)];
            lookups.extend(tokenize(interest).iter().map(|token| stem(token)));
            for key in &lookups {
                if let Some(words) = keywords.get(key) {
                    keyed = true;
                    vocabulary.insert(interest, key, None);
                    for word in *words {
                        vocabulary.insert(interest, word, None);
                    }
                }
            }
            if !keyed {
                for token in lookups.iter().skip(1).filter(|token| !ignored.contains(token)) {
                    vocabulary.insert(interest, token, None);
                }
            }
        }
        vocabulary
    }

    fn check_safety(&self, candidate: &StoryCandidate, violations: &mut Vec<Violation>) {
        for page in &candidate.pages {
            let combined = format!("{}\n{}", page.text, page.illustration_prompt);
            for (category, term) in self.safety.denylist_hits(&combined) {
                violations.push(Violation::on_page(
                    ViolationCode::SafetyDenylist,
                    page.page_number,
                    format!("page {} uses {} term '{}'", page.page_number, category, term),
                ));
            }
        }
        for (category, term) in self.safety.denylist_hits(&candidate.title) {
            violations.push(Violation::new(
                ViolationCode::SafetyDenylist,
                format!("title uses {} term '{}'", category, term),
            ));
        }

        for page in &candidate.pages {
            if let Some(term) = self.safety.antagonist_without_qualifier(&page.text) {
                violations.push(Violation::on_page(
                    ViolationCode::AntagonistTone,
                    page.page_number,
                    format!(
                        "page {} presents the {} without showing they are misunderstood or need help",
                        page.page_number, term
                    ),
                ));
            }
        }
    }

    fn check_illustrations(
        &self,
        candidate: &StoryCandidate,
        profile: &SubjectProfile,
        violations: &mut Vec<Violation>,
    ) {
        let opener = self.validation.opener_for(profile.name());
        let opener_key = opener.trim().to_lowercase();
        let suffix = &self.validation.illustration_style_suffix;
        let suffix_norm = suffix_key(suffix);

        for page in &candidate.pages {
            let prompt = page.illustration_prompt.trim();
            if !prompt.to_lowercase().starts_with(&opener_key) {
                violations.push(Violation::on_page(
                    ViolationCode::IllustrationPrefix,
                    page.page_number,
                    format!(
                        "page {} illustration prompt must start with \"{}\"",
                        page.page_number, opener
                    ),
                ));
            }
            if !suffix_key(prompt).ends_with(&suffix_norm) {
                violations.push(Violation::on_page(
                    ViolationCode::IllustrationSuffix,
                    page.page_number,
                    format!(
                        "page {} illustration prompt must end with \"{}\"",
                        page.page_number,
                        suffix.trim()
                    ),
                ));
            }
        }
    }

    fn check_title(
        &self,
        candidate: &StoryCandidate,
        name: &SubjectName,
        violations: &mut Vec<Violation>,
    ) {
        let title = candidate.title.trim();
        let mut reasons = Vec::new();

        if title.is_empty() {
            reasons.push("is empty".to_string());
        } else {
            if title.contains(['\n', '\r']) {
                reasons.push("must be a single line".to_string());
            }
            let length = title.chars().count();
            if length > self.validation.max_title_chars {
                reasons.push(format!(
                    "is {} characters; at most {} allowed",
                    length, self.validation.max_title_chars
                ));
            }
            if StemmedText::new(title).count_phrase(&name.stems) == 0 {
                reasons.push(format!("must include {}", name.display));
            }
        }
        if let Some(pattern) = &self.title_pattern {
            if !pattern.is_match(title) {
                reasons.push(format!("must match {}", pattern.as_str()));
            }
        }

        if !reasons.is_empty() {
            violations.push(Violation::new(
                ViolationCode::TitlePattern,
                format!("title {}", reasons.join("; ")),
            ));
        }
    }
}

/// How the subject is recognized in text: the first word of their name.
struct SubjectName {
    display: String,
    stems: Vec<String>,
}

impl SubjectName {
    fn new(name: &str) -> Self {
        let stems = tokenize(name)
            .first()
            .map(|token| vec![stem(token)])
            .unwrap_or_default();
        Self {
            display: name.to_string(),
            stems,
        }
    }
}

fn interest_drives_page(
    page: &Page,
    interest: &str,
    vocabulary: &PhraseSet,
    name: &SubjectName,
) -> bool {
    sentences(&page.text).into_iter().any(|sentence| {
        let stemmed = StemmedText::new(sentence);
        stemmed.count_phrase(&name.stems) > 0
            && vocabulary
                .find(&stemmed)
                .iter()
                .any(|hit| hit.label == interest)
    })
}

/// The free-text part of an illustration prompt, without the required
/// opener and style suffix when they are present.
fn illustration_scene<'a>(prompt: &'a str, opener: &str, suffix: &str) -> &'a str {
    let mut scene = prompt.trim();

    let opener = opener.trim();
    if let Some(head) = scene.get(..opener.len()) {
        if head.to_lowercase() == opener.to_lowercase() {
            scene = &scene[opener.len()..];
        }
    }

    let suffix = suffix.trim().trim_end_matches('.').trim_end();
    let body = scene.trim_end().trim_end_matches('.').trim_end();
    if let Some(start) = body.len().checked_sub(suffix.len()) {
        if body.get(start..).is_some_and(|tail| tail.to_lowercase() == suffix.to_lowercase()) {
            scene = &body[..start];
        }
    }
    scene
}

fn suffix_key(text: &str) -> String {
    text.trim().trim_end_matches('.').trim_end().to_lowercase()
}

fn check_framework(
    candidate: &StoryCandidate,
    requested: Framework,
    violations: &mut Vec<Violation>,
) {
    let used = candidate.framework_used.trim();
    if used.parse::<Framework>().ok() != Some(requested) {
        violations.push(Violation::new(
            ViolationCode::FrameworkMismatch,
            format!("framework_used is '{}'; the story must follow {}", used, requested),
        ));
    }
}

fn check_theme(candidate: &StoryCandidate, violations: &mut Vec<Violation>) {
    let theme = candidate.theme.trim();
    let single_word = !theme.is_empty() && !theme.contains(char::is_whitespace);
    if !single_word || theme.parse::<Theme>().is_err() {
        violations.push(Violation::new(
            ViolationCode::ThemeInvalid,
            format!(
                "theme '{}' must be one word from: {}",
                theme,
                Theme::vocabulary()
            ),
        ));
    }
}

fn check_bible(candidate: &StoryCandidate, violations: &mut Vec<Violation>) {
    let bible = &candidate.character_bible_update;
    let missing: Vec<&str> = [
        ("appearance_notes", &bible.appearance_notes),
        ("personality_shown", &bible.personality_shown),
        ("adventure_summary", &bible.adventure_summary),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        violations.push(Violation::new(
            ViolationCode::CharacterBibleIncomplete,
            format!("character bible is missing {}", missing.join(", ")),
        ));
    }
}
