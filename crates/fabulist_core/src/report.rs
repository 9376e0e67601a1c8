//! Validation reports and the violations they carry.

use serde::{Deserialize, Serialize};

/// Machine-readable reason a candidate breached its contract.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    /// Story does not have exactly twelve pages
    StructuralCount,
    /// Page numbers are not 1..n in order
    StructuralSequence,
    /// Page word count outside the reading-level band
    LengthBand,
    /// An excluded topic or one of its synonyms appears
    ExclusionMatch,
    /// Subject named too rarely
    NameDensity,
    /// No interest drives the plot on enough pages
    InterestPresence,
    /// Denylisted violence, brand, or villain term
    SafetyDenylist,
    /// Antagonist described without a sympathetic qualifier
    AntagonistTone,
    /// Illustration prompt lacks the templated opener
    IllustrationPrefix,
    /// Illustration prompt lacks the style directive
    IllustrationSuffix,
    /// Title does not fit the required pattern
    TitlePattern,
    /// Framework differs from the one requested
    FrameworkMismatch,
    /// Theme is not a single vocabulary word
    ThemeInvalid,
    /// Character bible update has blank fields
    CharacterBibleIncomplete,
    /// Raw output could not be parsed into the schema
    SchemaInvalid,
    /// Generator call exceeded its deadline
    GeneratorTimeout,
    /// Generator could not produce output
    GeneratorUnavailable,
}

/// One specific contract breach.
///
/// # Examples
///
/// ```
/// use fabulist_core::{Violation, ViolationCode};
///
/// let violation = Violation::on_page(ViolationCode::LengthBand, 4, "page 4 used 140 words; target is 30-50");
/// assert_eq!(violation.to_string(), "LENGTH_BAND (page 4): page 4 used 140 words; target is 30-50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// What kind of breach
    pub code: ViolationCode,
    /// Page the breach was found on, if it is page-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Human-readable detail
    pub detail: String,
}

impl Violation {
    /// A violation of the story as a whole.
    pub fn new(code: ViolationCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            page_number: None,
            detail: detail.into(),
        }
    }

    /// A violation on a specific page.
    pub fn on_page(code: ViolationCode, page_number: u32, detail: impl Into<String>) -> Self {
        Self {
            code,
            page_number: Some(page_number),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.page_number {
            Some(page) => write!(f, "{} (page {}): {}", self.code, page, self.detail),
            None => write!(f, "{}: {}", self.code, self.detail),
        }
    }
}

/// Outcome of validating one candidate.
///
/// `pass` is true exactly when no violation was found. All checks run, so a
/// failing report is a complete diagnostic set rather than the first error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pass: bool,
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Build a report from every violation found.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            pass: violations.is_empty(),
            violations,
        }
    }

    /// A clean report.
    pub fn passed() -> Self {
        Self::from_violations(Vec::new())
    }

    /// Whether the candidate satisfied every rule.
    pub fn pass(&self) -> bool {
        self.pass
    }

    /// Violations in the order the checks found them.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Take ownership of the violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Whether any violation has the given code.
    pub fn has(&self, code: ViolationCode) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }

    /// Violations with the given code.
    pub fn with_code(&self, code: ViolationCode) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_screaming() {
        let json = serde_json::to_string(&ViolationCode::ExclusionMatch).unwrap();
        assert_eq!(json, "\"EXCLUSION_MATCH\"");
        assert_eq!(ViolationCode::StructuralCount.to_string(), "STRUCTURAL_COUNT");
    }

    #[test]
    fn pass_tracks_violations() {
        assert!(ValidationReport::passed().pass());
        let report = ValidationReport::from_violations(vec![Violation::new(
            ViolationCode::ThemeInvalid,
            "bravery",
        )]);
        assert!(!report.pass());
        assert!(report.has(ViolationCode::ThemeInvalid));
        assert!(!report.has(ViolationCode::LengthBand));
    }
}
