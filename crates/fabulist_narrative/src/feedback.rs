//! Corrective feedback carried from a failed attempt into the next prompt.

use derive_getters::Getters;
use fabulist_core::{Violation, ViolationCode};

/// Violations of one failed attempt, ready to phrase as instructions.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AttemptFeedback {
    /// Attempt the violations were found on
    attempt: u32,
    /// What was wrong
    violations: Vec<Violation>,
}

impl AttemptFeedback {
    /// Feedback from an attempt's violations.
    pub fn new(attempt: u32, violations: Vec<Violation>) -> Self {
        Self {
            attempt,
            violations,
        }
    }

    /// One terse instruction per distinct problem.
    ///
    /// Exclusion violations name the page but never the excluded topic, so
    /// the correction cannot reintroduce it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabulist_core::{Violation, ViolationCode};
    /// use fabulist_narrative::AttemptFeedback;
    ///
    /// let feedback = AttemptFeedback::new(1, vec![
    ///     Violation::on_page(ViolationCode::LengthBand, 4, "page 4 used 140 words; target is 30-50"),
    ///     Violation::on_page(ViolationCode::ExclusionMatch, 6, "page 6 text mentions excluded topic 'thunder' via 'thunder'"),
    /// ]);
    ///
    /// let corrections = feedback.corrections();
    /// assert_eq!(corrections[0], "page 4 used 140 words; target is 30-50");
    /// assert!(corrections[1].starts_with("page 6"));
    /// assert!(!corrections[1].contains("thunder"));
    /// ```
    pub fn corrections(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        for violation in &self.violations {
            let Some(line) = correction(violation) else {
                continue;
            };
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
        lines
    }
}

fn correction(violation: &Violation) -> Option<String> {
    let line = match (violation.code, violation.page_number) {
        (ViolationCode::ExclusionMatch, Some(page)) => format!(
            "page {} strays into a topic this reader must never see; remove it entirely, including sounds and metaphors",
            page
        ),
        (ViolationCode::ExclusionMatch, None) => {
            "the title or character notes stray into a topic this reader must never see; remove it entirely".to_string()
        }
        (ViolationCode::SafetyDenylist, Some(page)) => format!(
            "page {} uses a word that is not allowed in this book; keep it gentle, brand-free, and free of villains",
            page
        ),
        (ViolationCode::SafetyDenylist, None) => {
            "the title uses a word that is not allowed in this book; replace it".to_string()
        }
        (ViolationCode::SchemaInvalid, _) => {
            "the reply was not a valid story document; return only the JSON object in the exact schema, with no extra fields".to_string()
        }
        (ViolationCode::GeneratorTimeout | ViolationCode::GeneratorUnavailable, _) => return None,
        _ => violation.detail.clone(),
    };
    Some(line)
}
