//! Profile and story contract validation for Fabulist.
//!
//! - [`ProfileValidator`] turns an untrusted [`RawProfile`](fabulist_core::RawProfile)
//!   into a [`SubjectProfile`](fabulist_core::SubjectProfile) or an `InvalidProfile` error.
//! - [`OutputValidator`] checks a generated candidate against every
//!   structural, length, exclusion, personalization, safety, and format rule
//!   and reports all violations at once.
//! - [`ExclusionMatcher`] and [`SafetyScanner`] are the keyword and stem
//!   matchers both validators and the prompt assembler share.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod exclusion;
mod extraction;
mod output;
mod profile;
mod safety;
mod text;

pub use exclusion::{ExclusionCategory, ExclusionMatcher};
pub use extraction::{extract_json, parse_json};
pub use output::OutputValidator;
pub use profile::ProfileValidator;
pub use safety::SafetyScanner;
pub use text::{PhraseHit, PhraseSet, StemmedText, sentences, stem, tokenize, word_count};
