//! Subject profile rejection.

/// A subject profile failed validation.
///
/// Never retried. `field` names the offending input field so callers can
/// point the user at it.
///
/// # Examples
///
/// ```
/// use fabulist_error::ProfileError;
///
/// let err = ProfileError::new("exclusions", "entry 2 is empty");
/// assert_eq!(err.field, "exclusions");
/// assert!(format!("{}", err).contains("exclusions"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Invalid Profile: {}: {} at line {} in {}", field, reason, line, file)]
pub struct ProfileError {
    /// Name of the rejected field
    pub field: String,
    /// What is wrong with it
    pub reason: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ProfileError {
    /// Create a new ProfileError at the current location.
    #[track_caller]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            field: field.into(),
            reason: reason.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
