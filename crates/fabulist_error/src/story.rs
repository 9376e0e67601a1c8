//! Story assembly and bookkeeping errors.

/// Story-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// Theme is not in the fixed vocabulary
    #[display("Theme '{}' is not in the theme vocabulary", _0)]
    InvalidTheme(String),
    /// Framework name not recognized
    #[display("Unknown framework: {}", _0)]
    UnknownFramework(String),
    /// Prompt could not be built
    #[display("Prompt assembly failed: {}", _0)]
    PromptAssembly(String),
    /// A validation rule in the configuration is unusable
    #[display("Invalid validation rule: {}", _0)]
    InvalidRule(String),
}

/// Story error with location tracking.
///
/// # Examples
///
/// ```
/// use fabulist_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::InvalidTheme("bravery".to_string()));
/// assert!(format!("{}", err).contains("bravery"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The kind of error that occurred
    pub kind: StoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoryError {
    /// Create a new story error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
