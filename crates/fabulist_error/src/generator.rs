//! Generator failures and retry classification.

/// Generator-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeneratorErrorKind {
    /// API key not found in environment
    #[display("ANTHROPIC_API_KEY environment variable not set")]
    MissingApiKey,
    /// Generator could not be reached or returned nothing usable
    #[display("Generator unavailable: {}", _0)]
    Unavailable(String),
    /// Call exceeded its deadline
    #[display("Generator timed out after {}ms", elapsed_ms)]
    Timeout {
        /// Milliseconds waited before giving up
        elapsed_ms: u64,
    },
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status, message)]
    Http {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
    /// The provider refused the request
    #[display("Generator rejected request: {}", _0)]
    Rejected(String),
    /// Provider response envelope could not be decoded
    #[display("Failed to parse generator response: {}", _0)]
    Parse(String),
}

impl GeneratorErrorKind {
    /// Check if this error should consume another attempt rather than fail the request.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeneratorErrorKind::Unavailable(_) | GeneratorErrorKind::Timeout { .. } => true,
            GeneratorErrorKind::Http { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504 | 529)
            }
            _ => false,
        }
    }
}

/// Generator error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabulist_error::{GeneratorError, GeneratorErrorKind};
///
/// let err = GeneratorError::new(GeneratorErrorKind::Http {
///     status: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(err.kind.is_retryable());
///
/// let err = GeneratorError::new(GeneratorErrorKind::MissingApiKey);
/// assert!(!err.kind.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generator Error: {} at line {} in {}", kind, line, file)]
pub struct GeneratorError {
    /// The kind of error that occurred
    pub kind: GeneratorErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeneratorError {
    /// Create a new GeneratorError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeneratorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
