//! Top-level error wrapper types.

use crate::{ConfigError, GeneratorError, JsonError, ProfileError, StorageError, StoryError};

/// Every failure a Fabulist operation can surface.
///
/// # Examples
///
/// ```
/// use fabulist_error::{FabulistError, ProfileError};
///
/// let err: FabulistError = ProfileError::new("name", "must not be empty").into();
/// assert!(format!("{}", err).contains("Invalid Profile"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulistErrorKind {
    /// Subject profile rejected
    #[from(ProfileError)]
    Profile(ProfileError),
    /// Generator failure
    #[from(GeneratorError)]
    Generator(GeneratorError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Continuity storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Story assembly error
    #[from(StoryError)]
    Story(StoryError),
}

/// Fabulist error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabulist_error::{FabulistErrorKind, FabulistResult, GeneratorError, GeneratorErrorKind};
///
/// fn call() -> FabulistResult<()> {
///     Err(GeneratorError::new(GeneratorErrorKind::Unavailable("503".into())))?
/// }
///
/// let err = call().unwrap_err();
/// assert!(err.is_retryable());
/// assert!(matches!(err.kind(), FabulistErrorKind::Generator(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabulist Error: {}", _0)]
pub struct FabulistError(Box<FabulistErrorKind>);

impl FabulistError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulistErrorKind {
        &self.0
    }

    /// Whether a transient generator failure caused this error.
    pub fn is_retryable(&self) -> bool {
        match self.kind() {
            FabulistErrorKind::Generator(e) => e.kind.is_retryable(),
            _ => false,
        }
    }

    /// The generator error kind, if this is a generator failure.
    pub fn generator_kind(&self) -> Option<&crate::GeneratorErrorKind> {
        match self.kind() {
            FabulistErrorKind::Generator(e) => Some(&e.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to FabulistErrorKind
impl<T> From<T> for FabulistError
where
    T: Into<FabulistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabulist operations.
pub type FabulistResult<T> = std::result::Result<T, FabulistError>;
