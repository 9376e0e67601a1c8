//! Error types for the Fabulist story orchestrator.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fabulist_error::{FabulistResult, ProfileError};
//!
//! fn check_age(age: u8) -> FabulistResult<u8> {
//!     if age > 10 {
//!         Err(ProfileError::new("age", format!("{} is outside 3-10", age)))?
//!     }
//!     Ok(age)
//! }
//!
//! assert!(check_age(12).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generator;
mod json;
mod profile;
mod storage;
mod story;

pub use config::ConfigError;
pub use error::{FabulistError, FabulistErrorKind, FabulistResult};
pub use generator::{GeneratorError, GeneratorErrorKind};
pub use json::JsonError;
pub use profile::ProfileError;
pub use storage::{StorageError, StorageErrorKind};
pub use story::{StoryError, StoryErrorKind};
