//! Continuity stores for Fabulist.
//!
//! Both backends implement [`ContinuityStore`](fabulist_interface::ContinuityStore):
//! appends for one subject are serialized behind a per-subject lock, and
//! different subjects never contend.
//!
//! - [`InMemoryContinuityStore`]: process-local, for tests and one-shot runs
//! - [`FileContinuityStore`]: one append-only JSON Lines file per subject
//!
//! # Example
//!
//! ```rust
//! use fabulist_interface::ContinuityStore;
//! use fabulist_storage::FileContinuityStore;
//!
//! # async fn example(candidate: fabulist_core::StoryCandidate) -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileContinuityStore::new("/tmp/fabulist-history")?;
//! let leo = fabulist_core::SubjectId::parse("leo")?;
//!
//! let summary = store.record(&leo, &candidate).await?;
//! let recent = store.recent(&leo, 3).await?;
//! assert_eq!(recent.last(), Some(&summary));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;

pub use filesystem::FileContinuityStore;
pub use memory::InMemoryContinuityStore;

