//! Append-only filesystem continuity store.
//!
//! Each subject has one JSON Lines file, `{base_path}/{subject_id}.jsonl`,
//! holding one [`AdventureSummary`] per line in the order they were recorded.
//!
//! ```text
//! /var/fabulist/history/
//! ├── leo.jsonl
//! └── mary-ann.jsonl
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use fabulist_core::{AdventureSummary, StoryCandidate, SubjectId};
use fabulist_error::{FabulistResult, StorageError, StorageErrorKind};
use fabulist_interface::ContinuityStore;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Filesystem continuity store.
///
/// Appends for one subject run under that subject's lock. The lock guard
/// moves into the blocking task that performs the write, so a caller that
/// stops waiting cannot release the lock while a line is half written, and
/// the next append cannot interleave with it.
#[derive(Debug, Clone)]
pub struct FileContinuityStore {
    base_path: PathBuf,
    locks: Arc<DashMap<SubjectId, Arc<Mutex<()>>>>,
}

impl FileContinuityStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> FabulistResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened continuity store");
        Ok(Self {
            base_path,
            locks: Arc::new(DashMap::new()),
        })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// History file for a subject.
    pub fn path_for(&self, subject_id: &SubjectId) -> PathBuf {
        self.base_path.join(format!("{}.jsonl", subject_id.as_str()))
    }

    async fn lock(&self, subject_id: &SubjectId) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(subject_id.clone()).or_default().clone();
        lock.lock_owned().await
    }
}

#[async_trait]
impl ContinuityStore for FileContinuityStore {
    #[tracing::instrument(skip_all, fields(subject_id = %subject_id))]
    async fn record(
        &self,
        subject_id: &SubjectId,
        candidate: &StoryCandidate,
    ) -> FabulistResult<AdventureSummary> {
        let guard = self.lock(subject_id).await;
        let path = self.path_for(subject_id);
        let candidate = candidate.clone();

        let summary = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let sequence = read_log(&path)?.len() as u64 + 1;
            let summary = AdventureSummary::from_candidate(sequence, &candidate)?;
            append(&path, &summary)?;
            Ok::<_, fabulist_error::FabulistError>(summary)
        })
        .await
        .map_err(|e| StorageError::new(StorageErrorKind::Unavailable(e.to_string())))??;

        tracing::info!(sequence = summary.sequence(), "Recorded adventure");
        Ok(summary)
    }

    #[tracing::instrument(skip_all, fields(subject_id = %subject_id, n))]
    async fn recent(&self, subject_id: &SubjectId, n: usize) -> FabulistResult<Vec<AdventureSummary>> {
        let guard = self.lock(subject_id).await;
        let path = self.path_for(subject_id);

        let mut entries = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            read_log(&path)
        })
        .await
        .map_err(|e| StorageError::new(StorageErrorKind::Unavailable(e.to_string())))??;

        let start = entries.len().saturating_sub(n);
        Ok(entries.split_off(start))
    }
}

fn read_log(path: &Path) -> FabulistResult<Vec<AdventureSummary>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into());
        }
    };

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<AdventureSummary>(line).map_err(|e| {
                StorageError::new(StorageErrorKind::Corrupt(format!(
                    "{}:{}: {}",
                    path.display(),
                    index + 1,
                    e
                )))
                .into()
            })
        })
        .collect()
}

fn append(path: &Path, summary: &AdventureSummary) -> FabulistResult<()> {
    let mut line = serde_json::to_string(summary).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    line.push('\n');

    let write_error = |e: std::io::Error| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error)?;
    file.write_all(line.as_bytes()).map_err(write_error)?;
    file.sync_data().map_err(write_error)?;
    Ok(())
}
