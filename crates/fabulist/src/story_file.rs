//! Story files written by the command-line tool.

use fabulist_core::{StoryOutcome, SubjectId};
use fabulist_error::{FabulistResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Where a subject's story file goes: `<dir>/<subject_id>_story.json`.
pub fn story_path(dir: &Path, subject_id: &SubjectId) -> PathBuf {
    dir.join(format!("{}_story.json", subject_id.as_str()))
}

/// Write an outcome as pretty JSON, replacing any earlier file for the
/// subject. Creates `dir` if needed.
///
/// # Errors
///
/// Returns `StorageError` if the directory or file cannot be written.
#[tracing::instrument(skip_all, fields(subject_id = %outcome.subject_id, dir = %dir.display()))]
pub fn write_story(dir: &Path, outcome: &StoryOutcome) -> FabulistResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            dir.display(),
            e
        )))
    })?;

    let path = story_path(dir, &outcome.subject_id);
    let json = serde_json::to_string_pretty(outcome).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    std::fs::write(&path, json).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    tracing::debug!(path = %path.display(), "Story written");
    Ok(path)
}
