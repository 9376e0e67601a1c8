use fabulist_core::RawProfile;
use fabulist_error::{FabulistResult, JsonError, StorageError, StorageErrorKind};
use std::collections::BTreeMap;
use std::path::Path;

/// The sample subject: Leo, age 5.
///
/// # Examples
///
/// ```
/// use fabulist::demo_profile;
///
/// let leo = demo_profile();
/// assert_eq!(leo.name.as_deref(), Some("Leo"));
/// assert_eq!(leo.age, Some(5));
/// ```
pub fn demo_profile() -> RawProfile {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let favorite_things: BTreeMap<String, String> = [
        ("color", "green"),
        ("food", "pancakes"),
        ("toy", "dump truck"),
        ("animal", "triceratops"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    RawProfile {
        subject_id: Some("leo".to_string()),
        name: Some("Leo".to_string()),
        age: Some(5),
        interests: Some(strings(&["dinosaurs", "trucks", "building things", "mud"])),
        favorite_things: Some(favorite_things),
        exclusions: Some(strings(&["loud thunder", "being alone in the dark", "spiders"])),
        reading_level: Some("emerging".to_string()),
        special_considerations: Some(
            "Leo has a little sister, Mia, who likes to tag along.".to_string(),
        ),
        history: None,
    }
}

/// The sample profile as pretty-printed JSON.
pub fn demo_profile_json() -> FabulistResult<String> {
    Ok(serde_json::to_string_pretty(&demo_profile()).map_err(|e| JsonError::new(e.to_string()))?)
}

/// Write the sample profile to `path`.
///
/// # Errors
///
/// Returns `StorageError` with `FileWrite` when the file cannot be written.
pub fn write_demo_profile(path: &Path) -> FabulistResult<()> {
    let json = demo_profile_json()?;
    std::fs::write(path, json).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    tracing::info!(path = %path.display(), "Wrote sample profile");
    Ok(())
}
