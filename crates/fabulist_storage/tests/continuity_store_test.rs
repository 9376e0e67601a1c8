//! Tests for the in-memory and filesystem continuity stores.

use fabulist_core::{CharacterBibleUpdate, StoryCandidate, SubjectId};
use fabulist_interface::ContinuityStore;
use fabulist_storage::{FileContinuityStore, InMemoryContinuityStore};
use std::sync::Arc;
use tempfile::TempDir;

fn candidate(title: &str) -> StoryCandidate {
    StoryCandidate {
        title: title.to_string(),
        framework_used: "builder".to_string(),
        theme: "teamwork".to_string(),
        pages: Vec::new(),
        character_bible_update: CharacterBibleUpdate {
            appearance_notes: "green rain boots".to_string(),
            personality_shown: "patient".to_string(),
            friends_met: vec!["Pip".to_string()],
            adventure_summary: format!("{} happened.", title),
        },
    }
}

fn leo() -> SubjectId {
    SubjectId::parse("leo").unwrap()
}

async fn records_in_order(store: &dyn ContinuityStore) {
    let subject = leo();
    for n in 1..=5 {
        let summary = store.record(&subject, &candidate(&format!("Story {}", n))).await.unwrap();
        assert_eq!(*summary.sequence(), n);
    }

    let recent = store.recent(&subject, 3).await.unwrap();
    let titles: Vec<&str> = recent.iter().map(|s| s.title().as_str()).collect();
    assert_eq!(titles, vec!["Story 3", "Story 4", "Story 5"]);

    let all = store.history(&subject).await.unwrap();
    assert_eq!(all.len(), 5);
    assert!(all.windows(2).all(|pair| pair[0].sequence() < pair[1].sequence()));
}

async fn isolates_subjects(store: &dyn ContinuityStore) {
    store.record(&leo(), &candidate("Leo's story")).await.unwrap();
    let mia = SubjectId::parse("mia").unwrap();
    assert!(store.recent(&mia, 3).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_memory_store_ordering() {
    records_in_order(&InMemoryContinuityStore::new()).await;
}

#[tokio::test]
async fn test_memory_store_isolates_subjects() {
    isolates_subjects(&InMemoryContinuityStore::new()).await;
}

#[tokio::test]
async fn test_file_store_ordering() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileContinuityStore::new(temp_dir.path()).unwrap();
    records_in_order(&store).await;
}

#[tokio::test]
async fn test_file_store_isolates_subjects() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileContinuityStore::new(temp_dir.path()).unwrap();
    isolates_subjects(&store).await;
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let store = FileContinuityStore::new(temp_dir.path()).unwrap();
        store.record(&leo(), &candidate("First")).await.unwrap();
    }
    let store = FileContinuityStore::new(temp_dir.path()).unwrap();
    let summary = store.record(&leo(), &candidate("Second")).await.unwrap();
    assert_eq!(*summary.sequence(), 2);

    let contents = std::fs::read_to_string(store.path_for(&leo())).unwrap();
    assert_eq!(contents.lines().count(), 2);
}

#[tokio::test]
async fn test_file_store_reports_corrupt_lines() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileContinuityStore::new(temp_dir.path()).unwrap();
    std::fs::write(store.path_for(&leo()), "not json\n").unwrap();
    assert!(store.recent(&leo(), 3).await.is_err());
    assert!(store.record(&leo(), &candidate("Next")).await.is_err());
}

#[tokio::test]
async fn test_memory_store_reads_leave_no_entries() {
    let store = InMemoryContinuityStore::new();
    let mia = SubjectId::parse("mia").unwrap();
    assert!(store.recent(&mia, 3).await.unwrap().is_empty());
    assert!(store.history(&mia).await.unwrap().is_empty());
    assert_eq!(store.subject_count(), 0);

    store.record(&leo(), &candidate("Leo's story")).await.unwrap();
    assert_eq!(store.subject_count(), 1);
}

#[tokio::test]
async fn test_unknown_theme_is_not_recorded() {
    let store = InMemoryContinuityStore::new();
    let mut bad = candidate("Bad theme");
    bad.theme = "bravery".to_string();
    assert!(store.record(&leo(), &bad).await.is_err());
    assert!(store.history(&leo()).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_get_unique_sequences() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileContinuityStore::new(temp_dir.path()).unwrap());

    let tasks = (1..=20).map(|n| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            store
                .record(&leo(), &candidate(&format!("Story {}", n)))
                .await
                .unwrap()
        })
    });
    let mut sequences: Vec<u64> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|joined| *joined.unwrap().sequence())
        .collect();
    sequences.sort_unstable();
    assert_eq!(sequences, (1..=20).collect::<Vec<u64>>());

    let history = store.history(&leo()).await.unwrap();
    let stored: Vec<u64> = history.iter().map(|s| *s.sequence()).collect();
    assert_eq!(stored, (1..=20).collect::<Vec<u64>>());
}
