use spotguess::management::{FeedbackError, FeedbackManager};
use spotguess::ranking::FeedbackMap;
use tempfile::tempdir;

#[tokio::test]
async fn test_load_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let store = FeedbackManager::new(dir.path().join("artist_feedback.json"));

    let loaded = store.load().await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn test_persist_then_load_round_trip() {
    let dir = tempdir().unwrap();
    let store = FeedbackManager::new(dir.path().join("artist_feedback.json"));

    let mut feedback = FeedbackMap::new();
    feedback.insert("Drake".to_string(), 3);
    feedback.insert("SZA".to_string(), -2);
    feedback.insert("Björk".to_string(), 0);

    store.persist(&feedback).await.unwrap();
    assert_eq!(store.load().await.unwrap(), feedback);

    store.persist(&FeedbackMap::new()).await.unwrap();
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_persist_writes_two_space_indented_object() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("artist_feedback.json");
    let store = FeedbackManager::new(path.clone());

    let feedback = FeedbackMap::from([("A".to_string(), 1), ("B".to_string(), -1)]);
    store.persist(&feedback).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "{\n  \"A\": 1,\n  \"B\": -1\n}");
    assert!(!dir.path().join("artist_feedback.json.tmp").exists());
}

#[tokio::test]
async fn test_persist_creates_parent_directories_and_overwrites() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/deeper/artist_feedback.json");
    let store = FeedbackManager::new(path.clone());

    store
        .persist(&FeedbackMap::from([("Old".to_string(), 5)]))
        .await
        .unwrap();
    store
        .persist(&FeedbackMap::from([("New".to_string(), 1)]))
        .await
        .unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(loaded, FeedbackMap::from([("New".to_string(), 1)]));
}

#[tokio::test]
async fn test_load_reads_file_written_by_hand() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("artist_feedback.json");
    std::fs::write(&path, r#"{"Radiohead": 4, "Muse": -7}"#).unwrap();

    let loaded = FeedbackManager::new(path).load().await.unwrap();
    assert_eq!(loaded.get("Radiohead"), Some(&4));
    assert_eq!(loaded.get("Muse"), Some(&-7));
}

#[tokio::test]
async fn test_load_malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("artist_feedback.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FeedbackManager::new(path).load().await.unwrap_err();
    assert!(matches!(err, FeedbackError::SerdeError(_)));
}

#[tokio::test]
async fn test_reset_removes_file_and_tolerates_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("artist_feedback.json");
    let store = FeedbackManager::new(path.clone());

    store.reset().await.unwrap();

    store
        .persist(&FeedbackMap::from([("A".to_string(), 1)]))
        .await
        .unwrap();
    store.reset().await.unwrap();
    assert!(!path.exists());
    assert!(store.load().await.unwrap().is_empty());
}
