//! Integration tests for the dictionary store lifecycle and on-disk format

use lingo_dict::{DictionaryEntry, DictionaryStore, DM_SCOPE};

#[tokio::test]
async fn full_lifecycle_add_search_list_remove() {
    let dir = tempfile::tempdir().unwrap();
    let store = DictionaryStore::new(dir.path().join("dictionary.json"));

    store
        .add(DictionaryEntry::new(
            "good morning",
            "좋은 아침",
            "KO",
            "100",
            "guild1",
        ))
        .await
        .unwrap();
    store
        .add(DictionaryEntry::new(
            "good night",
            "잘 자",
            "KO",
            "100",
            "guild1",
        ))
        .await
        .unwrap();
    store
        .add(DictionaryEntry::new("hello", "hallo", "DE", "200", DM_SCOPE))
        .await
        .unwrap();

    // Search only sees the invoking scope
    let results = store.search("good", "guild1", None).unwrap();
    assert_eq!(results.len(), 2);
    assert!(store.search("hello", "guild1", None).unwrap().is_empty());

    // Listing is scoped exactly
    assert_eq!(store.list_by_scope("guild1").unwrap().len(), 2);
    assert_eq!(store.list_by_scope(DM_SCOPE).unwrap().len(), 1);

    // Remove by the author
    let removed = store
        .remove("good night", "ko", "guild1", "100", false)
        .await
        .unwrap();
    assert_eq!(removed.translation, "잘 자");
    assert_eq!(store.list_by_scope("guild1").unwrap().len(), 1);
}

#[tokio::test]
async fn snapshot_file_uses_documented_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    let store = DictionaryStore::new(&path);

    store
        .add(DictionaryEntry::new(
            "Good Morning",
            "좋은 아침",
            "ko",
            "100",
            "guild1",
        ))
        .await
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    // Keys are "<lowercased original>_<UPPERCASED language>"
    let entry = &raw["good morning_KO"];
    assert_eq!(entry["original"], "Good Morning");
    assert_eq!(entry["translation"], "좋은 아침");
    assert_eq!(entry["language"], "KO");
    assert_eq!(entry["added_by"], "100");
    assert_eq!(entry["server_id"], "guild1");
}

#[tokio::test]
async fn store_reads_snapshots_written_by_other_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dictionary.json");

    // A hand-written snapshot, as another deployment would leave behind
    std::fs::write(
        &path,
        r#"{
            "hello_KO": {
                "original": "hello",
                "translation": "안녕",
                "language": "KO",
                "added_by": "7",
                "server_id": "DM"
            }
        }"#,
    )
    .unwrap();

    let store = DictionaryStore::new(&path);
    let hit = store.lookup("Hello", "ko", DM_SCOPE).unwrap().unwrap();
    assert_eq!(hit.translation, "안녕");
}
