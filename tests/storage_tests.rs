/// On-disk storage tests
///
/// Run with: cargo test --test storage_tests
use ephi::storage::{
    BlobStore, FileLocalStore, FsBlobStore, LocalStore, PROGRESS_BLOB, PROGRESS_KEY,
    read_local_progress, write_local_progress,
};
use ephi::{ProgressRecord, ProgressSet};
use tempfile::TempDir;

#[test]
fn test_local_progress_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("local");

    {
        let store = FileLocalStore::new(&data_dir);
        assert!(read_local_progress(&store).unwrap().is_empty());
        write_local_progress(&store, &ProgressSet::from([3, 1, 2])).unwrap();
    }

    let reopened = FileLocalStore::new(&data_dir);
    assert_eq!(read_local_progress(&reopened).unwrap().to_vec(), vec![1, 2, 3]);

    let on_disk = std::fs::read_to_string(data_dir.join(format!("{PROGRESS_KEY}.json"))).unwrap();
    assert_eq!(on_disk, "[1,2,3]");
}

#[test]
fn test_local_overwrite_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileLocalStore::new(temp_dir.path());

    write_local_progress(&store, &ProgressSet::from([1])).unwrap();
    write_local_progress(&store, &ProgressSet::new()).unwrap();

    assert_eq!(store.get(PROGRESS_KEY).unwrap().as_deref(), Some("[]"));
    let names: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![format!("{PROGRESS_KEY}.json")]);
}

#[test]
fn test_corrupt_local_file_reads_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(format!("{PROGRESS_KEY}.json")), "[1, 2").unwrap();

    let store = FileLocalStore::new(temp_dir.path());
    assert!(read_local_progress(&store).unwrap().is_empty());
}

#[tokio::test]
async fn test_fs_blob_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let blobs = FsBlobStore::new(temp_dir.path().join("blobs"));

    assert!(blobs.get(PROGRESS_BLOB).await.unwrap().is_none());
    assert!(!blobs.delete(PROGRESS_BLOB).await.unwrap());

    let record = ProgressRecord {
        completed_days: vec![1, 5],
    };
    let info = blobs
        .put(PROGRESS_BLOB, serde_json::to_vec(&record).unwrap())
        .await
        .unwrap();
    assert_eq!(info.pathname, PROGRESS_BLOB);
    assert!(info.url.starts_with("file://"));
    assert!(info.url.ends_with(PROGRESS_BLOB));

    let bytes = blobs.get(PROGRESS_BLOB).await.unwrap().unwrap();
    let stored: ProgressRecord = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stored, record);

    assert!(blobs.delete(PROGRESS_BLOB).await.unwrap());
    assert!(blobs.get(PROGRESS_BLOB).await.unwrap().is_none());
}

#[tokio::test]
async fn test_fs_blob_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("blobs");

    FsBlobStore::new(&root)
        .put(PROGRESS_BLOB, br#"{"completedDays":[2]}"#.to_vec())
        .await
        .unwrap();

    let reopened = FsBlobStore::new(&root);
    assert_eq!(
        reopened.get(PROGRESS_BLOB).await.unwrap().unwrap(),
        br#"{"completedDays":[2]}"#.to_vec()
    );
}

#[tokio::test]
async fn test_fs_blob_rejects_escaping_pathnames() {
    let temp_dir = TempDir::new().unwrap();
    let blobs = FsBlobStore::new(temp_dir.path());

    assert!(blobs.put("../outside.json", b"{}".to_vec()).await.is_err());
    assert!(blobs.get("..").await.is_err());
    assert!(!temp_dir.path().parent().unwrap().join("outside.json").exists());
}
