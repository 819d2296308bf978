//! End-to-end tests exercising the drive through its public API.

mod common;

use common::{seed_tree, setup_db};
use vdrive::{
    DriveService, DriveStore, FixedQuota, Trail, UploadRequest, UsageMonitor, VdriveError,
    ROOT_ID, ROOT_NAME,
};

#[tokio::test]
async fn browse_seeded_tree() {
    let db = setup_db().await;
    let tree = seed_tree(&db).await;
    let store = DriveStore::new(&db);

    // Top level: folders first, then files, case-insensitive by name
    let top: Vec<String> = store
        .list_children(ROOT_ID)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(top, vec!["docs", "pics", "readme.md"]);

    let docs: Vec<String> = store
        .list_children(&tree.docs.id)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(docs, vec!["archive", "notes.txt", "report.pdf"]);

    assert_eq!(store.child_count(&tree.docs.id).await.unwrap(), 3);
    assert_eq!(store.child_count(&tree.pics.id).await.unwrap(), 1);
}

#[tokio::test]
async fn navigate_with_breadcrumbs() {
    let db = setup_db().await;
    let tree = seed_tree(&db).await;
    let store = DriveStore::new(&db);
    let mut trail = Trail::new();

    // Descend root -> docs -> archive
    trail.navigate_to(&tree.docs.id, &tree.docs.name);
    trail.navigate_to(&tree.archive.id, &tree.archive.name);
    assert_eq!(trail.len(), 3);
    assert_eq!(trail.current().name, "archive");

    let listing = store.list_children(&trail.current().id).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "old.log");

    // Ancestor click jumps back to docs
    trail.navigate_to(&tree.docs.id, &tree.docs.name);
    assert_eq!(trail.len(), 2);
    assert_eq!(trail.current().id, tree.docs.id);

    // Root click resets
    trail.navigate_to(ROOT_ID, ROOT_NAME);
    assert!(trail.is_at_root());
}

#[tokio::test]
async fn delete_folder_subtree_and_account() {
    let db = setup_db().await;
    let tree = seed_tree(&db).await;
    let store = DriveStore::new(&db);
    let monitor = UsageMonitor::new(&db, FixedQuota(10_000));

    let before = monitor.refresh().await.unwrap();
    assert_eq!(before.used_bytes, tree.total_bytes());
    assert_eq!(before.node_count, tree.total_nodes());

    // Dropping docs/ takes archive/, old.log, report.pdf and notes.txt with it
    store.delete_subtree(&tree.docs.id).await.unwrap();

    for id in [
        &tree.docs.id,
        &tree.archive.id,
        &tree.old_log.id,
        &tree.report.id,
        &tree.notes.id,
    ] {
        assert!(store.get(id).await.unwrap().is_none());
    }
    assert!(store.get(&tree.pics.id).await.unwrap().is_some());
    assert!(store.get(&tree.readme.id).await.unwrap().is_some());

    let after = monitor.refresh().await.unwrap();
    assert_eq!(after.used_bytes, 500 + 25);
    assert_eq!(after.node_count, 3);

    // Deleting the same folder again is a silent no-op
    store.delete_subtree(&tree.docs.id).await.unwrap();
    assert_eq!(monitor.refresh().await.unwrap().node_count, 3);
}

#[tokio::test]
async fn upload_download_export_round_trip() {
    let db = setup_db().await;
    let tree = seed_tree(&db).await;
    let service = DriveService::new(&db);
    let temp_dir = tempfile::TempDir::new().unwrap();

    let uploaded = service
        .upload(&UploadRequest::new(
            &tree.pics.id,
            "dog.jpg",
            vec![0xFF, 0xD8, 0xFF],
        ))
        .await
        .unwrap();
    assert_eq!(uploaded.mime_type, Some("image/jpeg".to_string()));

    let downloaded = service.download(&uploaded.id).await.unwrap();
    assert_eq!(downloaded.content, Some(vec![0xFF, 0xD8, 0xFF]));

    let path = service.export(&uploaded.id, temp_dir.path()).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), vec![0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn batch_upload_partial_failure_keeps_siblings() {
    let db = setup_db().await;
    let service = DriveService::new(&db).with_max_file_size(64);
    let store = DriveStore::new(&db);

    let report = service
        .upload_batch(&[
            UploadRequest::new(ROOT_ID, "small-1.txt", vec![1u8; 10]),
            UploadRequest::new(ROOT_ID, "huge.bin", vec![1u8; 1000]),
            UploadRequest::new(ROOT_ID, "small-2.txt", vec![1u8; 20]),
        ])
        .await;

    assert_eq!(report.stored.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].1, VdriveError::Validation(_)));

    let names: Vec<String> = store
        .list_children(ROOT_ID)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(names, vec!["small-1.txt", "small-2.txt"]);
}

#[tokio::test]
async fn search_within_folder() {
    let db = setup_db().await;
    let tree = seed_tree(&db).await;
    let store = DriveStore::new(&db);

    let hits: Vec<String> = store
        .search(&tree.docs.id, "AR")
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.name)
        .collect();

    // "archive" (folder) sorts before any matching files would
    assert_eq!(hits, vec!["archive"]);

    let none = store.search(&tree.docs.id, "zzz").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn quota_display_clamps_at_100_percent() {
    let db = setup_db().await;
    let tree = seed_tree(&db).await;

    let monitor = UsageMonitor::new(&db, FixedQuota(100));
    let report = monitor.refresh().await.unwrap();

    assert!(report.used_bytes > report.quota_bytes);
    assert_eq!(report.percent, 100.0);
    assert_eq!(report.used_bytes, tree.total_bytes());
}

#[tokio::test]
async fn persists_across_reopen() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("drive.db");

    let file_id = {
        let db = vdrive::Database::open(&db_path).await.unwrap();
        let service = DriveService::new(&db);
        let node = service
            .upload(&UploadRequest::new(ROOT_ID, "persist.txt", b"kept".to_vec()))
            .await
            .unwrap();
        db.close().await;
        node.id
    };

    let db = vdrive::Database::open(&db_path).await.unwrap();
    let service = DriveService::new(&db);
    let node = service.download(&file_id).await.unwrap();

    assert_eq!(node.content, Some(b"kept".to_vec()));
    db.close().await;
}
