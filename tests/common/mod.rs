//! Test helpers for vdrive integration tests.

use vdrive::{Database, DriveStore, Node, ROOT_ID};

/// Open a fresh in-memory database.
pub async fn setup_db() -> Database {
    Database::open_in_memory().await.unwrap()
}

/// Handles to the nodes of the seeded tree.
///
/// ```text
/// root
/// ├── docs/
/// │   ├── archive/
/// │   │   └── old.log      (40 bytes)
/// │   ├── report.pdf       (100 bytes)
/// │   └── notes.txt        (250 bytes)
/// ├── pics/
/// │   └── cat.png          (500 bytes)
/// └── readme.md            (25 bytes)
/// ```
pub struct SeededTree {
    pub docs: Node,
    pub archive: Node,
    pub old_log: Node,
    pub report: Node,
    pub notes: Node,
    pub pics: Node,
    pub cat: Node,
    pub readme: Node,
}

impl SeededTree {
    /// Total bytes across the seeded files.
    pub fn total_bytes(&self) -> u64 {
        40 + 100 + 250 + 500 + 25
    }

    /// Total node count, folders included.
    pub fn total_nodes(&self) -> u64 {
        8
    }
}

/// Build the seeded tree in the given database.
pub async fn seed_tree(db: &Database) -> SeededTree {
    let store = DriveStore::new(db);

    let docs = store.create_folder(ROOT_ID, "docs").await.unwrap();
    let archive = store.create_folder(&docs.id, "archive").await.unwrap();
    let old_log = store
        .create_file(&archive.id, "old.log", Some("text/plain"), vec![0u8; 40])
        .await
        .unwrap();
    let report = store
        .create_file(&docs.id, "report.pdf", Some("application/pdf"), vec![0u8; 100])
        .await
        .unwrap();
    let notes = store
        .create_file(&docs.id, "notes.txt", Some("text/plain"), vec![0u8; 250])
        .await
        .unwrap();
    let pics = store.create_folder(ROOT_ID, "pics").await.unwrap();
    let cat = store
        .create_file(&pics.id, "cat.png", Some("image/png"), vec![0u8; 500])
        .await
        .unwrap();
    let readme = store
        .create_file(ROOT_ID, "readme.md", Some("text/markdown"), vec![0u8; 25])
        .await
        .unwrap();

    SeededTree {
        docs,
        archive,
        old_log,
        report,
        notes,
        pics,
        cat,
        readme,
    }
}
