//! Node types and repository for the vdrive node table.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::Result;

use super::ROOT_ID;

/// A node in the drive: either a folder or a file.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Node {
    /// Unique node ID (UUID v4), assigned at creation.
    pub id: String,
    /// ID of the containing folder, or [`ROOT_ID`] for top-level nodes.
    pub parent_id: String,
    /// Display name. Siblings may share a name.
    pub name: String,
    /// Discriminator between folders and files, fixed at creation.
    pub is_folder: bool,
    /// Byte length of the content for files; 0 for folders.
    pub size: i64,
    /// MIME type for files; `None` for folders.
    pub mime_type: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Raw payload for files; `None` for folders and for metadata-only reads.
    pub content: Option<Vec<u8>>,
}

impl Node {
    /// Build a fresh file node with a generated id and current timestamp.
    pub(crate) fn new_file(
        parent_id: impl Into<String>,
        name: impl Into<String>,
        mime_type: Option<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            parent_id: parent_id.into(),
            name: name.into(),
            is_folder: false,
            size: content.len() as i64,
            mime_type,
            created_at: Utc::now().timestamp_millis(),
            content: Some(content),
        }
    }

    /// Build a fresh folder node with a generated id and current timestamp.
    pub(crate) fn new_folder(parent_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            parent_id: parent_id.into(),
            name: name.into(),
            is_folder: true,
            size: 0,
            mime_type: None,
            created_at: Utc::now().timestamp_millis(),
            content: None,
        }
    }

    /// True for nodes sitting directly under the virtual root.
    pub fn is_top_level(&self) -> bool {
        self.parent_id == ROOT_ID
    }
}

/// Columns fetched for listings and aggregation: full row minus the payload.
const META_COLUMNS: &str =
    "id, parent_id, name, is_folder, size, mime_type, created_at, NULL AS content";

/// Repository for node persistence.
///
/// One logical table keyed by `id`, with a non-unique secondary index on
/// `parent_id`. Every operation is a single statement; cross-call atomicity
/// is explicitly not provided.
pub struct NodeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NodeRepository<'a> {
    /// Create a new NodeRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new node keyed by its id.
    ///
    /// An id collision surfaces as `DuplicateKey`; a rejected write on a
    /// full medium surfaces as `StorageFull`.
    pub async fn insert(&self, node: &Node) -> Result<()> {
        sqlx::query(
            "INSERT INTO nodes (id, parent_id, name, is_folder, size, mime_type, created_at, content)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&node.id)
        .bind(&node.parent_id)
        .bind(&node.name)
        .bind(node.is_folder)
        .bind(node.size)
        .bind(&node.mime_type)
        .bind(node.created_at)
        .bind(&node.content)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Get a node by ID, payload included.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Node>> {
        let node = sqlx::query_as::<_, Node>(
            "SELECT id, parent_id, name, is_folder, size, mime_type, created_at, content
             FROM nodes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(node)
    }

    /// List all nodes under a parent via the secondary index.
    ///
    /// Payloads are omitted and no ordering is guaranteed; ordering is the
    /// store's concern.
    pub async fn list_by_parent(&self, parent_id: &str) -> Result<Vec<Node>> {
        let query = format!("SELECT {META_COLUMNS} FROM nodes WHERE parent_id = ?");

        let nodes = sqlx::query_as::<_, Node>(&query)
            .bind(parent_id)
            .fetch_all(self.pool)
            .await?;

        Ok(nodes)
    }

    /// List every node in the store, payloads omitted.
    pub async fn list_all(&self) -> Result<Vec<Node>> {
        let query = format!("SELECT {META_COLUMNS} FROM nodes");

        let nodes = sqlx::query_as::<_, Node>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(nodes)
    }

    /// Delete at most one node by ID.
    ///
    /// Returns `false` when the id is unknown; a missing node is not an
    /// error.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM nodes WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all nodes in the store.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM nodes")
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }

    /// Count the direct children of a parent.
    pub async fn count_by_parent(&self, parent_id: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM nodes WHERE parent_id = ?")
            .bind(parent_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }
}
