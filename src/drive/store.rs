//! Hierarchical object store for vdrive.
//!
//! The tree is not a first-class structure in the backend; it is derived
//! from the parent index on a flat table. This module implements the tree
//! semantics on top of it:
//! - Deterministic folders-first child listing
//! - Case-insensitive name search
//! - Worklist-based recursive subtree deletion
//! - Whole-store usage aggregation

use std::cmp::Ordering;

use tracing::debug;

use crate::db::Database;
use crate::Result;

use super::node::{Node, NodeRepository};

/// Aggregate usage across the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveUsage {
    /// Total bytes across file nodes. Folders contribute 0.
    pub used_bytes: u64,
    /// Number of persisted nodes, folders included.
    pub node_count: u64,
}

/// Domain layer over the node table.
///
/// Holds a borrowed [`Database`] handle; multiple stores over the same
/// handle address the same physical data and observe each other's writes
/// immediately.
pub struct DriveStore<'a> {
    db: &'a Database,
}

impl<'a> DriveStore<'a> {
    /// Create a new DriveStore over the given database.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> NodeRepository<'_> {
        NodeRepository::new(self.db.pool())
    }

    /// Create a file node under a parent folder.
    ///
    /// Side effect: exactly one insert. The returned node still carries its
    /// content.
    pub async fn create_file(
        &self,
        parent_id: &str,
        name: &str,
        mime_type: Option<&str>,
        content: Vec<u8>,
    ) -> Result<Node> {
        let node = Node::new_file(parent_id, name, mime_type.map(str::to_string), content);
        self.repo().insert(&node).await?;
        debug!(id = %node.id, parent_id, name, size = node.size, "created file");
        Ok(node)
    }

    /// Create a folder node under a parent folder.
    pub async fn create_folder(&self, parent_id: &str, name: &str) -> Result<Node> {
        let node = Node::new_folder(parent_id, name);
        self.repo().insert(&node).await?;
        debug!(id = %node.id, parent_id, name, "created folder");
        Ok(node)
    }

    /// Get a node by ID, payload included.
    pub async fn get(&self, id: &str) -> Result<Option<Node>> {
        self.repo().get_by_id(id).await
    }

    /// List the children of a folder in display order.
    ///
    /// Folders sort before files; within each group names compare
    /// case-insensitively. The order is total, so equal inputs always
    /// produce the same sequence. Listing the children of a file id
    /// returns an empty vec.
    pub async fn list_children(&self, parent_id: &str) -> Result<Vec<Node>> {
        let mut children = self.repo().list_by_parent(parent_id).await?;
        children.sort_by(sibling_order);
        Ok(children)
    }

    /// Filter the children of a folder by a case-insensitive substring
    /// match on `name`, preserving the listing order.
    ///
    /// An empty query returns the full listing.
    pub async fn search(&self, parent_id: &str, query: &str) -> Result<Vec<Node>> {
        let needle = query.to_lowercase();
        let mut children = self.list_children(parent_id).await?;
        children.retain(|node| node.name.to_lowercase().contains(&needle));
        Ok(children)
    }

    /// Delete a node and, for folders, its entire subtree.
    ///
    /// A missing id is a silent no-op, which also makes the operation
    /// idempotent. Traversal uses an explicit worklist instead of call
    /// recursion, so arbitrarily deep trees cannot exhaust the stack. The
    /// schedule lists every parent before its descendants; deleting it in
    /// reverse removes each child before its parent. Deletions run
    /// sequentially to keep backend transaction scope small; a crash
    /// mid-way can leave a partial subtree (single-statement atomicity
    /// only).
    ///
    /// Callers must never route the root sentinel into this operation.
    pub async fn delete_subtree(&self, id: &str) -> Result<()> {
        let repo = self.repo();

        let Some(node) = repo.get_by_id(id).await? else {
            return Ok(());
        };

        let mut pending = vec![(node.id.clone(), node.is_folder)];
        let mut schedule = Vec::new();

        while let Some((node_id, is_folder)) = pending.pop() {
            if is_folder {
                for child in repo.list_by_parent(&node_id).await? {
                    pending.push((child.id, child.is_folder));
                }
            }
            schedule.push(node_id);
        }

        let removed = schedule.len();
        for node_id in schedule.iter().rev() {
            repo.delete(node_id).await?;
        }

        debug!(id, removed, "deleted subtree");
        Ok(())
    }

    /// Aggregate stored bytes and node count across the whole store.
    ///
    /// Only file nodes contribute bytes; folder sizes are a fixed 0.
    pub async fn aggregate_usage(&self) -> Result<DriveUsage> {
        let nodes = self.repo().list_all().await?;

        let used_bytes = nodes
            .iter()
            .filter(|node| !node.is_folder)
            .map(|node| node.size.max(0) as u64)
            .sum();

        Ok(DriveUsage {
            used_bytes,
            node_count: nodes.len() as u64,
        })
    }

    /// Number of direct children of a folder.
    ///
    /// This is the figure a UI shows as a folder's "size"; byte totals come
    /// only from [`aggregate_usage`](Self::aggregate_usage).
    pub async fn child_count(&self, parent_id: &str) -> Result<u64> {
        Ok(self.repo().count_by_parent(parent_id).await? as u64)
    }
}

/// Total sibling order: folders first, then case-insensitive name, with the
/// exact name and the id as deterministic tie-breaks.
fn sibling_order(a: &Node, b: &Node) -> Ordering {
    b.is_folder
        .cmp(&a.is_folder)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
