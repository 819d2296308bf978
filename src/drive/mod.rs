//! Virtual drive module for vdrive.
//!
//! This module provides the hierarchical object store including:
//! - Folders and files as nodes over a flat table
//! - Folder-aware listing and search
//! - Recursive subtree deletion
//! - Upload/download boundary with batch semantics

mod node;
mod service;
mod store;

pub use node::{Node, NodeRepository};
pub use service::{BatchReport, DriveService, UploadRequest};
pub use store::{DriveStore, DriveUsage};

/// Identifier of the virtual root folder.
///
/// The root always exists and is never persisted as a real node.
pub const ROOT_ID: &str = "root";

/// Maximum length for node names (in characters).
pub const MAX_NAME_LENGTH: usize = 255;

/// Default maximum upload size (10MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
