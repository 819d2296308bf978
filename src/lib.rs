//! vdrive - embeddable virtual drive.
//!
//! A hierarchical file/folder store backed by a local SQLite database. The
//! tree is modeled over a flat node table with a secondary index from
//! parent to children, with folder-aware listing and search, recursive
//! subtree deletion, batch upload, breadcrumb navigation state, and usage
//! accounting against an advisory quota.

pub mod config;
pub mod db;
pub mod drive;
pub mod error;
pub mod logging;
pub mod nav;
pub mod usage;

pub use config::Config;
pub use db::Database;
pub use drive::{
    BatchReport, DriveService, DriveStore, DriveUsage, Node, NodeRepository, UploadRequest,
    DEFAULT_MAX_FILE_SIZE, MAX_NAME_LENGTH, ROOT_ID,
};
pub use error::{Result, VdriveError};
pub use nav::{Crumb, Trail, ROOT_NAME};
pub use usage::{
    FixedQuota, NoQuota, QuotaSource, UsageMonitor, UsageReport, DEFAULT_QUOTA_BYTES,
};
