//! Drive service for vdrive.
//!
//! This module provides the upload/download boundary over the store:
//! - Upload with validation, single and batch
//! - Download with content
//! - Export of file content to the host filesystem

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::db::Database;
use crate::{Result, VdriveError};

use super::node::Node;
use super::store::DriveStore;
use super::{DEFAULT_MAX_FILE_SIZE, MAX_NAME_LENGTH, ROOT_ID};

/// Request data for a file upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Folder to upload into ([`ROOT_ID`] for the top level).
    pub parent_id: String,
    /// Original filename.
    pub filename: String,
    /// MIME type; inferred from the filename when `None`.
    pub mime_type: Option<String>,
    /// File content.
    pub content: Vec<u8>,
}

impl UploadRequest {
    /// Create a new upload request.
    pub fn new(
        parent_id: impl Into<String>,
        filename: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            parent_id: parent_id.into(),
            filename: filename.into(),
            mime_type: None,
            content,
        }
    }

    /// Set the MIME type explicitly.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Outcome of a batch upload.
///
/// One failing blob never aborts the rest of the batch; blobs stored before
/// a failure stay committed.
#[derive(Debug)]
pub struct BatchReport {
    /// Nodes stored, in request order.
    pub stored: Vec<Node>,
    /// Filenames that failed, each with the error that stopped it.
    pub failures: Vec<(String, VdriveError)>,
}

impl BatchReport {
    /// True when every blob in the batch was stored.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// High-level drive operations with validation.
pub struct DriveService<'a> {
    db: &'a Database,
    max_file_size: u64,
}

impl<'a> DriveService<'a> {
    /// Create a new DriveService.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Create a new DriveService with a custom max file size.
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Get the configured max file size.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    fn store(&self) -> DriveStore<'_> {
        DriveStore::new(self.db)
    }

    /// Upload a single file.
    ///
    /// # Validation
    /// - Filename: non-empty, max 255 characters
    /// - File size: max configured size (default 10MB)
    /// - Target: the root or an existing folder
    ///
    /// A missing MIME type is inferred from the filename extension, falling
    /// back to `application/octet-stream`.
    pub async fn upload(&self, request: &UploadRequest) -> Result<Node> {
        validate_name(&request.filename)?;

        if request.content.len() as u64 > self.max_file_size {
            return Err(VdriveError::Validation(format!(
                "file exceeds the {} byte upload limit",
                self.max_file_size
            )));
        }

        self.ensure_folder(&request.parent_id).await?;

        let mime_type = match &request.mime_type {
            Some(mime) => mime.clone(),
            None => mime_guess::from_path(&request.filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };

        let node = self
            .store()
            .create_file(
                &request.parent_id,
                &request.filename,
                Some(&mime_type),
                request.content.clone(),
            )
            .await?;

        debug!(filename = %request.filename, size = node.size, "uploaded file");
        Ok(node)
    }

    /// Upload a batch of files.
    ///
    /// Blobs are attempted independently and sequentially; failures are
    /// collected per filename while the rest of the batch proceeds.
    pub async fn upload_batch(&self, requests: &[UploadRequest]) -> BatchReport {
        let mut report = BatchReport {
            stored: Vec::new(),
            failures: Vec::new(),
        };

        for request in requests {
            match self.upload(request).await {
                Ok(node) => report.stored.push(node),
                Err(e) => {
                    warn!(filename = %request.filename, error = %e, "upload failed, continuing batch");
                    report.failures.push((request.filename.clone(), e));
                }
            }
        }

        report
    }

    /// Create a folder after the same validation gate as uploads.
    pub async fn create_folder(&self, parent_id: &str, name: &str) -> Result<Node> {
        validate_name(name)?;
        self.ensure_folder(parent_id).await?;
        self.store().create_folder(parent_id, name).await
    }

    /// Fetch a file node with its content.
    ///
    /// A missing id is `NotFound`; a folder id is a validation error.
    pub async fn download(&self, file_id: &str) -> Result<Node> {
        let node = self
            .store()
            .get(file_id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("file".to_string()))?;

        if node.is_folder {
            return Err(VdriveError::Validation(
                "cannot download a folder".to_string(),
            ));
        }

        Ok(node)
    }

    /// Write a file node's content to `dest` on the host filesystem.
    ///
    /// When `dest` is a directory the node name is joined onto it. Returns
    /// the path written.
    pub async fn export(&self, file_id: &str, dest: impl AsRef<Path>) -> Result<PathBuf> {
        let node = self.download(file_id).await?;

        let mut path = dest.as_ref().to_path_buf();
        if path.is_dir() {
            path = path.join(&node.name);
        }

        let content = node.content.as_deref().unwrap_or_default();
        tokio::fs::write(&path, content).await?;

        debug!(file_id, path = %path.display(), "exported file");
        Ok(path)
    }

    async fn ensure_folder(&self, parent_id: &str) -> Result<()> {
        if parent_id == ROOT_ID {
            return Ok(());
        }

        match self.store().get(parent_id).await? {
            Some(node) if node.is_folder => Ok(()),
            Some(_) => Err(VdriveError::Validation(
                "upload target is not a folder".to_string(),
            )),
            None => Err(VdriveError::NotFound("folder".to_string())),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VdriveError::Validation("name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(VdriveError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}
