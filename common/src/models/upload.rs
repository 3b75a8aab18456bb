//! Upload model.
//!
//! A single database file picked by the user, sent as the multipart field `db`.

use std::path::Path;

use validator::{Validate, ValidationError};

use crate::errors::{AppError, AppResult};

/// File extensions the service accepts.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["db", "csv", "txt"];

/// A file handle chosen for upload.
#[derive(Clone, PartialEq, Eq, Validate)]
pub struct UploadFile {
    /// File name as sent in the multipart part.
    #[validate(
        length(min = 1, max = 255, message = "File name must be 1-255 characters"),
        custom(function = "validate_extension")
    )]
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Creates an upload from in-memory contents.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, keeping only its final path component as name.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::Validation(format!("invalid file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Validation(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(Self { file_name, bytes })
    }

    /// Validates the file before it is sent.
    ///
    /// # Errors
    /// Returns `AppError::Validation` with the first failing rule's message.
    pub fn check(&self) -> AppResult<()> {
        self.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| errors.to_string());
            AppError::Validation(message)
        })
    }

    /// Size of the file in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Contents can be megabytes; keep them out of log lines.
impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn validate_extension(file_name: &str) -> Result<(), ValidationError> {
    let allowed = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext))
        .unwrap_or(false);
    if allowed {
        Ok(())
    } else {
        let mut err = ValidationError::new("extension");
        err.message = Some("extension error: only accept .db, .csv and .txt".into());
        Err(err)
    }
}
