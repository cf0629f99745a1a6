//! Photo service upload clients
//!
//! The two external delivery targets (Google Photos and PhotoPrism) sit
//! behind the [`Uploader`] trait so the runner can treat them as opaque
//! capabilities and tests can inject failing ones. The shipped clients log
//! the upload and report success; the actual API calls are not wired yet.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// Errors an upload collaborator can report
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rejected by service: {0}")]
    Rejected(String),
}

/// An external photo service that accepts a file into a named album
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Service name used in log lines and task details
    fn service(&self) -> &str;

    /// Hand one file to the service for the given album
    async fn upload(&self, file: &Path, album: &str) -> Result<(), UploadError>;
}

/// Google Photos upload client
#[derive(Debug, Default)]
pub struct GooglePhotosUploader;

impl GooglePhotosUploader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Uploader for GooglePhotosUploader {
    fn service(&self) -> &str {
        "Google Photos"
    }

    async fn upload(&self, file: &Path, album: &str) -> Result<(), UploadError> {
        // TODO: call the Photos Library API here once OAuth credentials are wired in
        info!(file = %file.display(), album, "uploading to Google Photos");
        Ok(())
    }
}

/// PhotoPrism upload client
#[derive(Debug, Default)]
pub struct PhotoPrismUploader;

impl PhotoPrismUploader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Uploader for PhotoPrismUploader {
    fn service(&self) -> &str {
        "PhotoPrism"
    }

    async fn upload(&self, file: &Path, album: &str) -> Result<(), UploadError> {
        // TODO: POST to the PhotoPrism import endpoint once the instance URL is configurable
        info!(file = %file.display(), album, "uploading to PhotoPrism");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_uploaders_accept_files() {
        let google = GooglePhotosUploader::new();
        let prism = PhotoPrismUploader::new();

        assert!(google.upload(Path::new("/photos/a.jpg"), "2024").await.is_ok());
        assert!(prism.upload(Path::new("/photos/a.jpg"), "2024").await.is_ok());
        assert_eq!(google.service(), "Google Photos");
        assert_eq!(prism.service(), "PhotoPrism");
    }
}
