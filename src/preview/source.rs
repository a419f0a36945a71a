//! Filesystem-backed photo source

use super::error::PreviewError;
use super::traits::PhotoSource;
use async_trait::async_trait;
use std::path::Path;

/// Reads photos from the local filesystem with `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPhotoSource;

#[async_trait]
impl PhotoSource for FsPhotoSource {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, PreviewError> {
        tokio::fs::read(path).await.map_err(|e| PreviewError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
