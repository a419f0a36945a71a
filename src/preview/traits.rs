//! Trait abstraction for reading photo bytes to enable mocking in tests

use super::error::PreviewError;
use async_trait::async_trait;
use std::path::Path;

/// Source of raw photo bytes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Read the whole file at `path`
    async fn read(&self, path: &Path) -> Result<Vec<u8>, PreviewError>;
}
