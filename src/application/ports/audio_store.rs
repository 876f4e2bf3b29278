use async_trait::async_trait;

use crate::domain::StoragePath;

#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, AudioStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
