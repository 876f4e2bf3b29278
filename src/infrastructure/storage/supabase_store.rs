use async_trait::async_trait;
use reqwest::StatusCode;

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::StoragePath;

/// Downloads audio objects from the hosted Supabase bucket over its storage
/// REST API, authenticated with the service-role key.
pub struct SupabaseAudioStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseAudioStore {
    pub fn new(base_url: String, service_key: String, bucket: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        }
    }

    fn object_url(&self, path: &StoragePath) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            path.as_str()
        )
    }
}

#[async_trait]
impl AudioStore for SupabaseAudioStore {
    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, AudioStoreError> {
        let response = self
            .client
            .get(self.object_url(path))
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| AudioStoreError::DownloadFailed(format!("request: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AudioStoreError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AudioStoreError::DownloadFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioStoreError::DownloadFailed(format!("body: {}", e)))?;
        tracing::debug!(path = %path, bytes = bytes.len(), "Audio object downloaded");
        Ok(bytes.to_vec())
    }
}
