use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::StoragePath;

/// In-memory store preloaded with canned objects.
#[derive(Default)]
pub struct MockAudioStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MockAudioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &StoragePath, bytes: Vec<u8>) {
        self.objects
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), bytes);
    }
}

#[async_trait::async_trait]
impl AudioStore for MockAudioStore {
    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, AudioStoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| AudioStoreError::NotFound(path.to_string()))
    }
}
