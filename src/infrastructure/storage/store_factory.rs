use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::AudioStore;
use crate::presentation::config::{SettingsError, StorageProviderSetting, StorageSettings};

use super::local_store::LocalAudioStore;
use super::supabase_store::SupabaseAudioStore;

pub struct AudioStoreFactory;

impl AudioStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn AudioStore>, SettingsError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                let store = LocalAudioStore::new(path)
                    .map_err(|e| SettingsError::InvalidValue("LOCAL_STORAGE_PATH", e.to_string()))?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Supabase => {
                let url = settings
                    .supabase_url
                    .clone()
                    .ok_or(SettingsError::MissingVar("SUPABASE_URL"))?;
                let key = settings
                    .supabase_service_key
                    .clone()
                    .ok_or(SettingsError::MissingVar("SUPABASE_SERVICE_KEY"))?;
                Ok(Arc::new(SupabaseAudioStore::new(
                    url,
                    key,
                    settings.bucket.clone(),
                )))
            }
        }
    }
}
