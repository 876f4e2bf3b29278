use std::sync::Arc;

use crate::application::ports::Transcriber;
use crate::presentation::config::{InferenceModeSetting, InferenceSettings, SettingsError};

use super::disabled_transcriber::DisabledTranscriber;
use super::gemini_transcriber::GeminiTranscriber;

pub struct TranscriberFactory;

impl TranscriberFactory {
    pub fn create(settings: &InferenceSettings) -> Result<Arc<dyn Transcriber>, SettingsError> {
        match settings.mode {
            InferenceModeSetting::Live => {
                let api_key = settings
                    .api_key
                    .clone()
                    .ok_or(SettingsError::MissingVar("GEMINI_API_KEY"))?;
                Ok(Arc::new(GeminiTranscriber::new(
                    api_key,
                    settings.model.clone(),
                    settings.base_url.clone(),
                )))
            }
            InferenceModeSetting::Disabled => Ok(Arc::new(DisabledTranscriber)),
        }
    }
}
