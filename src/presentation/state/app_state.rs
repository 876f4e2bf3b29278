use std::sync::Arc;

use crate::application::ports::{AudioStore, RecordRepository, Transcriber};
use crate::application::services::TranscriptionService;

pub struct AppState<A: ?Sized, T: ?Sized>
where
    A: AudioStore,
    T: Transcriber,
{
    pub transcription_service: Arc<TranscriptionService<A, T>>,
    pub record_repository: Arc<dyn RecordRepository>,
}

impl<A: ?Sized, T: ?Sized> Clone for AppState<A, T>
where
    A: AudioStore,
    T: Transcriber,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
            record_repository: Arc::clone(&self.record_repository),
        }
    }
}
