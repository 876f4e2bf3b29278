use async_trait::async_trait;

use crate::application::ports::{Transcriber, TranscriberError};
use crate::domain::{AudioFormat, TokenUsage, Transcription};

pub const DISABLED_TRANSCRIPT_MARKER: &str =
    "[transcription disabled: no inference credential configured]";

/// Explicit stub mode for environments without an inference credential.
///
/// Returns a fixed marker transcript with zero usage, so nothing is ever
/// billed. This replaces the original's trick of threading a placeholder
/// API key into a real client.
pub struct DisabledTranscriber;

#[async_trait]
impl Transcriber for DisabledTranscriber {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _format: AudioFormat,
    ) -> Result<Transcription, TranscriberError> {
        tracing::warn!("Inference is disabled, returning marker transcript");
        Ok(Transcription {
            text: DISABLED_TRANSCRIPT_MARKER.to_string(),
            usage: TokenUsage::default(),
        })
    }
}
