use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::application::ports::{Transcriber, TranscriberError};
use crate::domain::{AudioFormat, TokenUsage, Transcription};

const TRANSCRIPTION_PROMPT: &str = "Transcribe this audio recording word for word. \
Return only the literal transcript text, with no commentary, labels or formatting.";

/// The recordings are medical dictation, so every harm category is set to
/// its least restrictive threshold.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Transcription via the Gemini API: a raw media upload to the file store,
/// then a generate-content call referencing the uploaded file.
///
/// The model identifier is injected from configuration and never assumed
/// here.
pub struct GeminiTranscriber {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiTranscriber {
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: base_url
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
        }
    }

    async fn upload_audio(
        &self,
        audio: &[u8],
        format: AudioFormat,
    ) -> Result<String, TranscriberError> {
        // The upload endpoint wants a streamed body; the bytes are staged to
        // a scratch file so large recordings are not held in memory twice.
        // The guard removes the file on every exit path.
        let scratch = ScratchFile::write(audio, format).await?;

        let file = tokio::fs::File::open(scratch.path())
            .await
            .map_err(|e| TranscriberError::UploadFailed(format!("scratch open: {}", e)))?;

        let url = format!("{}/upload/v1beta/files", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("X-Goog-Upload-Protocol", "raw")
            .header(reqwest::header::CONTENT_TYPE, format.mime_type())
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await
            .map_err(|e| TranscriberError::UploadFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriberError::UploadFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let upload: FileUploadResponse = response
            .json()
            .await
            .map_err(|e| TranscriberError::InvalidResponse(format!("upload body: {}", e)))?;

        Ok(upload.file.uri)
    }

    async fn generate_transcript(
        &self,
        file_uri: &str,
        format: AudioFormat,
    ) -> Result<Transcription, TranscriberError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let safety_settings: Vec<serde_json::Value> = SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({ "category": category, "threshold": "BLOCK_NONE" }))
            .collect();

        let body = json!({
            "contents": [{
                "parts": [
                    { "text": TRANSCRIPTION_PROMPT },
                    { "file_data": { "mime_type": format.mime_type(), "file_uri": file_uri } }
                ]
            }],
            "safetySettings": safety_settings,
        });

        tracing::debug!(model = %self.model, "Sending generate-content request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriberError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriberError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let content: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranscriberError::InvalidResponse(format!("body: {}", e)))?;

        // No candidates means the model had nothing to say; an empty
        // transcript is a valid result, the caller applies the sentinel.
        let text = content
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = content
            .usage_metadata
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        Ok(Transcription { text, usage })
    }
}

#[async_trait]
impl Transcriber for GeminiTranscriber {
    async fn transcribe(
        &self,
        audio: &[u8],
        format: AudioFormat,
    ) -> Result<Transcription, TranscriberError> {
        let file_uri = self.upload_audio(audio, format).await?;
        tracing::debug!(file_uri = %file_uri, "Audio uploaded to Gemini file store");

        let transcription = self.generate_transcript(&file_uri, format).await?;

        tracing::info!(
            chars = transcription.text.len(),
            tokens_input = transcription.usage.input,
            tokens_output = transcription.usage.output,
            "Gemini transcription completed"
        );

        Ok(transcription)
    }
}

/// Scratch file that deletes itself when dropped. Removal failures are
/// logged, never escalated.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    async fn write(audio: &[u8], format: AudioFormat) -> Result<Self, TranscriberError> {
        let path = std::env::temp_dir().join(format!(
            "voicelog-{}.{}",
            Uuid::new_v4(),
            format.extension()
        ));
        tokio::fs::write(&path, audio)
            .await
            .map_err(|e| TranscriberError::UploadFailed(format!("scratch write: {}", e)))?;
        Ok(Self { path })
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove scratch file");
        }
    }
}

#[derive(Deserialize)]
struct FileUploadResponse {
    file: UploadedFile,
}

#[derive(Deserialize)]
struct UploadedFile {
    uri: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}
