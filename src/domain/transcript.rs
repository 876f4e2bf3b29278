use super::TokenUsage;

/// Stored in place of the transcript when the model returns a blank answer.
/// A silent recording is a successful run, not an error.
pub const NO_SPEECH_SENTINEL: &str = "[no speech detected]";

/// Raw result of one inference call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    pub text: String,
    pub usage: TokenUsage,
}

/// Replace a blank model answer with the sentinel, trim everything else.
pub fn normalize_transcript(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NO_SPEECH_SENTINEL.to_string()
    } else {
        trimmed.to_string()
    }
}
