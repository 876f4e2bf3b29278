use std::path::Path;

/// Container format of an uploaded recording, inferred from the storage path
/// suffix. Detection is total: an unrecognized or missing suffix falls
/// through to webm, which is what browser recorders produce by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp4,
    M4a,
    Mp3,
    Wav,
    Ogg,
    Webm,
}

impl AudioFormat {
    pub fn from_path(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("mp4") => AudioFormat::Mp4,
            Some("m4a") => AudioFormat::M4a,
            Some("mp3") => AudioFormat::Mp3,
            Some("wav") => AudioFormat::Wav,
            Some("ogg") => AudioFormat::Ogg,
            _ => AudioFormat::Webm,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp4 | AudioFormat::M4a => "audio/mp4",
            AudioFormat::Mp3 => "audio/mp3",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Webm => "audio/webm",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp4 => "mp4",
            AudioFormat::M4a => "m4a",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Webm => "webm",
        }
    }
}
