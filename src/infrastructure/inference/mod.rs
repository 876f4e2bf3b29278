mod disabled_transcriber;
mod gemini_transcriber;
mod transcriber_factory;

pub use disabled_transcriber::{DISABLED_TRANSCRIPT_MARKER, DisabledTranscriber};
pub use gemini_transcriber::GeminiTranscriber;
pub use transcriber_factory::TranscriberFactory;
