mod audio_format;
mod billing_entry;
mod pricing;
mod record_id;
mod record_status;
mod storage_path;
mod transcript;
mod voice_log;

pub use audio_format::AudioFormat;
pub use billing_entry::BillingEntry;
pub use pricing::{Pricing, TokenUsage, round5};
pub use record_id::RecordId;
pub use record_status::RecordStatus;
pub use storage_path::StoragePath;
pub use transcript::{NO_SPEECH_SENTINEL, Transcription, normalize_transcript};
pub use voice_log::VoiceLog;
