use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{RecordId, RecordStatus, StoragePath};

/// One submitted audio artifact and its processing state.
///
/// `transcript`, token counts and `cost_credits` are written together in a
/// single update when a run completes; readers never observe a partial
/// result.
#[derive(Debug, Clone)]
pub struct VoiceLog {
    pub id: RecordId,
    pub user_id: Uuid,
    pub audio_path: StoragePath,
    pub status: RecordStatus,
    pub transcript: Option<String>,
    pub tokens_input: u64,
    pub tokens_output: u64,
    pub cost_credits: f64,
    pub duration_seconds: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VoiceLog {
    pub fn new(user_id: Uuid, audio_path: StoragePath, duration_seconds: i32) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            user_id,
            audio_path,
            status: RecordStatus::Pending,
            transcript: None,
            tokens_input: 0,
            tokens_output: 0,
            cost_credits: 0.0,
            duration_seconds,
            created_at: now,
            updated_at: now,
        }
    }
}
