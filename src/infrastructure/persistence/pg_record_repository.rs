use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{
    ClaimOutcome, RecordRepository, RepositoryError, TranscriptionResult,
};
use crate::domain::{RecordId, RecordStatus, StoragePath, VoiceLog};

const RECORD_COLUMNS: &str = "id, user_id, audio_path, status, transcript, \
tokens_input, tokens_output, cost_credits, duration_seconds, created_at, updated_at";

// Same columns qualified for the claim update, which joins the pre-claim row.
const CLAIMED_COLUMNS: &str = "v.id, v.user_id, v.audio_path, v.status, v.transcript, \
v.tokens_input, v.tokens_output, v.cost_credits, v.duration_seconds, v.created_at, v.updated_at";

pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_record(row: &PgRow) -> Result<VoiceLog, RepositoryError> {
    let map_err = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());

    let status: String = row.try_get("status").map_err(map_err)?;
    let status = status.parse::<RecordStatus>().map_err(RepositoryError::QueryFailed)?;
    let audio_path: String = row.try_get("audio_path").map_err(map_err)?;
    let tokens_input: i64 = row.try_get("tokens_input").map_err(map_err)?;
    let tokens_output: i64 = row.try_get("tokens_output").map_err(map_err)?;

    Ok(VoiceLog {
        id: RecordId::from_uuid(row.try_get::<Uuid, _>("id").map_err(map_err)?),
        user_id: row.try_get("user_id").map_err(map_err)?,
        audio_path: StoragePath::from_raw(audio_path),
        status,
        transcript: row.try_get("transcript").map_err(map_err)?,
        tokens_input: tokens_input.max(0) as u64,
        tokens_output: tokens_output.max(0) as u64,
        cost_credits: row.try_get("cost_credits").map_err(map_err)?,
        duration_seconds: row.try_get("duration_seconds").map_err(map_err)?,
        created_at: row.try_get("created_at").map_err(map_err)?,
        updated_at: row.try_get("updated_at").map_err(map_err)?,
    })
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    #[instrument(skip(self), fields(record_id = %id))]
    async fn get_by_id(&self, id: RecordId) -> Result<Option<VoiceLog>, RepositoryError> {
        let query = format!("SELECT {} FROM voicelogs WHERE id = $1", RECORD_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_record).transpose()
    }

    #[instrument(skip(self), fields(record_id = %id))]
    async fn claim(&self, id: RecordId) -> Result<ClaimOutcome, RepositoryError> {
        // The self-join snapshots the status before the write; RETURNING
        // only sees the updated row.
        let query = format!(
            "UPDATE voicelogs v SET status = 'processing', updated_at = NOW() \
             FROM (SELECT id, status AS prev_status FROM voicelogs \
                   WHERE id = $1 AND status <> 'processing' FOR UPDATE) prior \
             WHERE v.id = prior.id \
             RETURNING {}, prior.prev_status",
            CLAIMED_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if let Some(row) = row {
            let previous_status: String = row
                .try_get("prev_status")
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
            let previous_status = previous_status
                .parse::<RecordStatus>()
                .map_err(RepositoryError::QueryFailed)?;
            return Ok(ClaimOutcome::Claimed {
                record: map_record(&row)?,
                previous_status,
            });
        }

        // The CAS matched nothing: either the row is in flight or missing.
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM voicelogs WHERE id = $1)")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if exists {
            Ok(ClaimOutcome::InFlight)
        } else {
            Ok(ClaimOutcome::NotFound)
        }
    }

    #[instrument(skip(self, result), fields(record_id = %id, status = %result.status))]
    async fn store_result(
        &self,
        id: RecordId,
        result: &TranscriptionResult,
    ) -> Result<(), RepositoryError> {
        let outcome = sqlx::query(
            "UPDATE voicelogs SET transcript = $2, status = $3, tokens_input = $4, \
             tokens_output = $5, cost_credits = $6, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(&result.transcript)
        .bind(result.status.as_str())
        .bind(result.usage.input as i64)
        .bind(result.usage.output as i64)
        .bind(result.cost_credits)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if outcome.rows_affected() == 0 {
            return Err(RepositoryError::QueryFailed(format!(
                "record {} disappeared during result write",
                id
            )));
        }

        Ok(())
    }

    #[instrument(skip(self), fields(record_id = %id, status = %status))]
    async fn release(&self, id: RecordId, status: RecordStatus) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE voicelogs SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'processing'",
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
