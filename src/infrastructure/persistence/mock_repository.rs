use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::{
    BillingOutbox, BillingOutboxError, ClaimOutcome, CreditLedger, CreditLedgerError,
    RecordRepository, RepositoryError, TranscriptionResult,
};
use crate::domain::{BillingEntry, RecordId, RecordStatus, VoiceLog};

/// In-memory record repository with real claim/store/release semantics, so
/// scaffold mode and tests exercise the actual workflow transitions.
#[derive(Default)]
pub struct MockRecordRepository {
    records: Mutex<HashMap<Uuid, VoiceLog>>,
}

impl MockRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: VoiceLog) {
        self.records
            .lock()
            .unwrap()
            .insert(record.id.as_uuid(), record);
    }

    pub fn get(&self, id: RecordId) -> Option<VoiceLog> {
        self.records.lock().unwrap().get(&id.as_uuid()).cloned()
    }
}

#[async_trait::async_trait]
impl RecordRepository for MockRecordRepository {
    async fn get_by_id(&self, id: RecordId) -> Result<Option<VoiceLog>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn claim(&self, id: RecordId) -> Result<ClaimOutcome, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&id.as_uuid()) {
            Some(record) if record.status == RecordStatus::Processing => Ok(ClaimOutcome::InFlight),
            Some(record) => {
                let previous_status = record.status;
                record.status = RecordStatus::Processing;
                record.updated_at = Utc::now();
                Ok(ClaimOutcome::Claimed {
                    record: record.clone(),
                    previous_status,
                })
            }
            None => Ok(ClaimOutcome::NotFound),
        }
    }

    async fn store_result(
        &self,
        id: RecordId,
        result: &TranscriptionResult,
    ) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::QueryFailed(format!("no record {}", id)))?;

        record.transcript = Some(result.transcript.clone());
        record.status = result.status;
        record.tokens_input = result.usage.input;
        record.tokens_output = result.usage.output;
        record.cost_credits = result.cost_credits;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn release(&self, id: RecordId, status: RecordStatus) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.get_mut(&id.as_uuid()) {
            if record.status == RecordStatus::Processing {
                record.status = status;
                record.updated_at = Utc::now();
            }
        }
        Ok(())
    }
}

/// Ledger that records every deduction; constructed failing when a test
/// needs the billing-warning path.
#[derive(Default)]
pub struct MockCreditLedger {
    failing: bool,
    deductions: Mutex<Vec<(Uuid, f64, String)>>,
}

impl MockCreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            deductions: Mutex::new(Vec::new()),
        }
    }

    pub fn deductions(&self) -> Vec<(Uuid, f64, String)> {
        self.deductions.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CreditLedger for MockCreditLedger {
    async fn deduct(
        &self,
        user_id: Uuid,
        amount: f64,
        memo: &str,
        _app_id: &str,
    ) -> Result<(), CreditLedgerError> {
        if self.failing {
            return Err(CreditLedgerError::RpcFailed("ledger unavailable".into()));
        }
        self.deductions
            .lock()
            .unwrap()
            .push((user_id, amount, memo.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockBillingOutbox {
    entries: Mutex<Vec<(BillingEntry, bool)>>,
}

impl MockBillingOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<BillingEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(e, _)| e.clone())
            .collect()
    }

    pub fn settled_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, settled)| *settled)
            .count()
    }
}

#[async_trait::async_trait]
impl BillingOutbox for MockBillingOutbox {
    async fn enqueue(&self, entry: &BillingEntry) -> Result<(), BillingOutboxError> {
        self.entries.lock().unwrap().push((entry.clone(), false));
        Ok(())
    }

    async fn list_pending(&self, limit: usize) -> Result<Vec<BillingEntry>, BillingOutboxError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, settled)| !settled)
            .take(limit)
            .map(|(e, _)| e.clone())
            .collect())
    }

    async fn mark_settled(&self, id: Uuid) -> Result<(), BillingOutboxError> {
        for (entry, settled) in self.entries.lock().unwrap().iter_mut() {
            if entry.id == id {
                *settled = true;
            }
        }
        Ok(())
    }

    async fn mark_attempted(&self, id: Uuid) -> Result<(), BillingOutboxError> {
        for (entry, _) in self.entries.lock().unwrap().iter_mut() {
            if entry.id == id {
                entry.attempts += 1;
            }
        }
        Ok(())
    }
}
