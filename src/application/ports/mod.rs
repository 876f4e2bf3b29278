mod audio_store;
mod billing_outbox;
mod credit_ledger;
mod record_repository;
mod transcriber;

pub use audio_store::{AudioStore, AudioStoreError};
pub use billing_outbox::{BillingOutbox, BillingOutboxError};
pub use credit_ledger::{CreditLedger, CreditLedgerError};
pub use record_repository::{ClaimOutcome, RecordRepository, RepositoryError, TranscriptionResult};
pub use transcriber::{Transcriber, TranscriberError};
