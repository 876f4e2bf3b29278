mod mock_repository;
mod pg_billing_outbox;
mod pg_credit_ledger;
mod pg_pool;
mod pg_record_repository;

pub use mock_repository::{MockBillingOutbox, MockCreditLedger, MockRecordRepository};
pub use pg_billing_outbox::PgBillingOutbox;
pub use pg_credit_ledger::PgCreditLedger;
pub use pg_pool::create_pool;
pub use pg_record_repository::PgRecordRepository;
