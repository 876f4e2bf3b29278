use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use voicelog::application::ports::BillingOutbox;
use voicelog::application::services::BillingWorker;
use voicelog::domain::{BillingEntry, RecordId};
use voicelog::infrastructure::persistence::{MockBillingOutbox, MockCreditLedger};

fn entry(amount: f64) -> BillingEntry {
    BillingEntry::new(
        RecordId::new(),
        Uuid::new_v4(),
        amount,
        "Audio transcription (30s)".to_string(),
    )
}

fn worker(
    outbox: &Arc<MockBillingOutbox>,
    ledger: &Arc<MockCreditLedger>,
) -> BillingWorker {
    BillingWorker::new(
        outbox.clone(),
        ledger.clone(),
        "voicelog".to_string(),
        Duration::from_secs(60),
        10,
    )
}

#[tokio::test]
async fn given_empty_outbox_when_draining_then_nothing_settles() {
    let outbox = Arc::new(MockBillingOutbox::new());
    let ledger = Arc::new(MockCreditLedger::new());

    let settled = worker(&outbox, &ledger).drain_once().await.unwrap();

    assert_eq!(settled, 0);
    assert!(ledger.deductions().is_empty());
}

#[tokio::test]
async fn given_parked_entries_when_ledger_recovers_then_entries_settle() {
    let outbox = Arc::new(MockBillingOutbox::new());
    let ledger = Arc::new(MockCreditLedger::new());

    let first = entry(0.00324);
    let second = entry(0.5);
    outbox.enqueue(&first).await.unwrap();
    outbox.enqueue(&second).await.unwrap();

    let settled = worker(&outbox, &ledger).drain_once().await.unwrap();

    assert_eq!(settled, 2);
    assert_eq!(outbox.settled_count(), 2);
    assert_eq!(ledger.deductions().len(), 2);
    assert!(outbox.list_pending(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_ledger_still_failing_when_draining_then_attempts_are_counted() {
    let outbox = Arc::new(MockBillingOutbox::new());
    let ledger = Arc::new(MockCreditLedger::failing());

    outbox.enqueue(&entry(0.1)).await.unwrap();

    let w = worker(&outbox, &ledger);
    assert_eq!(w.drain_once().await.unwrap(), 0);
    assert_eq!(w.drain_once().await.unwrap(), 0);

    let pending = outbox.list_pending(10).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].attempts, 2);
    assert_eq!(outbox.settled_count(), 0);
}
