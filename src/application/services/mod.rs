mod billing_worker;
mod transcription_service;

pub use billing_worker::BillingWorker;
pub use transcription_service::{TranscriptionError, TranscriptionOutcome, TranscriptionService};
