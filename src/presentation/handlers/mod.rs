mod health;
mod record_status;
mod transcribe;

pub use health::health_handler;
pub use record_status::record_status_handler;
pub use transcribe::transcribe_handler;
