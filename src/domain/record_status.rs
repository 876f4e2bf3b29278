use std::fmt;
use std::str::FromStr;

/// Processing state of a voicelog record.
///
/// `Processing` marks an in-flight claim; at most one invocation may hold it
/// per record. `Processed` is terminal for a single workflow run, but a
/// processed row stays claimable so a re-run can overwrite its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Pending,
    Processing,
    Processed,
    Error,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Processing => "processing",
            RecordStatus::Processed => "processed",
            RecordStatus::Error => "error",
        }
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RecordStatus::Pending),
            "processing" => Ok(RecordStatus::Processing),
            "processed" => Ok(RecordStatus::Processed),
            "error" => Ok(RecordStatus::Error),
            _ => Err(format!("Invalid record status: {}", s)),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
