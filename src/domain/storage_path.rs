use std::fmt;

use uuid::Uuid;

/// Locator of an audio asset inside the voicelogs bucket.
///
/// Uploads are namespaced by the owning user, so paths look like
/// `<user_id>/<filename>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(user_id: &Uuid, filename: &str) -> Self {
        Self(format!("{}/{}", user_id, filename))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
