use serde::Deserialize;

use super::Environment;

/// Validated process configuration, loaded from environment variables at
/// startup. A missing inference credential is a configuration error in prod
/// rather than a placeholder threaded into a real client.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub inference: InferenceSettings,
    pub billing: BillingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub bucket: String,
    pub local_path: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Supabase,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSettings {
    pub mode: InferenceModeSetting,
    pub api_key: Option<String>,
    /// The model identifier is deliberately explicit configuration; the
    /// source of this service carried two different ids in different
    /// copies of the workflow.
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceModeSetting {
    Live,
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BillingSettings {
    pub app_id: String,
    pub poll_interval_secs: u64,
    pub batch_size: usize,
}

pub const DEFAULT_INFERENCE_MODEL: &str = "gemini-2.0-flash";

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let environment = Environment::try_from(
            std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string()),
        )
        .map_err(|e| SettingsError::InvalidValue("APP_ENV", e))?;

        let server = ServerSettings {
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: parse_env("SERVER_PORT", 3000)?,
        };

        let database = DatabaseSettings {
            url: require_env("DATABASE_URL")?,
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 5)?,
        };

        let provider = match env_or("STORAGE_PROVIDER", "local").to_lowercase().as_str() {
            "local" => StorageProviderSetting::Local,
            "supabase" => StorageProviderSetting::Supabase,
            other => {
                return Err(SettingsError::InvalidValue(
                    "STORAGE_PROVIDER",
                    format!("unknown provider: {}", other),
                ));
            }
        };

        let storage = StorageSettings {
            provider,
            supabase_url: std::env::var("SUPABASE_URL").ok(),
            supabase_service_key: std::env::var("SUPABASE_SERVICE_KEY").ok(),
            bucket: env_or("AUDIO_BUCKET", "voicelogs"),
            local_path: env_or("LOCAL_STORAGE_PATH", "./data/audio"),
        };

        if matches!(provider, StorageProviderSetting::Supabase) {
            if storage.supabase_url.is_none() {
                return Err(SettingsError::MissingVar("SUPABASE_URL"));
            }
            if storage.supabase_service_key.is_none() {
                return Err(SettingsError::MissingVar("SUPABASE_SERVICE_KEY"));
            }
        }

        let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        let mode = match std::env::var("INFERENCE_MODE").ok().as_deref() {
            Some("live") => InferenceModeSetting::Live,
            Some("disabled") => InferenceModeSetting::Disabled,
            Some(other) => {
                return Err(SettingsError::InvalidValue(
                    "INFERENCE_MODE",
                    format!("expected live or disabled, got: {}", other),
                ));
            }
            // Default by credential presence; prod refuses to start without
            // one instead of silently degrading.
            None if api_key.is_some() => InferenceModeSetting::Live,
            None if environment == Environment::Prod => {
                return Err(SettingsError::MissingVar("GEMINI_API_KEY"));
            }
            None => InferenceModeSetting::Disabled,
        };

        if mode == InferenceModeSetting::Live && api_key.is_none() {
            return Err(SettingsError::MissingVar("GEMINI_API_KEY"));
        }

        let inference = InferenceSettings {
            mode,
            api_key,
            model: env_or("INFERENCE_MODEL", DEFAULT_INFERENCE_MODEL),
            base_url: std::env::var("INFERENCE_BASE_URL").ok(),
        };

        let billing = BillingSettings {
            app_id: env_or("BILLING_APP_ID", "voicelog"),
            poll_interval_secs: parse_env("BILLING_POLL_INTERVAL_SECS", 60)?,
            batch_size: parse_env("BILLING_BATCH_SIZE", 20)?,
        };

        Ok(Self {
            server,
            database,
            storage,
            inference,
            billing,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn require_env(name: &'static str) -> Result<String, SettingsError> {
    std::env::var(name).map_err(|_| SettingsError::MissingVar(name))
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| SettingsError::InvalidValue(name, e.to_string())),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
