mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BillingSettings, DatabaseSettings, InferenceModeSetting, InferenceSettings, ServerSettings,
    Settings, SettingsError, StorageProviderSetting, StorageSettings,
};
