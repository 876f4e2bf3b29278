pub mod config;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{
    Environment, InferenceModeSetting, InferenceSettings, Settings, SettingsError,
    StorageProviderSetting, StorageSettings,
};
pub use router::create_router;
pub use state::AppState;
