/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        // Hosted environments get JSON lines unless explicitly overridden.
        let json_format = match std::env::var("LOG_FORMAT") {
            Ok(v) => v.to_lowercase() == "json",
            Err(_) => environment == "prod",
        };
        Self {
            environment,
            json_format,
        }
    }
}
