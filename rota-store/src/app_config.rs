use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ui_rules: UiRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Knobs the dashboard frontend reads at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct UiRules {
    /// Quiet period on search boxes before a query is issued.
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables with a prefix of ROTA
            // Eg. `ROTA__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("ROTA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
