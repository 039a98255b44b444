use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub gate: GateConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Workbook backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store backend: `json` (workbook persisted to a file) or `memory`.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Workbook file path (required for the `json` backend).
    #[serde(default)]
    pub path: String,

    /// Whether a mismatched access-log header row may be rewritten.
    /// The rewrite drops columns beyond the canonical eight, so it is off
    /// unless explicitly enabled.
    #[serde(default)]
    pub repair_headers: bool,
}

/// PIN-gate behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    /// Preferred PIN sheet name, tried before the heuristic candidates.
    #[serde(default)]
    pub pin_sheet: Option<String>,

    /// Preferred access-log sheet name, tried before the heuristic
    /// candidates and used when the sheet has to be created.
    #[serde(default)]
    pub access_sheet: Option<String>,

    /// Cooldown window for duplicate suppression, in seconds.
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_backend() -> String {
    "json".to_string()
}
fn default_cooldown() -> u64 {
    300
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with SG__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SG").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds the config entirely from embedded defaults and overrides, so
    /// tests do not depend on config files being reachable.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            request_timeout_secs = 30

            [store]
            backend = "memory"
            path = ""
            repair_headers = false

            [gate]
            cooldown_secs = 300

            [logging]
            level = "debug"
            format = "pretty"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        match self.store.backend.as_str() {
            "memory" => {}
            "json" => {
                if self.store.path.is_empty() {
                    return Err(ConfigValidationError::MissingRequired(
                        "SG__STORE__PATH must be set for the json backend".to_string(),
                    ));
                }
            }
            other => {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "Unknown store backend: {other}"
                )));
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .expect("Invalid socket address")
    }
}
