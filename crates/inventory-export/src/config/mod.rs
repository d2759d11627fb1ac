use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Upstream endpoint serving the dealer's vehicle listing.
pub const DEFAULT_SOURCE_URL: &str = "https://dash.alhusnainmotors.co.ke/api/chatbot/vehicles/all";
pub const DEFAULT_OUTPUT_PATH: &str = "vehicles.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the export tool.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub source: SourceConfig,
    pub export: ExportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let url = env::var("INVENTORY_API_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string());
        let token = env::var("INVENTORY_API_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let timeout = match env::var("INVENTORY_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let output_path = env::var("INVENTORY_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            source: SourceConfig {
                url,
                token,
                timeout,
            },
            export: ExportConfig { output_path },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the raw inventory payload comes from and how to authenticate.
#[derive(Clone)]
pub struct SourceConfig {
    pub url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl SourceConfig {
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingToken)
    }
}

// Keeps the bearer token out of logs and error reports.
impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Destination of the flattened CSV.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTimeout { value: String },
    MissingToken,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "INVENTORY_TIMEOUT_SECS must be a positive number of seconds, got '{value}'"
            ),
            ConfigError::MissingToken => write!(
                f,
                "INVENTORY_API_TOKEN must be set to fetch from the inventory API"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("INVENTORY_API_URL");
        env::remove_var("INVENTORY_API_TOKEN");
        env::remove_var("INVENTORY_TIMEOUT_SECS");
        env::remove_var("INVENTORY_OUTPUT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.source.timeout, Duration::from_secs(30));
        assert_eq!(config.export.output_path, PathBuf::from("vehicles.csv"));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn load_reads_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("INVENTORY_API_URL", "http://127.0.0.1:9000/vehicles");
        env::set_var("INVENTORY_API_TOKEN", "secret-token");
        env::set_var("INVENTORY_TIMEOUT_SECS", " 5 ");
        env::set_var("INVENTORY_OUTPUT", "out/stock.csv");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.source.url, "http://127.0.0.1:9000/vehicles");
        assert_eq!(config.source.require_token().expect("token"), "secret-token");
        assert_eq!(config.source.timeout, Duration::from_secs(5));
        assert_eq!(config.export.output_path, PathBuf::from("out/stock.csv"));
    }

    #[test]
    fn rejects_zero_and_garbage_timeouts() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INVENTORY_TIMEOUT_SECS", "0");
        let error = AppConfig::load().expect_err("zero timeout rejected");
        reset_env();
        assert!(matches!(error, ConfigError::InvalidTimeout { .. }));

        assert!(parse_timeout("soon").is_err());
        assert_eq!(parse_timeout("12").expect("valid"), Duration::from_secs(12));
    }

    #[test]
    fn blank_token_counts_as_missing_and_is_redacted() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("INVENTORY_API_TOKEN", "   ");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        assert!(matches!(
            config.source.require_token(),
            Err(ConfigError::MissingToken)
        ));

        let source = SourceConfig {
            url: "http://localhost".to_string(),
            token: Some("hunter2".to_string()),
            timeout: Duration::from_secs(1),
        };
        let rendered = format!("{source:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
