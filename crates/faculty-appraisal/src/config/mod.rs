use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::Url;

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub backend: BackendConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            backend: BackendConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Where appraisal records live. Without a URL the service keeps them in memory.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: Option<Url>,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl BackendConfig {
    const DEFAULT_TIMEOUT_MS: u64 = 10_000;

    fn from_env() -> Result<Self, ConfigError> {
        let url = match env::var("APPRAISAL_BACKEND_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Url::parse(raw.trim())
                    .map_err(|_| ConfigError::InvalidBackendUrl { value: raw.clone() })?,
            ),
            _ => None,
        };

        let token = env::var("APPRAISAL_BACKEND_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let timeout_ms = match env::var("APPRAISAL_BACKEND_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => Self::DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            url,
            token,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout: Duration::from_millis(Self::DEFAULT_TIMEOUT_MS),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidBackendUrl { value: String },
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBackendUrl { value } => {
                write!(f, "APPRAISAL_BACKEND_URL '{value}' is not an absolute URL")
            }
            ConfigError::InvalidTimeout => write!(
                f,
                "APPRAISAL_BACKEND_TIMEOUT_MS must be a positive number of milliseconds"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidBackendUrl { .. }
            | ConfigError::InvalidTimeout => None,
        }
    }
}

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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APPRAISAL_BACKEND_URL",
            "APPRAISAL_BACKEND_TOKEN",
            "APPRAISAL_BACKEND_TIMEOUT_MS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert!(config.backend.url.is_none());
        assert_eq!(config.backend.timeout, Duration::from_secs(10));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_backend_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APPRAISAL_BACKEND_URL", "https://records.example.edu/api/");
        env::set_var("APPRAISAL_BACKEND_TOKEN", "session-token");
        env::set_var("APPRAISAL_BACKEND_TIMEOUT_MS", "2500");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.backend.url.as_ref().map(Url::as_str),
            Some("https://records.example.edu/api/")
        );
        assert_eq!(config.backend.token.as_deref(), Some("session-token"));
        assert_eq!(config.backend.timeout, Duration::from_millis(2500));
        reset_env();
    }

    #[test]
    fn rejects_relative_backend_url_and_zero_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APPRAISAL_BACKEND_URL", "records/api");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidBackendUrl { .. })
        ));

        reset_env();
        env::set_var("APPRAISAL_BACKEND_TIMEOUT_MS", "0");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidTimeout)));
        reset_env();
    }
}
