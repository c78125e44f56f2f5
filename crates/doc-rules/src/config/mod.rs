use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

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

/// Top-level configuration for the admin service.
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

        let backend = BackendConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            backend,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the rules backend and how long to wait on it.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("RULES_API_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let base_url = Self::parse_url(&raw)?;

        let timeout_secs = match env::var("RULES_API_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout)?,
            Err(_) => 30,
        };

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }

    /// Build a config pointing at an arbitrary backend, e.g. a local mock server.
    pub fn with_base_url(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Self::parse_url(raw)?,
            timeout_secs: 5,
        })
    }

    fn parse_url(raw: &str) -> Result<Url, ConfigError> {
        Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBackendUrl {
            value: raw.to_string(),
            source,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidBackendUrl {
        value: String,
        source: url::ParseError,
    },
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidBackendUrl { value, .. } => {
                write!(f, "RULES_API_URL '{value}' is not a valid URL")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "RULES_API_TIMEOUT_SECS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidBackendUrl { source, .. } => Some(source),
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
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("RULES_API_URL");
        env::remove_var("RULES_API_TIMEOUT_SECS");
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
        assert_eq!(config.backend.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.backend.timeout_secs, 30);
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
    fn backend_url_and_timeout_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RULES_API_URL", "http://rules.internal:9000");
        env::set_var("RULES_API_TIMEOUT_SECS", "7");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.backend.base_url.as_str(), "http://rules.internal:9000/");
        assert_eq!(config.backend.timeout_secs, 7);
        reset_env();
    }

    #[test]
    fn rejects_malformed_backend_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("RULES_API_URL", "not a url");
        let err = AppConfig::load().expect_err("invalid url rejected");
        assert!(matches!(err, ConfigError::InvalidBackendUrl { .. }));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "eighty");
        let err = AppConfig::load().expect_err("invalid port rejected");
        assert!(matches!(err, ConfigError::InvalidPort));
        reset_env();
    }
}
