use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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
    pub matching: MatchingRuntimeConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingRuntimeConfig::load_from_env()?,
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

/// Runtime knobs for the matching engine, overridable through the
/// environment so operators can retune pacing without a redeploy.
#[derive(Debug, Clone)]
pub struct MatchingRuntimeConfig {
    pub chunk_size: usize,
    pub chunk_pause: Duration,
    pub provider_timeout: Duration,
    pub candidate_timeout: Duration,
}

impl Default for MatchingRuntimeConfig {
    fn default() -> Self {
        Self {
            chunk_size: 5,
            chunk_pause: Duration::from_millis(500),
            provider_timeout: Duration::from_secs(8),
            candidate_timeout: Duration::from_secs(20),
        }
    }
}

impl MatchingRuntimeConfig {
    fn load_from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let chunk_size = match env::var("MATCH_CHUNK_SIZE") {
            Ok(raw) => {
                let parsed = raw
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidMatchSetting {
                        name: "MATCH_CHUNK_SIZE",
                    })?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidMatchSetting {
                        name: "MATCH_CHUNK_SIZE",
                    });
                }
                parsed
            }
            Err(_) => defaults.chunk_size,
        };

        Ok(Self {
            chunk_size,
            chunk_pause: duration_from_env("MATCH_CHUNK_PAUSE_MS", defaults.chunk_pause)?,
            provider_timeout: duration_from_env(
                "MATCH_PROVIDER_TIMEOUT_MS",
                defaults.provider_timeout,
            )?,
            candidate_timeout: duration_from_env(
                "MATCH_CANDIDATE_TIMEOUT_MS",
                defaults.candidate_timeout,
            )?,
        })
    }
}

fn duration_from_env(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidMatchSetting { name }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMatchSetting { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMatchSetting { name } => {
                write!(f, "{name} must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidMatchSetting { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
