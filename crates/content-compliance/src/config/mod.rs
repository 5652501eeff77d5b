use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::compliance::{ContentLimits, OptimizationConfig, MAX_RETRIES_LIMIT};

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
    pub compliance: ComplianceSettings,
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
            compliance: ComplianceSettings::from_env()?,
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

/// Process-wide defaults for scoring and the remediation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceSettings {
    pub target_applicable_score: u8,
    pub target_absolute_points: Option<usize>,
    pub max_retries: usize,
    pub max_retries_limit: usize,
    pub promotion_buffer: usize,
    pub max_content_bytes: usize,
}

impl Default for ComplianceSettings {
    fn default() -> Self {
        let optimization = OptimizationConfig::default();
        Self {
            target_applicable_score: optimization.target_applicable_score,
            target_absolute_points: optimization.target_absolute_points,
            max_retries: optimization.max_retries,
            max_retries_limit: optimization.max_retries_limit,
            promotion_buffer: optimization.promotion_buffer,
            max_content_bytes: ContentLimits::default().max_bytes,
        }
    }
}

impl ComplianceSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let target_applicable_score =
            parse_var("COMPLIANCE_TARGET_SCORE")?.unwrap_or(defaults.target_applicable_score);
        if target_applicable_score > 100 {
            return Err(ConfigError::InvalidSetting {
                key: "COMPLIANCE_TARGET_SCORE",
                value: target_applicable_score.to_string(),
            });
        }

        let max_retries_limit = parse_var("COMPLIANCE_MAX_RETRIES_LIMIT")?
            .unwrap_or(defaults.max_retries_limit);
        if max_retries_limit > MAX_RETRIES_LIMIT {
            return Err(ConfigError::InvalidSetting {
                key: "COMPLIANCE_MAX_RETRIES_LIMIT",
                value: max_retries_limit.to_string(),
            });
        }

        let max_retries = parse_var("COMPLIANCE_MAX_RETRIES")?.unwrap_or(defaults.max_retries);
        if max_retries > max_retries_limit {
            return Err(ConfigError::InvalidSetting {
                key: "COMPLIANCE_MAX_RETRIES",
                value: max_retries.to_string(),
            });
        }

        Ok(Self {
            target_applicable_score,
            target_absolute_points: parse_var("COMPLIANCE_TARGET_POINTS")?,
            max_retries,
            max_retries_limit,
            promotion_buffer: parse_var("COMPLIANCE_PROMOTION_BUFFER")?
                .unwrap_or(defaults.promotion_buffer),
            max_content_bytes: parse_var("COMPLIANCE_MAX_CONTENT_BYTES")?
                .unwrap_or(defaults.max_content_bytes),
        })
    }

    pub fn optimization_config(&self) -> OptimizationConfig {
        OptimizationConfig {
            target_applicable_score: self.target_applicable_score,
            target_absolute_points: self.target_absolute_points,
            max_retries: self.max_retries,
            max_retries_limit: self.max_retries_limit,
            promotion_buffer: self.promotion_buffer,
        }
    }

    pub fn content_limits(&self) -> ContentLimits {
        ContentLimits {
            max_bytes: self.max_content_bytes,
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidSetting { key, value: raw }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSetting { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSetting { key, value } => {
                write!(f, "{key} has an invalid value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSetting { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
