use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::assessment::catalog::{GranularityBands, InstrumentConfig, InstrumentVariant};

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
    pub assessment: AssessmentSettings,
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
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => LogFormat::parse(&raw).ok_or(ConfigError::InvalidLogFormat { value: raw })?,
            Err(_) => LogFormat::Compact,
        };

        let variant = match env::var("ASSESSMENT_VARIANT") {
            Ok(raw) => raw
                .parse::<InstrumentVariant>()
                .map_err(|_| ConfigError::InvalidVariant { value: raw })?,
            Err(_) => InstrumentVariant::Comprehensive,
        };
        let granularity_bands = match env::var("ASSESSMENT_GRANULARITY_BANDS") {
            Ok(raw) => raw
                .parse::<GranularityBands>()
                .map_err(|_| ConfigError::InvalidGranularityBands { value: raw })?,
            Err(_) => GranularityBands::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            assessment: AssessmentSettings {
                variant,
                granularity_bands,
            },
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
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Instrument defaults applied when a caller does not name a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentSettings {
    pub variant: InstrumentVariant,
    pub granularity_bands: GranularityBands,
}

impl AssessmentSettings {
    pub fn instrument(&self) -> InstrumentConfig {
        self.instrument_for(self.variant)
    }

    pub fn instrument_for(&self, variant: InstrumentVariant) -> InstrumentConfig {
        InstrumentConfig::for_variant(variant).with_granularity_bands(self.granularity_bands)
    }
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            variant: InstrumentVariant::Comprehensive,
            granularity_bands: GranularityBands::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat { value: String },
    InvalidVariant { value: String },
    InvalidGranularityBands { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be compact or pretty, got '{value}'")
            }
            ConfigError::InvalidVariant { value } => write!(
                f,
                "ASSESSMENT_VARIANT must be clinical, integrated, unfiltered, quick or comprehensive, got '{value}'"
            ),
            ConfigError::InvalidGranularityBands { value } => write!(
                f,
                "ASSESSMENT_GRANULARITY_BANDS must be literal or rescaled, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
