use crate::diagnosis::{CompanyProfile, FinancingRequest, Rating};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub diagnosis: DiagnosisConfig,
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

        let default_rating = match env::var("APP_DEFAULT_RATING") {
            Ok(code) => code
                .parse::<Rating>()
                .map_err(|_| ConfigError::InvalidRating(code))?,
            Err(_) => Rating::B1,
        };
        let default_profile = match env::var("APP_DEFAULT_PROFILE") {
            Ok(value) => value
                .parse::<CompanyProfile>()
                .map_err(|_| ConfigError::InvalidProfile(value))?,
            Err(_) => CompanyProfile::WithoutHistory,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            diagnosis: DiagnosisConfig {
                default_rating,
                default_profile,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Financing defaults applied when a caller omits rating or profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosisConfig {
    pub default_rating: Rating,
    pub default_profile: CompanyProfile,
}

impl DiagnosisConfig {
    pub fn financing_request(
        &self,
        rating: Option<Rating>,
        profile: Option<CompanyProfile>,
        capital: Option<f64>,
    ) -> FinancingRequest {
        FinancingRequest {
            rating: rating.unwrap_or(self.default_rating),
            profile: profile.unwrap_or(self.default_profile),
            capital,
        }
    }
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        let request = FinancingRequest::default();
        Self {
            default_rating: request.rating,
            default_profile: request.profile,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRating(String),
    InvalidProfile(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRating(value) => {
                write!(f, "APP_DEFAULT_RATING '{value}' is not a rating between A1 and C3")
            }
            ConfigError::InvalidProfile(value) => write!(
                f,
                "APP_DEFAULT_PROFILE '{value}' must be without_history or with_history"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRating(_)
            | ConfigError::InvalidProfile(_) => None,
        }
    }
}
