use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::eligibility::EligibilityConfig;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

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
    pub eligibility: EligibilityConfig,
    pub advisor: AdvisorConfig,
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
            eligibility: load_eligibility()?,
            advisor: AdvisorConfig {
                api_key: env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            },
        })
    }
}

fn load_eligibility() -> Result<EligibilityConfig, ConfigError> {
    let mut config = EligibilityConfig::default();

    if let Some(raw) = threshold_var("ELIGIBILITY_MIN_CREDIT_SCORE") {
        config.minimum_credit_score = raw
            .parse::<u16>()
            .ok()
            .filter(|score| (300..=850).contains(score))
            .ok_or(ConfigError::InvalidThreshold {
                key: "ELIGIBILITY_MIN_CREDIT_SCORE",
                value: raw,
            })?;
    }
    if let Some(ratio) = fraction_var("ELIGIBILITY_MAX_DEBT_TO_INCOME")? {
        config.maximum_debt_to_income = ratio;
    }
    if let Some(ratio) = fraction_var("ELIGIBILITY_MIN_DOWN_PAYMENT_RATIO")? {
        config.minimum_down_payment_ratio = ratio;
    }
    if let Some(raw) = threshold_var("ELIGIBILITY_MIN_EMPLOYMENT_YEARS") {
        config.minimum_employment_years = raw
            .parse::<f64>()
            .ok()
            .filter(|years| years.is_finite() && *years >= 0.0)
            .ok_or(ConfigError::InvalidThreshold {
                key: "ELIGIBILITY_MIN_EMPLOYMENT_YEARS",
                value: raw,
            })?;
    }
    if let Some(ratio) = fraction_var("ELIGIBILITY_MAX_PAYMENT_TO_INCOME")? {
        config.maximum_payment_to_income = ratio;
    }
    if let Some(rate) = fraction_var("ELIGIBILITY_ANNUAL_RATE")? {
        config.annual_interest_rate = rate;
    }

    Ok(config)
}

fn threshold_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn fraction_var(key: &'static str) -> Result<Option<f64>, ConfigError> {
    let Some(raw) = threshold_var(key) else {
        return Ok(None);
    };

    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && (0.0..=1.0).contains(value))
        .map(Some)
        .ok_or(ConfigError::InvalidThreshold { key, value: raw })
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Optional narrative-advice provider settings. Advice is disabled without an API key.
#[derive(Clone)]
pub struct AdvisorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl AdvisorConfig {
    pub fn enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold { key, value } => {
                write!(f, "{key} has an invalid value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThreshold { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
