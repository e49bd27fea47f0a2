use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::workflows::admissions::evaluation::DEFAULT_ASSESSOR_TIMEOUT_MS;
use crate::workflows::admissions::EvaluationConfig;

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
    pub admissions: AdmissionsConfig,
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

        let policy_path = env::var("ADMISSIONS_POLICY_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let assessor_timeout_ms = env::var("ADMISSIONS_ASSESSOR_TIMEOUT_MS")
            .ok()
            .and_then(|raw| parse_timeout_ms(&raw));

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            admissions: AdmissionsConfig {
                policy_path,
                assessor_timeout_ms,
            },
        })
    }

    /// Evaluation policy for this deployment.
    ///
    /// A configured policy file that cannot be read or parsed is logged and
    /// replaced by the built-in defaults so evaluation keeps working.
    pub fn evaluation_policy(&self) -> EvaluationConfig {
        let mut policy = match &self.admissions.policy_path {
            Some(path) => match load_policy(path) {
                Ok(policy) => {
                    info!(path = %path.display(), "loaded evaluation policy");
                    policy
                }
                Err(error) => {
                    warn!(%error, "falling back to default evaluation policy");
                    EvaluationConfig::default()
                }
            },
            None => EvaluationConfig::default(),
        };

        if let Some(timeout_ms) = self.admissions.assessor_timeout_ms {
            policy.assessor_timeout_ms = timeout_ms;
        }
        policy.sanitized()
    }
}

/// Positive millisecond timeout, or `None` with a warning so the policy value applies.
fn parse_timeout_ms(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!(
                value = raw,
                default_ms = DEFAULT_ASSESSOR_TIMEOUT_MS,
                "ADMISSIONS_ASSESSOR_TIMEOUT_MS must be a positive integer; keeping the policy timeout"
            );
            None
        }
    }
}

/// Read a JSON evaluation policy. Missing fields keep their defaults.
pub fn load_policy(path: &Path) -> Result<EvaluationConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::PolicyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let policy: EvaluationConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::PolicyParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(policy.sanitized())
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

/// Where the evaluation policy comes from and how long assessors may run.
#[derive(Debug, Clone, Default)]
pub struct AdmissionsConfig {
    pub policy_path: Option<PathBuf>,
    pub assessor_timeout_ms: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    PolicyRead {
        path: PathBuf,
        source: std::io::Error,
    },
    PolicyParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::PolicyRead { path, .. } => {
                write!(f, "unable to read evaluation policy {}", path.display())
            }
            ConfigError::PolicyParse { path, source } => write!(
                f,
                "invalid evaluation policy {}: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::PolicyRead { source, .. } => Some(source),
            ConfigError::PolicyParse { source, .. } => Some(source),
        }
    }
}
