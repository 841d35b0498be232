// ABOUTME: Environment-driven configuration for the server and client commands
// ABOUTME: Reads PORT, CORS_ORIGIN and the TASKFLOW_* variables with defaults

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use taskflow_client::{Backend, ClientConfig, ParseBackendError, DEFAULT_API_URL};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 4001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error(transparent)]
    InvalidBackend(#[from] ParseBackendError),
    #[error("Invalid HTTP timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    /// `None` uses ~/.taskflow/taskflow.db
    pub database_path: Option<PathBuf>,
    pub backend: Backend,
    pub api_url: String,
    pub http_timeout: Duration,
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let port = port_str.trim().parse::<u16>()?;

        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let database_path = env::var("TASKFLOW_DATABASE_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let backend = match env::var("TASKFLOW_BACKEND") {
            Ok(value) => value.parse::<Backend>()?,
            Err(_) => Backend::default(),
        };

        let api_url = env::var("TASKFLOW_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let http_timeout = match env::var("TASKFLOW_HTTP_TIMEOUT_SECS") {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(value)),
            },
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let seed = env::var("TASKFLOW_SEED")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Config {
            port,
            cors_origin,
            database_path,
            backend,
            api_url,
            http_timeout,
            seed,
        })
    }

    /// Settings for the client stores. The session lives next to the database.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            backend: self.backend,
            api_url: self.api_url.clone(),
            timeout: self.http_timeout,
            session_path: Some(taskflow_core::session_file()),
            seed: self.seed,
        }
    }
}
