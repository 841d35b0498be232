// ABOUTME: Application context wiring stores to the configured gateway
// ABOUTME: Chooses the HTTP or in-memory backend from client configuration

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use taskflow_core::{Category, Task};
use thiserror::Error;
use tracing::info;

use crate::auth::AuthStore;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::Gateway;
use crate::http::{HttpGateway, DEFAULT_TIMEOUT};
use crate::memory::MemoryGateway;
use crate::store::EntityStore;

pub const DEFAULT_API_URL: &str = "http://localhost:4001/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Http,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown backend '{0}' (expected 'http' or 'memory')")]
pub struct ParseBackendError(pub String);

impl FromStr for Backend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Backend::Http),
            "memory" => Ok(Backend::Memory),
            _ => Err(ParseBackendError(s.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Http => f.write_str("http"),
            Backend::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend: Backend,
    pub api_url: String,
    pub timeout: Duration,
    /// Where the login session is kept; `None` keeps it in memory only
    pub session_path: Option<PathBuf>,
    /// Seed the memory backend with the demo categories
    pub seed: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Http,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            session_path: None,
            seed: false,
        }
    }
}

/// Stores shared by every view
pub struct AppContext {
    pub tasks: EntityStore<Task>,
    pub categories: EntityStore<Category>,
    pub auth: AuthStore,
}

impl AppContext {
    pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
        let auth = match &config.session_path {
            Some(path) => AuthStore::with_session_file(path),
            None => AuthStore::in_memory(),
        };
        let principal = auth.principal_id();

        let (tasks, categories): (Arc<dyn Gateway<Task>>, Arc<dyn Gateway<Category>>) =
            match config.backend {
                Backend::Http => {
                    info!("Using HTTP backend at {}", config.api_url);
                    let http_client = Client::builder()
                        .timeout(config.timeout)
                        .build()
                        .map_err(|e| GatewayError::Network(e.to_string()))?;

                    (
                        Arc::new(
                            HttpGateway::<Task>::with_client(http_client.clone(), &config.api_url)
                                .with_user(&principal),
                        ),
                        Arc::new(
                            HttpGateway::<Category>::with_client(http_client, &config.api_url)
                                .with_user(&principal),
                        ),
                    )
                }
                Backend::Memory => {
                    info!("Using in-memory backend");
                    let categories = if config.seed {
                        MemoryGateway::with_demo_categories()?
                    } else {
                        MemoryGateway::new()
                    };

                    (
                        Arc::new(MemoryGateway::<Task>::new().with_owner(&principal)),
                        Arc::new(categories.with_owner(&principal)),
                    )
                }
            };

        Ok(Self {
            tasks: EntityStore::new(tasks),
            categories: EntityStore::new(categories),
            auth,
        })
    }

    /// Load both collections
    pub async fn refresh(&self) {
        tokio::join!(self.tasks.fetch_all(), self.categories.fetch_all());
    }
}
