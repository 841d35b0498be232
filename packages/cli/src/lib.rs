// ABOUTME: Library half of the taskflow binary
// ABOUTME: Configuration, logging bootstrap and the API server entry point

pub mod config;
pub mod server;


pub use config::{Config, ConfigError};
pub use server::{build_app, run_server};

use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "taskflow=info,tower_http=info";

/// Install the global fmt subscriber. Later calls are ignored.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("taskflow=debug,tower_http=debug")
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
