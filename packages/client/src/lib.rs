// ABOUTME: Client library for TaskFlow: gateways, observable stores and task views
// ABOUTME: Used by the CLI to talk to the API or to an in-memory backend

pub mod auth;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod store;

pub use auth::{AuthState, AuthStore};
pub use context::{AppContext, Backend, ClientConfig, ParseBackendError, DEFAULT_API_URL};
pub use dashboard::DashboardSummary;
pub use error::{ErrorKind, GatewayError, GatewayResult};
pub use filter::{apply, SortKey, Selection, TaskFilter};
pub use gateway::{Gateway, Resource};
pub use http::HttpGateway;
pub use memory::MemoryGateway;
pub use store::{EntityStore, StoreError, StoreState};
