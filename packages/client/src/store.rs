// ABOUTME: Observable client-side collection backed by a gateway
// ABOUTME: Tracks loading and last error; failures are recorded, never returned

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{ErrorKind, GatewayError};
use crate::gateway::{Gateway, Resource};

/// Failure recorded on a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Snapshot of a store's observable state
#[derive(Debug, Clone, Serialize)]
pub struct StoreState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    pub error: Option<StoreError>,
}

impl<R> Default for StoreState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Action {
    fn verb(&self) -> &'static str {
        match self {
            Action::Fetch => "fetch",
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// Client-side collection for one resource type.
///
/// Each operation sets `loading`, clears the previous error, calls the
/// gateway and merges the response. Concurrent operations are not
/// serialized; whichever response arrives last determines the state.
pub struct EntityStore<R: Resource> {
    gateway: Arc<dyn Gateway<R>>,
    state: watch::Sender<StoreState<R>>,
}

impl<R: Resource> EntityStore<R> {
    pub fn new(gateway: Arc<dyn Gateway<R>>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { gateway, state }
    }

    /// Current state
    pub fn snapshot(&self) -> StoreState<R> {
        self.state.borrow().clone()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<StoreState<R>> {
        self.state.subscribe()
    }

    pub fn items(&self) -> Vec<R> {
        self.state.borrow().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<StoreError> {
        self.state.borrow().error.clone()
    }

    /// Replace the collection with the gateway's list
    pub async fn fetch_all(&self) {
        self.begin();
        match self.gateway.list().await {
            Ok(items) => {
                debug!("Fetched {} {}", items.len(), R::COLLECTION);
                self.state.send_modify(|s| {
                    s.items = items;
                    s.loading = false;
                });
            }
            Err(e) => self.fail(Action::Fetch, e),
        }
    }

    /// Create and append. Nothing is inserted until the gateway confirms.
    pub async fn add(&self, draft: R::Draft) -> Option<R> {
        self.begin();
        match self.gateway.create(draft).await {
            Ok(record) => {
                let added = record.clone();
                self.state.send_modify(|s| {
                    s.items.push(record);
                    s.loading = false;
                });
                Some(added)
            }
            Err(e) => {
                self.fail(Action::Add, e);
                None
            }
        }
    }

    /// Replace the local record with the gateway's merged result
    pub async fn update(&self, id: &str, patch: R::Patch) -> Option<R> {
        self.begin();
        match self.gateway.update(id, patch).await {
            Ok(record) => {
                let updated = record.clone();
                self.state.send_modify(|s| {
                    if let Some(slot) = s.items.iter_mut().find(|r| r.id() == id) {
                        *slot = record;
                    }
                    s.loading = false;
                });
                Some(updated)
            }
            Err(e) => {
                self.fail(Action::Update, e);
                None
            }
        }
    }

    /// Returns true when the record was deleted
    pub async fn remove(&self, id: &str) -> bool {
        self.begin();
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.items.retain(|r| r.id() != id);
                    s.loading = false;
                });
                true
            }
            Err(e) => {
                self.fail(Action::Delete, e);
                false
            }
        }
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, action: Action, err: GatewayError) {
        let noun = match action {
            Action::Fetch => R::COLLECTION,
            _ => R::NAME,
        };
        let message = format!("Failed to {} {}: {}", action.verb(), noun, err.message());
        warn!("{}", message);

        self.state.send_modify(|s| {
            s.loading = false;
            s.error = Some(StoreError {
                kind: err.kind(),
                message,
            });
        });
    }
}
