// ABOUTME: In-memory gateway used for offline runs and tests
// ABOUTME: Applies the same merge and validation rules as the SQLite store

use async_trait::async_trait;
use chrono::Utc;
use taskflow_core::{Category, CategoryCreateInput, ValidationError, DEFAULT_USER_ID};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{Gateway, Resource};

/// Demo categories (name, color) seeded into a fresh memory backend
pub const DEMO_CATEGORIES: [(&str, &str); 4] = [
    ("Work", "#0ea5e9"),
    ("Personal", "#8b5cf6"),
    ("Learning", "#10b981"),
    ("Health", "#ef4444"),
];

pub struct MemoryGateway<R> {
    owner: String,
    records: RwLock<Vec<R>>,
}

impl<R: Resource> MemoryGateway<R> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            owner: DEFAULT_USER_ID.to_string(),
            records: RwLock::new(records),
        }
    }

    /// Owner assigned to drafts that do not name one
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    fn not_found(id: &str) -> GatewayError {
        GatewayError::NotFound(format!("{} {} not found", R::NAME, id))
    }
}

impl<R: Resource> Default for MemoryGateway<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway<Category> {
    /// Memory backend pre-populated with the demo categories
    pub fn with_demo_categories() -> Result<Self, ValidationError> {
        let now = Utc::now();
        let categories = DEMO_CATEGORIES
            .iter()
            .map(|(name, color)| {
                <Category as Resource>::create(
                    DEFAULT_USER_ID,
                    CategoryCreateInput {
                        name: name.to_string(),
                        color: color.to_string(),
                        user_id: None,
                    },
                    now,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::with_records(categories))
    }
}

#[async_trait]
impl<R: Resource> Gateway<R> for MemoryGateway<R> {
    async fn list(&self) -> GatewayResult<Vec<R>> {
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, draft: R::Draft) -> GatewayResult<R> {
        let record = R::create(&self.owner, draft, Utc::now())?;
        debug!("Created {} {} in memory", R::NAME, record.id());

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: R::Patch) -> GatewayResult<R> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        // Merge into a copy so a rejected patch leaves the record untouched
        let mut merged = record.clone();
        merged.merge(patch, Utc::now())?;
        *record = merged.clone();

        debug!("Updated {} {} in memory", R::NAME, id);
        Ok(merged)
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        records.remove(position);
        debug!("Deleted {} {} from memory", R::NAME, id);
        Ok(())
    }
}
