// ABOUTME: Gateway abstraction over task and category persistence
// ABOUTME: Resource trait describes each entity; Gateway is the list/create/update/delete seam

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use taskflow_core::{
    generate_category_id, generate_task_id, Category, CategoryCreateInput, CategoryUpdateInput,
    Task, TaskCreateInput, TaskUpdateInput, ValidationError,
};

use crate::error::GatewayResult;

/// An entity type the gateway can persist
pub trait Resource:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Fields supplied on create
    type Draft: Clone + Serialize + Send + Sync + 'static;
    /// Partial fields supplied on update
    type Patch: Clone + Serialize + Send + Sync + 'static;

    /// Path segment under the API base url, also the collection name
    const COLLECTION: &'static str;
    /// Singular noun used in messages
    const NAME: &'static str;

    fn id(&self) -> &str;

    /// Assign identity and build a new record
    fn create(owner: &str, draft: Self::Draft, now: DateTime<Utc>) -> Result<Self, ValidationError>;

    /// Apply a partial update in place
    fn merge(&mut self, patch: Self::Patch, now: DateTime<Utc>) -> Result<(), ValidationError>;
}

impl Resource for Task {
    type Draft = TaskCreateInput;
    type Patch = TaskUpdateInput;

    const COLLECTION: &'static str = "tasks";
    const NAME: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(owner: &str, draft: TaskCreateInput, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        Task::from_input(generate_task_id(), owner, draft, now)
    }

    fn merge(&mut self, patch: TaskUpdateInput, now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.apply_update(patch, now)
    }
}

impl Resource for Category {
    type Draft = CategoryCreateInput;
    type Patch = CategoryUpdateInput;

    const COLLECTION: &'static str = "categories";
    const NAME: &'static str = "category";

    fn id(&self) -> &str {
        &self.id
    }

    fn create(
        owner: &str,
        draft: CategoryCreateInput,
        _now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Category::from_input(generate_category_id(), owner, draft)
    }

    fn merge(&mut self, patch: CategoryUpdateInput, _now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.apply_update(patch)
    }
}

/// CRUD access to one collection.
///
/// Implementations never retry; every failure is reported as a `GatewayError`.
#[async_trait]
pub trait Gateway<R: Resource>: Send + Sync {
    /// Full collection in storage order
    async fn list(&self) -> GatewayResult<Vec<R>>;

    async fn create(&self, draft: R::Draft) -> GatewayResult<R>;

    async fn update(&self, id: &str, patch: R::Patch) -> GatewayResult<R>;

    /// Hard delete. Deleting an absent id is `NotFound`.
    async fn delete(&self, id: &str) -> GatewayResult<()>;
}
