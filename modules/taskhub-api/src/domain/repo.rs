use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::model::{Task, User};
use crate::domain::query::{CreatedOrder, TaskFilter};

/// Port for the credential store: persistence operations the auth flows need.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Load a user by email (unique).
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Insert a fully-formed domain user.
    ///
    /// Service computes id/digest/timestamps; repo persists.
    async fn insert(&self, user: User) -> anyhow::Result<()>;
}

/// Port for the task collection. The repository knows nothing about
/// ownership rules; the service enforces them on every fetched record.
#[async_trait]
pub trait TasksRepository: Send + Sync {
    /// Load a task by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Task>>;
    /// Insert a fully-formed domain task.
    async fn insert(&self, task: Task) -> anyhow::Result<()>;
    /// Update an existing task (by primary key in `task.id`).
    async fn update(&self, task: Task) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// List tasks scoped to one owner, with exact-match filters ANDed in.
    ///
    /// `order: Some(_)` pushes a created-at ordering down to the store;
    /// `None` returns rows in retrieval order for in-memory sorting.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        filter: &TaskFilter,
        order: Option<CreatedOrder>,
    ) -> anyhow::Result<Vec<Task>>;
}
