use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{NewTask, Task, TaskPatch};
use crate::domain::query::{TaskFilter, TaskSort};
use crate::domain::repo::TasksRepository;

const MAX_TITLE_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 1000;

/// Task CRUD with ownership enforcement and the list query contract.
///
/// Every operation on an existing task runs the same three-way check, in
/// this order: structurally invalid id, then unknown id, then foreign
/// owner. The checks are never collapsed so that a malformed id is always
/// reported the same way.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TasksRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TasksRepository>) -> Self {
        Self { tasks }
    }

    #[instrument(name = "taskhub.tasks.create", skip(self, fields), fields(owner_id = %owner_id))]
    pub async fn create(&self, owner_id: Uuid, fields: NewTask) -> Result<Task, DomainError> {
        info!("Creating task");

        let title = validate_title(&fields.title)?;
        let description = validate_description(fields.description.as_deref().unwrap_or(""))?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title,
            description,
            priority: fields.priority.unwrap_or_default(),
            status: fields.status.unwrap_or_default(),
            owner_id,
            created_at: now,
            updated_at: now,
        };

        self.tasks
            .insert(task.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created task with id={}", task.id);
        Ok(task)
    }

    #[instrument(name = "taskhub.tasks.get", skip(self), fields(owner_id = %owner_id, task_id = %raw_id))]
    pub async fn get(&self, owner_id: Uuid, raw_id: &str) -> Result<Task, DomainError> {
        debug!("Getting task");
        self.owned_task(owner_id, raw_id).await
    }

    /// Full replace of title/description/priority/status. Omitted optional
    /// fields reset to their defaults; id, owner and created-at are kept.
    #[instrument(name = "taskhub.tasks.replace", skip(self, fields), fields(owner_id = %owner_id, task_id = %raw_id))]
    pub async fn replace(
        &self,
        owner_id: Uuid,
        raw_id: &str,
        fields: NewTask,
    ) -> Result<Task, DomainError> {
        info!("Replacing task");

        let title = validate_title(&fields.title)?;
        let description = validate_description(fields.description.as_deref().unwrap_or(""))?;

        let mut task = self.owned_task(owner_id, raw_id).await?;
        task.title = title;
        task.description = description;
        task.priority = fields.priority.unwrap_or_default();
        task.status = fields.status.unwrap_or_default();
        task.updated_at = Utc::now();

        self.tasks
            .update(task.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully replaced task");
        Ok(task)
    }

    /// Partial update: only the provided fields change.
    #[instrument(name = "taskhub.tasks.patch", skip(self, patch), fields(owner_id = %owner_id, task_id = %raw_id))]
    pub async fn patch(
        &self,
        owner_id: Uuid,
        raw_id: &str,
        patch: TaskPatch,
    ) -> Result<Task, DomainError> {
        info!("Patching task");

        let mut task = self.owned_task(owner_id, raw_id).await?;

        if let Some(ref title) = patch.title {
            task.title = validate_title(title)?;
        }
        if let Some(ref description) = patch.description {
            task.description = validate_description(description)?;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = Utc::now();

        self.tasks
            .update(task.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully patched task");
        Ok(task)
    }

    #[instrument(name = "taskhub.tasks.delete", skip(self), fields(owner_id = %owner_id, task_id = %raw_id))]
    pub async fn delete(&self, owner_id: Uuid, raw_id: &str) -> Result<(), DomainError> {
        info!("Deleting task");

        let task = self.owned_task(owner_id, raw_id).await?;
        let deleted = self
            .tasks
            .delete(task.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !deleted {
            // Raced with another delete of our own task.
            return Err(DomainError::task_not_found(task.id));
        }

        info!("Successfully deleted task");
        Ok(())
    }

    /// List the caller's tasks. Created-at orderings are pushed down to the
    /// store; priority orderings are applied here with the explicit total
    /// order, stable over retrieval order.
    #[instrument(name = "taskhub.tasks.list", skip(self), fields(owner_id = %owner_id))]
    pub async fn list(
        &self,
        owner_id: Uuid,
        filter: TaskFilter,
        sort: TaskSort,
    ) -> Result<Vec<Task>, DomainError> {
        debug!("Listing tasks");

        let mut tasks = self
            .tasks
            .list_by_owner(owner_id, &filter, sort.created_order())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        sort.apply_in_memory(&mut tasks);

        debug!("Successfully listed {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Resolve a raw path id to a task owned by the caller.
    /// Malformed id, then missing record, then foreign owner.
    async fn owned_task(&self, owner_id: Uuid, raw_id: &str) -> Result<Task, DomainError> {
        let id =
            Uuid::parse_str(raw_id).map_err(|_| DomainError::invalid_task_id(raw_id))?;

        let task = self
            .tasks
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::task_not_found(id))?;

        if task.owner_id != owner_id {
            return Err(DomainError::PermissionDenied);
        }
        Ok(task)
    }
}

// --- validation helpers ---

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("Title is required"));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(DomainError::validation(
            "Title cannot be more than 100 characters",
        ));
    }
    Ok(title.to_string())
}

fn validate_description(description: &str) -> Result<String, DomainError> {
    let description = description.trim();
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::validation(
            "Description cannot be more than 1000 characters",
        ));
    }
    Ok(description.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(validate_title("  Buy milk  ").unwrap(), "Buy milk");
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(101)).is_err());
        assert_eq!(validate_title(&"x".repeat(100)).unwrap().len(), 100);
    }

    #[test]
    fn description_is_bounded() {
        assert_eq!(validate_description("").unwrap(), "");
        assert!(validate_description(&"x".repeat(1001)).is_err());
    }
}
