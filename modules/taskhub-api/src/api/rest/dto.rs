use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{NewTask, NewUser, Task, TaskPatch, User};

/// REST DTO for the user as it crosses the wire (no password digest).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// REST DTO for task representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    /// Owner id.
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority.as_str().to_string(),
            status: task.status.as_str().to_string(),
            user: task.owner_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Signup request. Fields are optional at the transport level so that
/// missing values surface as the domain's validation message, not a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl From<SignupReq> for NewUser {
    fn from(req: SignupReq) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
            confirm_password: req.confirm_password.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body for POST /tasks and PUT /tasks/{id}. Priority and status arrive as
/// raw strings and are parsed in the domain so that unknown values produce
/// a `ValidationError` in the envelope.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TaskBodyReq {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<TaskBodyReq> for NewTask {
    type Error = DomainError;

    fn try_from(req: TaskBodyReq) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title.unwrap_or_default(),
            description: req.description,
            priority: req.priority.as_deref().map(str::parse).transpose()?,
            status: req.status.as_deref().map(str::parse).transpose()?,
        })
    }
}

/// Body for PATCH /tasks/{id}: any subset of fields.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TaskPatchReq {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<TaskPatchReq> for TaskPatch {
    type Error = DomainError;

    fn try_from(req: TaskPatchReq) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title,
            description: req.description,
            priority: req.priority.as_deref().map(str::parse).transpose()?,
            status: req.status.as_deref().map(str::parse).transpose()?,
        })
    }
}

/// Query parameters for GET /tasks.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    /// pending | completed | all
    pub status: Option<String>,
    /// low | medium | high | all
    pub priority: Option<String>,
    /// createdAt_desc (default) | createdAt_asc | priority_high | priority_low
    pub sort_by: Option<String>,
}

// --- data payloads inside the success envelope ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthData {
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserData {
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskData {
    pub task: TaskDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TasksData {
    pub tasks: Vec<TaskDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{TaskPriority, TaskStatus};

    #[test]
    fn task_dto_uses_wire_names() {
        let now = Utc::now();
        let owner = Uuid::new_v4();
        let task = Task {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: String::new(),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
            owner_id: owner,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(TaskDto::from(task)).unwrap();
        assert_eq!(value["priority"], "high");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["user"], serde_json::json!(owner));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("owner_id").is_none());
    }

    #[test]
    fn task_body_parses_enum_values() {
        let req = TaskBodyReq {
            title: Some("t".into()),
            description: None,
            priority: Some("high".into()),
            status: Some("completed".into()),
        };
        let new_task = NewTask::try_from(req).unwrap();
        assert_eq!(new_task.priority, Some(TaskPriority::High));
        assert_eq!(new_task.status, Some(TaskStatus::Completed));
    }

    #[test]
    fn task_body_rejects_unknown_enum_values() {
        let req = TaskBodyReq {
            priority: Some("urgent".into()),
            ..Default::default()
        };
        assert!(NewTask::try_from(req).is_err());

        let req = TaskPatchReq {
            status: Some("done".into()),
            ..Default::default()
        };
        assert!(TaskPatch::try_from(req).is_err());
    }
}
