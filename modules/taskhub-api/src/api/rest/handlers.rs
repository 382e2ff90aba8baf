use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::api::rest::dto::{
    AuthData, ListTasksQuery, LoginReq, MessageData, SignupReq, TaskBodyReq, TaskData,
    TaskPatchReq, TasksData, TaskDto, UserData, UserDto,
};
use crate::api::rest::extract::ApiJson;
use crate::api::rest::response::{ok, ApiSuccess};
use crate::auth::extract::AuthUser;
use crate::domain::error::DomainError;
use crate::domain::query::{TaskFilter, TaskSort};
use crate::state::AppState;

/// Register a new user and issue a token.
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupReq,
    responses(
        (status = 201, description = "Account created; data holds {user, token}", body = AuthData),
        (status = 400, description = "Validation error", body = crate::api::rest::response::ApiFailure),
        (status = 409, description = "Email already in use", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupReq>,
) -> Result<(StatusCode, Json<ApiSuccess<AuthData>>), DomainError> {
    let (user, token) = state.auth.signup(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        ok(AuthData {
            user: UserDto::from(user),
            token,
        }),
    ))
}

/// Verify credentials and issue a token.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Logged in; data holds {user, token}", body = AuthData),
        (status = 401, description = "Invalid credentials", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginReq>,
) -> Result<Json<ApiSuccess<AuthData>>, DomainError> {
    let (user, token) = state
        .auth
        .login(
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(ok(AuthData {
        user: UserDto::from(user),
        token,
    }))
}

/// Return the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserData),
        (status = 401, description = "Not authenticated", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiSuccess<UserData>>, DomainError> {
    let user = state.auth.current_user(auth.id).await?;
    Ok(ok(UserData {
        user: UserDto::from(user),
    }))
}

/// List the caller's tasks with optional filters and sort.
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    security(("bearer" = [])),
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Tasks owned by the caller", body = TasksData),
        (status = 400, description = "Unknown filter or sort value", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<ApiSuccess<TasksData>>, DomainError> {
    let filter = TaskFilter::from_params(query.status.as_deref(), query.priority.as_deref())?;
    let sort = TaskSort::from_param(query.sort_by.as_deref())?;

    let tasks = state.tasks.list(auth.id, filter, sort).await?;
    Ok(ok(TasksData {
        tasks: tasks.into_iter().map(TaskDto::from).collect(),
    }))
}

/// Create a task owned by the caller.
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    security(("bearer" = [])),
    request_body = TaskBodyReq,
    responses(
        (status = 201, description = "Created task", body = TaskData),
        (status = 400, description = "Validation error", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<TaskBodyReq>,
) -> Result<(StatusCode, Json<ApiSuccess<TaskData>>), DomainError> {
    info!("Creating task for user {}", auth.id);
    let task = state.tasks.create(auth.id, req.try_into()?).await?;
    Ok((
        StatusCode::CREATED,
        ok(TaskData {
            task: TaskDto::from(task),
        }),
    ))
}

/// Get one of the caller's tasks by id.
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "The task", body = TaskData),
        (status = 403, description = "Owned by another user", body = crate::api::rest::response::ApiFailure),
        (status = 404, description = "Unknown or malformed id", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiSuccess<TaskData>>, DomainError> {
    let task = state.tasks.get(auth.id, &id).await?;
    Ok(ok(TaskData {
        task: TaskDto::from(task),
    }))
}

/// Full replace of a task's title/description/priority/status.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Task id")),
    request_body = TaskBodyReq,
    responses(
        (status = 200, description = "Replaced task", body = TaskData),
        (status = 400, description = "Validation error", body = crate::api::rest::response::ApiFailure),
        (status = 403, description = "Owned by another user", body = crate::api::rest::response::ApiFailure),
        (status = 404, description = "Unknown or malformed id", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn replace_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TaskBodyReq>,
) -> Result<Json<ApiSuccess<TaskData>>, DomainError> {
    let task = state.tasks.replace(auth.id, &id, req.try_into()?).await?;
    Ok(ok(TaskData {
        task: TaskDto::from(task),
    }))
}

/// Partial update of a task.
#[utoipa::path(
    patch,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Task id")),
    request_body = TaskPatchReq,
    responses(
        (status = 200, description = "Patched task", body = TaskData),
        (status = 400, description = "Validation error", body = crate::api::rest::response::ApiFailure),
        (status = 403, description = "Owned by another user", body = crate::api::rest::response::ApiFailure),
        (status = 404, description = "Unknown or malformed id", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn patch_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TaskPatchReq>,
) -> Result<Json<ApiSuccess<TaskData>>, DomainError> {
    let task = state.tasks.patch(auth.id, &id, req.try_into()?).await?;
    Ok(ok(TaskData {
        task: TaskDto::from(task),
    }))
}

/// Delete one of the caller's tasks.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted", body = MessageData),
        (status = 403, description = "Owned by another user", body = crate::api::rest::response::ApiFailure),
        (status = 404, description = "Unknown or malformed id", body = crate::api::rest::response::ApiFailure),
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiSuccess<MessageData>>, DomainError> {
    state.tasks.delete(auth.id, &id).await?;
    Ok(ok(MessageData {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
