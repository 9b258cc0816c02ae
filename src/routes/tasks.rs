use crate::{
    auth::AuthenticatedIdentity,
    error::AppError,
    models::{StatusInput, TaskInput, TaskQuery},
    store::TaskStore,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

/// Lists the caller's tasks.
///
/// Only tasks owned by the authenticated user are visible; nobody else's
/// tasks appear under any filter combination.
///
/// ## Query Parameters:
/// - `status` (optional): exact lifecycle state to match ("OPEN", "IN_PROGRESS", "DONE").
/// - `search` (optional): case-insensitive substring matched against titles and descriptions.
///
/// ## Responses:
/// - `200 OK`: JSON array of the caller's matching `Task` records.
/// - `401 Unauthorized`: no usable bearer token.
#[get("")]
pub async fn get_tasks(
    store: web::Data<TaskStore>,
    query_params: web::Query<TaskQuery>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    let identity = identity.0;
    log::debug!(
        "user {} retrieves tasks with filters {:?}",
        identity.username,
        *query_params
    );

    let tasks = store.list(identity.id, &query_params).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the caller.
///
/// The payload carries `title` and `description`; the owner comes from the
/// bearer token, and every new task starts in the "OPEN" state.
///
/// ## Responses:
/// - `201 Created`: the stored `Task`, including its assigned id.
/// - `401 Unauthorized`: no usable bearer token.
/// - `422 Unprocessable Entity`: `title` or `description` out of bounds.
#[post("")]
pub async fn create_task(
    store: web::Data<TaskStore>,
    task_data: web::Json<TaskInput>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let identity = identity.0;
    log::debug!("user {} creates a task", identity.username);

    let task = store.create(identity.id, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Fetches one of the caller's tasks by id.
///
/// A task owned by someone else answers exactly like a task that does not
/// exist.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `401 Unauthorized`: no usable bearer token.
/// - `404 Not Found`: absent or unowned id.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<i32>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    let identity = identity.0;
    log::debug!("user {} retrieves a task", identity.username);

    let task = store.get(task_id.into_inner(), identity.id).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Moves one of the caller's tasks to a new lifecycle state.
///
/// The body is `{ "status": "…" }` with one of the known spellings; anything
/// else dies at deserialization. Title and description are immutable here.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `400 Bad Request`: unknown status spelling.
/// - `401 Unauthorized`: no usable bearer token.
/// - `404 Not Found`: absent or unowned id.
#[patch("/{id}/status")]
pub async fn update_task_status(
    store: web::Data<TaskStore>,
    task_id: web::Path<i32>,
    status_data: web::Json<StatusInput>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    let identity = identity.0;
    log::debug!("user {} updates a task status", identity.username);

    let task = store
        .update_status(
            task_id.into_inner(),
            identity.id,
            status_data.into_inner().status,
        )
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes one of the caller's tasks.
///
/// One conditional statement scoped by owner; absent and unowned ids are
/// reported identically.
///
/// ## Responses:
/// - `204 No Content`: the task is gone.
/// - `401 Unauthorized`: no usable bearer token.
/// - `404 Not Found`: absent or unowned id.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<i32>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    let identity = identity.0;
    log::debug!("user {} deletes a task", identity.username);

    store.delete(task_id.into_inner(), identity.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
