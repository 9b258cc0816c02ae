use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the lifecycle state of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is yet to be started. The initial state of every new task.
    Open,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

/// Input structure for creating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// The description of the task. Required.
    /// Must be between 1 and 1000 characters.
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
}

/// Input structure for moving a task to a new lifecycle state.
/// Unknown status spellings are rejected at deserialization.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusInput {
    /// The status to move the task to.
    pub status: TaskStatus,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: i32,
    /// The title of the task.
    pub title: String,
    /// The description of the task.
    pub description: String,
    /// The current lifecycle state of the task.
    pub status: TaskStatus,
    /// Identifier of the user who owns the task.
    pub user_id: i32,
}

/// Represents query parameters for filtering tasks when listing them.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Filter tasks by exact status.
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring matched against title or description.
    pub search: Option<String>,
}
