use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskQuery, TaskStatus};
use sqlx::PgPool;

/// Persistence boundary for tasks.
///
/// Every read, update, and delete is predicated on the owner's id inside the
/// statement itself, so an unowned record is indistinguishable from an
/// absent one.
#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists the owner's tasks.
    ///
    /// Supports filtering by exact `status` and by a `search` term matched
    /// case-insensitively against titles and descriptions. Results are
    /// ordered by id for a stable snapshot.
    #[allow(unused_assignments)]
    pub async fn list(&self, owner_id: i32, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        // Base query selects the owner's tasks. Filter conditions are
        // dynamically appended.
        let mut sql = String::from(
            "SELECT id, title, description, status, user_id FROM tasks WHERE user_id = $1",
        );
        let mut param_count = 2;

        let mut conditions: Vec<String> = Vec::new();

        if query.status.is_some() {
            conditions.push(format!("status = ${}", param_count));
            param_count += 1;
        }
        if query.search.is_some() {
            conditions.push(format!("(title ILIKE ${}", param_count));
            param_count += 1;
            conditions
                .last_mut()
                .unwrap()
                .push_str(&format!(" OR description ILIKE ${})", param_count));
            param_count += 1;
        }

        if !conditions.is_empty() {
            sql.push_str(" AND ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str(" ORDER BY id");

        let mut query_builder = sqlx::query_as::<_, Task>(&sql);

        query_builder = query_builder.bind(owner_id);

        if let Some(status) = &query.status {
            query_builder = query_builder.bind(status);
        }
        if let Some(search) = &query.search {
            let search_pattern = format!("%{}%", search);
            query_builder = query_builder.bind(search_pattern.clone());
            query_builder = query_builder.bind(search_pattern);
        }

        let tasks = query_builder.fetch_all(&self.pool).await?;

        Ok(tasks)
    }

    /// Fetches one task, scoped to its owner in the same statement.
    pub async fn get(&self, id: i32, owner_id: i32) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, user_id
             FROM tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        task.ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Creates a task owned by `owner_id`. New tasks always start out `OPEN`.
    pub async fn create(&self, owner_id: i32, input: TaskInput) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, description, status, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, title, description, status, user_id",
        )
        .bind(input.title)
        .bind(input.description)
        .bind(TaskStatus::Open)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Moves a task to a new lifecycle state.
    ///
    /// The task is first fetched through `get`, so a missing or unowned task
    /// surfaces the usual `NotFound` before any write is attempted.
    pub async fn update_status(
        &self,
        id: i32,
        owner_id: i32,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        self.get(id, owner_id).await?;

        let updated = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET status = $1 WHERE id = $2 AND user_id = $3
             RETURNING id, title, description, status, user_id",
        )
        .bind(status)
        .bind(id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Deletes a task in one conditional statement. Zero affected rows means
    /// absent or unowned, reported as the same `NotFound`.
    pub async fn delete(&self, id: i32, owner_id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }

        Ok(())
    }
}
