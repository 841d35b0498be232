// ABOUTME: Task storage layer using SQLite
// ABOUTME: List, create, partial update and hard delete for tasks

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::{StorageError, StorageResult};
use taskflow_core::{generate_task_id, Task, TaskCreateInput, TaskUpdateInput};

pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every task in insertion order
    pub async fn list_tasks(&self) -> StorageResult<Vec<Task>> {
        debug!("Fetching all tasks");

        let rows = sqlx::query("SELECT * FROM tasks ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_task(row)).collect()
    }

    pub async fn get_task(&self, task_id: &str) -> StorageResult<Task> {
        debug!("Fetching task: {}", task_id);

        let row = sqlx::query("SELECT * FROM tasks WHERE id = ?")
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(r) => self.row_to_task(&r),
            None => Err(StorageError::NotFound(format!("Task {}", task_id))),
        }
    }

    /// Create a task owned by `owner` unless the input names a user
    pub async fn create_task(&self, owner: &str, input: TaskCreateInput) -> StorageResult<Task> {
        let task = Task::from_input(generate_task_id(), owner, input, Utc::now())?;

        debug!("Creating task: {} (title: {})", task.id, task.title);

        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, title, description, status, priority, category,
                due_date, created_at, updated_at, user_id
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(&task.category)
        .bind(task.due_date)
        .bind(task.created_at)
        .bind(task.updated_at)
        .bind(&task.user_id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(task)
    }

    /// Merge the supplied fields into the stored task and refresh `updated_at`
    pub async fn update_task(&self, task_id: &str, input: TaskUpdateInput) -> StorageResult<Task> {
        debug!("Updating task: {}", task_id);

        let mut task = self.get_task(task_id).await?;
        task.apply_update(input, Utc::now())?;

        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, status = ?, priority = ?,
                category = ?, due_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .bind(&task.category)
        .bind(task.due_date)
        .bind(task.updated_at)
        .bind(task_id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        // Deleted between the read and the write
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Task {}", task_id)));
        }

        Ok(task)
    }

    pub async fn delete_task(&self, task_id: &str) -> StorageResult<()> {
        debug!("Deleting task: {}", task_id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Task {}", task_id)));
        }

        Ok(())
    }

    /// Convert a database row to a Task
    fn row_to_task(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<Task> {
        let status: String = row.try_get("status").map_err(StorageError::Sqlx)?;
        let priority: String = row.try_get("priority").map_err(StorageError::Sqlx)?;

        Ok(Task {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            title: row.try_get("title").map_err(StorageError::Sqlx)?,
            description: row.try_get("description").map_err(StorageError::Sqlx)?,
            status: status
                .parse()
                .map_err(|e| StorageError::InvalidFormat(format!("{}", e)))?,
            priority: priority
                .parse()
                .map_err(|e| StorageError::InvalidFormat(format!("{}", e)))?,
            category: row.try_get("category").map_err(StorageError::Sqlx)?,
            due_date: row.try_get("due_date").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
            user_id: row.try_get("user_id").map_err(StorageError::Sqlx)?,
        })
    }
}
