// ABOUTME: Category storage layer using SQLite
// ABOUTME: CRUD for categories with per-owner unique names

use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::{StorageError, StorageResult};
use taskflow_core::{generate_category_id, Category, CategoryCreateInput, CategoryUpdateInput};

pub struct CategoryStorage {
    pool: SqlitePool,
}

impl CategoryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every category in insertion order
    pub async fn list_categories(&self) -> StorageResult<Vec<Category>> {
        debug!("Fetching all categories");

        let rows = sqlx::query("SELECT * FROM categories ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_category(row)).collect()
    }

    pub async fn get_category(&self, category_id: &str) -> StorageResult<Category> {
        debug!("Fetching category: {}", category_id);

        let row = sqlx::query("SELECT * FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(r) => self.row_to_category(&r),
            None => Err(StorageError::NotFound(format!("Category {}", category_id))),
        }
    }

    pub async fn create_category(
        &self,
        owner: &str,
        input: CategoryCreateInput,
    ) -> StorageResult<Category> {
        let category = Category::from_input(generate_category_id(), owner, input)?;

        debug!("Creating category: {} (name: {})", category.id, category.name);

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, color, user_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.color)
        .bind(&category.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &category.name))?;

        Ok(category)
    }

    /// Merge the supplied fields into the stored category. Tasks that refer
    /// to the previous name keep it.
    pub async fn update_category(
        &self,
        category_id: &str,
        input: CategoryUpdateInput,
    ) -> StorageResult<Category> {
        debug!("Updating category: {}", category_id);

        let mut category = self.get_category(category_id).await?;
        category.apply_update(input)?;

        let result = sqlx::query("UPDATE categories SET name = ?, color = ? WHERE id = ?")
            .bind(&category.name)
            .bind(&category.color)
            .bind(category_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &category.name))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Category {}", category_id)));
        }

        Ok(category)
    }

    /// Delete a category permanently. Tasks are not touched.
    pub async fn delete_category(&self, category_id: &str) -> StorageResult<()> {
        debug!("Deleting category: {}", category_id);

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(category_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("Category {}", category_id)));
        }

        Ok(())
    }

    /// Convert a database row to a Category
    fn row_to_category(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<Category> {
        Ok(Category {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            color: row.try_get("color").map_err(StorageError::Sqlx)?,
            user_id: row.try_get("user_id").map_err(StorageError::Sqlx)?,
        })
    }
}

fn map_unique_violation(error: sqlx::Error, name: &str) -> StorageError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            StorageError::DuplicateName(name.to_string())
        }
        _ => StorageError::Sqlx(error),
    }
}
