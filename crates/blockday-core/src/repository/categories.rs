use crate::category::{normalize_color, normalize_name, CategoryPalette};
use crate::error::CoreError;
use crate::models::CustomCategory;
use crate::repository::{CategoryRepository, SqliteRepository};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl CategoryRepository for SqliteRepository {
    async fn add_category(&self, name: &str, color: &str) -> Result<CustomCategory, CoreError> {
        let name = normalize_name(name)?;
        let color = normalize_color(color)?;

        if CategoryPalette::is_default(&name) {
            return Err(CoreError::InvalidInput(format!(
                "'{}' is a built-in category",
                name
            )));
        }

        let existing: Option<CustomCategory> = sqlx::query_as("SELECT * FROM categories WHERE name = $1")
            .bind(&name)
            .fetch_optional(self.pool())
            .await?;
        if existing.is_some() {
            return Err(CoreError::InvalidInput(format!("Category '{}' already exists", name)));
        }

        let category = sqlx::query_as::<_, CustomCategory>(
            r#"INSERT INTO categories (id, name, color, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(color)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;

        tracing::debug!(category = %category.name, "added category");
        Ok(category)
    }

    async fn find_categories(&self) -> Result<Vec<CustomCategory>, CoreError> {
        let categories = sqlx::query_as::<_, CustomCategory>("SELECT * FROM categories ORDER BY created_at, name")
            .fetch_all(self.pool())
            .await?;
        Ok(categories)
    }

    async fn delete_category(&self, name: &str) -> Result<(), CoreError> {
        let name = normalize_name(name)?;
        if CategoryPalette::is_default(&name) {
            return Err(CoreError::InvalidInput(format!(
                "'{}' is a built-in category and cannot be deleted",
                name
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE name = $1")
            .bind(&name)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Category '{}' not found", name)));
        }
        tracing::debug!(category = %name, "deleted category");
        Ok(())
    }

    async fn palette(&self) -> Result<CategoryPalette, CoreError> {
        Ok(CategoryPalette::new(self.find_categories().await?))
    }
}
