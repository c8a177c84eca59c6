//! Equipment categories repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{CreateCategory, EquipmentCategory, UpdateCategory},
};

const SELECT_CATEGORY: &str = r#"
    SELECT c.*,
           (SELECT COUNT(*) FROM equipment e WHERE e.category_id = c.id) AS equipment_count
    FROM equipment_categories c
"#;

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> AppResult<Vec<EquipmentCategory>> {
        let query = format!("{} ORDER BY c.name", SELECT_CATEGORY);
        let rows = sqlx::query_as::<_, EquipmentCategory>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentCategory> {
        let query = format!("{} WHERE c.id = $1", SELECT_CATEGORY);
        sqlx::query_as::<_, EquipmentCategory>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Check that a category id exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment_categories WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new category
    pub async fn create(&self, data: &CreateCategory) -> AppResult<EquipmentCategory> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO equipment_categories (name, code, color, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(data.color)
        .bind(&data.note)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing category
    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<EquipmentCategory> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut param_idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.code, "code");
        add_field!(data.color, "color");
        add_field!(data.note, "note");

        let query = format!(
            "UPDATE equipment_categories SET {} WHERE id = {}",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.code);
        bind_field!(data.color);
        bind_field!(data.note);

        let result = builder.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Count equipment attached to a category
    pub async fn count_equipment(&self, id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE category_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Delete a category
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}
