//! Maintenance stages repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::stage::{CreateStage, MaintenanceStage, UpdateStage},
};

#[derive(Clone)]
pub struct StagesRepository {
    pool: Pool<Postgres>,
}

impl StagesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all stages in kanban order
    pub async fn list(&self) -> AppResult<Vec<MaintenanceStage>> {
        let rows = sqlx::query_as::<_, MaintenanceStage>(
            "SELECT * FROM maintenance_stages ORDER BY sequence, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get stage by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceStage> {
        sqlx::query_as::<_, MaintenanceStage>("SELECT * FROM maintenance_stages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Stage {} not found", id)))
    }

    /// Default stage for new requests: first in kanban order
    pub async fn first(&self) -> AppResult<Option<MaintenanceStage>> {
        let stage = sqlx::query_as::<_, MaintenanceStage>(
            "SELECT * FROM maintenance_stages ORDER BY sequence, id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(stage)
    }

    /// Stage whose name contains "repaired", used by the mark-repaired action
    pub async fn find_repaired(&self) -> AppResult<Option<MaintenanceStage>> {
        let stage = sqlx::query_as::<_, MaintenanceStage>(
            "SELECT * FROM maintenance_stages WHERE name ILIKE '%repaired%' ORDER BY sequence, id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(stage)
    }

    /// Create a new stage
    pub async fn create(&self, data: &CreateStage) -> AppResult<MaintenanceStage> {
        let row = sqlx::query_as::<_, MaintenanceStage>(
            r#"
            INSERT INTO maintenance_stages (name, sequence, fold, is_closed, is_scrap, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.sequence.unwrap_or(10))
        .bind(data.fold.unwrap_or(false))
        .bind(data.is_closed.unwrap_or(false))
        .bind(data.is_scrap.unwrap_or(false))
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an existing stage
    pub async fn update(&self, id: i32, data: &UpdateStage) -> AppResult<MaintenanceStage> {
        let mut sets: Vec<String> = Vec::new();
        let mut param_idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.sequence, "sequence");
        add_field!(data.fold, "fold");
        add_field!(data.is_closed, "is_closed");
        add_field!(data.is_scrap, "is_scrap");
        add_field!(data.description, "description");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE maintenance_stages SET {} WHERE id = {}",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.sequence);
        bind_field!(data.fold);
        bind_field!(data.is_closed);
        bind_field!(data.is_scrap);
        bind_field!(data.description);

        let result = builder.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Stage {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Count requests currently sitting in a stage
    pub async fn count_requests(&self, id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_requests WHERE stage_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Delete a stage
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_stages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Stage {} not found", id)));
        }
        Ok(())
    }
}
