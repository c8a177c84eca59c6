//! Work centers repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::audit::insert_changes;
use crate::{
    error::{AppError, AppResult},
    models::{
        audit::FieldChangeEntry,
        enums::RecordType,
        work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter, WorkCenterRow},
    },
};

const SELECT_WORK_CENTER: &str = r#"
    SELECT w.id, w.name, w.code, w.active, w.sequence, w.location,
           w.capacity, w.hourly_cost, w.capacity_cost,
           w.team_id, t.name AS team_name, w.note, w.color,
           ARRAY(SELECT a.alternate_id FROM work_center_alternates a
                 WHERE a.work_center_id = w.id ORDER BY a.alternate_id) AS alternate_ids,
           (SELECT COUNT(*) FROM equipment e
            WHERE e.work_center_id = w.id AND e.active = TRUE) AS equipment_count,
           (SELECT COUNT(*) FROM maintenance_requests r
            WHERE r.work_center_id = w.id AND r.active = TRUE) AS request_count,
           COALESCE((SELECT SUM(r.duration) FROM maintenance_requests r
                     JOIN maintenance_stages s ON s.id = r.stage_id
                     WHERE r.work_center_id = w.id AND s.is_closed
                       AND r.close_date >= CURRENT_DATE - 30), 0)::DOUBLE PRECISION
               AS closed_hours_30d,
           w.created_at, w.updated_at
    FROM work_centers w
    LEFT JOIN maintenance_teams t ON t.id = w.team_id
"#;

#[derive(Clone)]
pub struct WorkCentersRepository {
    pool: Pool<Postgres>,
}

impl WorkCentersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List work centers, optionally including archived ones
    pub async fn list(&self, include_archived: bool) -> AppResult<Vec<WorkCenter>> {
        let query = if include_archived {
            format!("{} ORDER BY w.sequence, w.name", SELECT_WORK_CENTER)
        } else {
            format!(
                "{} WHERE w.active = TRUE ORDER BY w.sequence, w.name",
                SELECT_WORK_CENTER
            )
        };
        let rows = sqlx::query_as::<_, WorkCenterRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get work center by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<WorkCenter> {
        let query = format!("{} WHERE w.id = $1", SELECT_WORK_CENTER);
        let row = sqlx::query_as::<_, WorkCenterRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work center {} not found", id)))?;
        Ok(row.into())
    }

    /// Check whether a work center exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM work_centers WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Check if a code is already taken, optionally excluding a work center
    pub async fn code_exists(&self, code: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = match exclude_id {
            Some(id) => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM work_centers WHERE LOWER(code) = LOWER($1) AND id != $2)",
                )
                .bind(code)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM work_centers WHERE LOWER(code) = LOWER($1))",
                )
                .bind(code)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(exists)
    }

    /// Count how many of the given IDs refer to real work centers
    pub async fn count_existing(&self, ids: &[i32]) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM work_centers WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Create a work center along with its alternates list
    pub async fn create(&self, data: &CreateWorkCenter) -> AppResult<WorkCenter> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO work_centers
                (name, code, sequence, location, capacity, hourly_cost, capacity_cost,
                 team_id, note, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.code)
        .bind(data.sequence.unwrap_or(10))
        .bind(&data.location)
        .bind(data.capacity.unwrap_or(8.0))
        .bind(data.hourly_cost.unwrap_or_default())
        .bind(data.capacity_cost.unwrap_or_default())
        .bind(data.team_id)
        .bind(&data.note)
        .bind(data.color)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(ref alternates) = data.alternate_ids {
            if !alternates.is_empty() {
                sqlx::query(
                    "INSERT INTO work_center_alternates (work_center_id, alternate_id) SELECT $1, UNNEST($2::INT[]) ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(alternates)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update a work center, recording field changes; a provided alternates
    /// list replaces the current one
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateWorkCenter,
        changes: &[FieldChangeEntry],
        changed_by: Option<i32>,
    ) -> AppResult<WorkCenter> {
        let mut tx = self.pool.begin().await?;

        let mut sets: Vec<String> = vec!["updated_at = $1".to_string()];
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
        add_field!(data.active, "active");
        add_field!(data.sequence, "sequence");
        add_field!(data.location, "location");
        add_field!(data.capacity, "capacity");
        add_field!(data.hourly_cost, "hourly_cost");
        add_field!(data.capacity_cost, "capacity_cost");
        add_field!(data.team_id, "team_id");
        add_field!(data.note, "note");
        add_field!(data.color, "color");

        let query = format!(
            "UPDATE work_centers SET {} WHERE id = {}",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query(&query).bind(Utc::now());

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.code);
        bind_field!(data.active);
        bind_field!(data.sequence);
        bind_field!(data.location);
        bind_field!(data.capacity);
        bind_field!(data.hourly_cost);
        bind_field!(data.capacity_cost);
        bind_field!(data.team_id);
        bind_field!(data.note);
        bind_field!(data.color);

        let result = builder.execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Work center {} not found", id)));
        }

        if let Some(ref alternates) = data.alternate_ids {
            sqlx::query("DELETE FROM work_center_alternates WHERE work_center_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if !alternates.is_empty() {
                sqlx::query(
                    "INSERT INTO work_center_alternates (work_center_id, alternate_id) SELECT $1, UNNEST($2::INT[]) ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(alternates)
                .execute(&mut *tx)
                .await?;
            }
        }

        if !changes.is_empty() {
            insert_changes(&mut *tx, RecordType::WorkCenter, id, changed_by, changes).await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }
}
