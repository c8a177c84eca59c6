//! Maintenance requests repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use super::{
    audit::insert_changes,
    equipment::{scrap_equipment, EquipmentScrap},
};
use crate::{
    error::{AppError, AppResult},
    models::{
        audit::FieldChangeEntry,
        enums::RecordType,
        request::{MaintenanceRequest, RequestQuery, RequestRow, RequestWrite},
    },
};

const SELECT_REQUEST: &str = r#"
    SELECT r.id, r.name, r.description, r.active, r.color, r.priority,
           r.request_type,
           r.equipment_id, e.name AS equipment_name,
           r.work_center_id, w.name AS work_center_name,
           r.team_id, t.name AS team_name,
           r.technician_id, u.name AS technician_name,
           r.created_by,
           r.stage_id, s.name AS stage_name, s.is_closed AS stage_is_closed,
           r.kanban_state, r.request_date, r.scheduled_date, r.deadline,
           r.close_date, r.duration, r.reminder_days,
           r.estimated_cost, r.actual_cost,
           r.created_at, r.updated_at
    FROM maintenance_requests r
    JOIN equipment e ON e.id = r.equipment_id
    LEFT JOIN work_centers w ON w.id = r.work_center_id
    JOIN maintenance_teams t ON t.id = r.team_id
    LEFT JOIN users u ON u.id = r.technician_id
    JOIN maintenance_stages s ON s.id = r.stage_id
"#;

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search requests with pagination, in kanban order
    pub async fn list(
        &self,
        query: &RequestQuery,
        today: NaiveDate,
    ) -> AppResult<(Vec<MaintenanceRequest>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(20);
        let offset = (page - 1) * per_page;

        let mut conditions = vec!["1=1".to_string()];

        if let Some(equipment_id) = query.equipment_id {
            conditions.push(format!("r.equipment_id = {}", equipment_id));
        }
        if let Some(team_id) = query.team_id {
            conditions.push(format!("r.team_id = {}", team_id));
        }
        if let Some(stage_id) = query.stage_id {
            conditions.push(format!("r.stage_id = {}", stage_id));
        }
        if let Some(work_center_id) = query.work_center_id {
            conditions.push(format!("r.work_center_id = {}", work_center_id));
        }
        if let Some(technician_id) = query.technician_id {
            conditions.push(format!("r.technician_id = {}", technician_id));
        }
        if let Some(ref request_type) = query.request_type {
            conditions.push(format!("r.request_type = '{}'", request_type.as_str()));
        }
        if query.overdue.unwrap_or(false) {
            conditions.push(format!("r.deadline < '{}' AND NOT s.is_closed", today));
        }
        if !query.include_archived.unwrap_or(false) {
            conditions.push("r.active = TRUE".to_string());
        }

        let where_clause = conditions.join(" AND ");

        let count_query = format!(
            "SELECT COUNT(*) FROM maintenance_requests r \
             JOIN maintenance_stages s ON s.id = r.stage_id WHERE {}",
            where_clause
        );
        let total: i64 = sqlx::query_scalar(&count_query)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} WHERE {} ORDER BY r.priority DESC, r.scheduled_date ASC, r.id DESC LIMIT {} OFFSET {}",
            SELECT_REQUEST, where_clause, per_page, offset
        );
        let rows = sqlx::query_as::<_, RequestRow>(&select_query)
            .fetch_all(&self.pool)
            .await?;

        let requests = rows
            .into_iter()
            .map(|row| MaintenanceRequest::from_row(row, today))
            .collect();
        Ok((requests, total))
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i32, today: NaiveDate) -> AppResult<MaintenanceRequest> {
        let query = format!("{} WHERE r.id = $1", SELECT_REQUEST);
        let row = sqlx::query_as::<_, RequestRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))?;
        Ok(MaintenanceRequest::from_row(row, today))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM maintenance_requests WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a fully resolved request, applying any equipment scrap side
    /// effect in the same transaction
    pub async fn create(
        &self,
        data: &RequestWrite,
        scrap: Option<&EquipmentScrap>,
        today: NaiveDate,
    ) -> AppResult<MaintenanceRequest> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO maintenance_requests
                (name, description, active, color, priority, request_type,
                 equipment_id, work_center_id, team_id, technician_id, created_by,
                 stage_id, kanban_state, request_date, scheduled_date, deadline,
                 close_date, duration, reminder_days, estimated_cost, actual_cost)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.active)
        .bind(data.color)
        .bind(data.priority)
        .bind(data.request_type)
        .bind(data.equipment_id)
        .bind(data.work_center_id)
        .bind(data.team_id)
        .bind(data.technician_id)
        .bind(data.created_by)
        .bind(data.stage_id)
        .bind(data.kanban_state)
        .bind(data.request_date)
        .bind(data.scheduled_date)
        .bind(data.deadline)
        .bind(data.close_date)
        .bind(data.duration)
        .bind(data.reminder_days)
        .bind(data.estimated_cost)
        .bind(data.actual_cost)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(scrap) = scrap {
            scrap_equipment(&mut *tx, scrap).await?;
        }

        tx.commit().await?;

        self.get_by_id(id, today).await
    }

    /// Write the resolved state back, recording field changes and any
    /// equipment scrap side effect atomically
    pub async fn update(
        &self,
        id: i32,
        data: &RequestWrite,
        changes: &[FieldChangeEntry],
        changed_by: Option<i32>,
        scrap: Option<&EquipmentScrap>,
        today: NaiveDate,
    ) -> AppResult<MaintenanceRequest> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE maintenance_requests
            SET name = $1, description = $2, active = $3, color = $4,
                priority = $5, request_type = $6, equipment_id = $7,
                work_center_id = $8, team_id = $9, technician_id = $10,
                stage_id = $11, kanban_state = $12, request_date = $13,
                scheduled_date = $14, deadline = $15, close_date = $16,
                duration = $17, reminder_days = $18, estimated_cost = $19,
                actual_cost = $20, updated_at = $21
            WHERE id = $22
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.active)
        .bind(data.color)
        .bind(data.priority)
        .bind(data.request_type)
        .bind(data.equipment_id)
        .bind(data.work_center_id)
        .bind(data.team_id)
        .bind(data.technician_id)
        .bind(data.stage_id)
        .bind(data.kanban_state)
        .bind(data.request_date)
        .bind(data.scheduled_date)
        .bind(data.deadline)
        .bind(data.close_date)
        .bind(data.duration)
        .bind(data.reminder_days)
        .bind(data.estimated_cost)
        .bind(data.actual_cost)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Maintenance request {} not found",
                id
            )));
        }

        if let Some(scrap) = scrap {
            scrap_equipment(&mut *tx, scrap).await?;
        }

        if !changes.is_empty() {
            insert_changes(&mut *tx, RecordType::Request, id, changed_by, changes).await?;
        }

        tx.commit().await?;

        self.get_by_id(id, today).await
    }
}
