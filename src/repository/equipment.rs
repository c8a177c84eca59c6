//! Equipment repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{PgConnection, Pool, Postgres};

use super::audit::{insert_changes, insert_message};
use crate::{
    error::{AppError, AppResult},
    models::{
        audit::FieldChangeEntry,
        enums::RecordType,
        equipment::{Equipment, EquipmentQuery, EquipmentRow, EquipmentWrite},
    },
};

const SELECT_EQUIPMENT: &str = r#"
    SELECT e.id, e.name, e.serial_number, e.active,
           e.category_id, c.name AS category_name,
           e.ownership_type,
           e.department_id, d.name AS department_name,
           e.employee_id, emp.name AS employee_name,
           e.team_id, t.name AS team_name,
           e.technician_id, u.name AS technician_name,
           e.work_center_id, w.name AS work_center_name,
           e.purchase_date, e.purchase_value, e.warranty_expiry,
           e.vendor_id, v.name AS vendor_name,
           e.location, e.is_scrap, e.scrap_date, e.scrap_reason,
           e.note, e.color,
           (SELECT COUNT(*) FROM maintenance_requests r
            WHERE r.equipment_id = e.id) AS request_count,
           (SELECT COUNT(*) FROM maintenance_requests r
            JOIN maintenance_stages s ON s.id = r.stage_id
            WHERE r.equipment_id = e.id AND r.active = TRUE
              AND NOT s.is_closed) AS open_request_count,
           e.created_at, e.updated_at
    FROM equipment e
    JOIN equipment_categories c ON c.id = e.category_id
    LEFT JOIN departments d ON d.id = e.department_id
    LEFT JOIN employees emp ON emp.id = e.employee_id
    JOIN maintenance_teams t ON t.id = e.team_id
    LEFT JOIN users u ON u.id = e.technician_id
    LEFT JOIN work_centers w ON w.id = e.work_center_id
    LEFT JOIN vendors v ON v.id = e.vendor_id
"#;

/// Parameters for marking a piece of equipment scrapped. The direct scrap
/// action archives the record as well; stage-driven scrap leaves `active`
/// untouched.
#[derive(Debug, Clone)]
pub struct EquipmentScrap {
    pub equipment_id: i32,
    pub scrap_date: NaiveDate,
    pub reason: Option<String>,
    pub deactivate: bool,
    pub message: String,
    pub author_id: Option<i32>,
}

/// Scrap an equipment record inside the caller's transaction. Returns false
/// without touching anything when the record is already scrapped.
pub(crate) async fn scrap_equipment(
    conn: &mut PgConnection,
    data: &EquipmentScrap,
) -> AppResult<bool> {
    let was_active: Option<bool> =
        sqlx::query_scalar("SELECT active FROM equipment WHERE id = $1 AND is_scrap = FALSE FOR UPDATE")
            .bind(data.equipment_id)
            .fetch_optional(&mut *conn)
            .await?;
    let Some(was_active) = was_active else {
        return Ok(false);
    };

    sqlx::query(
        r#"
        UPDATE equipment
        SET is_scrap = TRUE,
            scrap_date = $2,
            scrap_reason = COALESCE($3, scrap_reason),
            active = CASE WHEN $4 THEN FALSE ELSE active END,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(data.equipment_id)
    .bind(data.scrap_date)
    .bind(&data.reason)
    .bind(data.deactivate)
    .execute(&mut *conn)
    .await?;

    let mut changes = vec![
        FieldChangeEntry {
            field_name: "is_scrap",
            old_value: Some("false".to_string()),
            new_value: Some("true".to_string()),
        },
        FieldChangeEntry {
            field_name: "scrap_date",
            old_value: None,
            new_value: Some(data.scrap_date.to_string()),
        },
    ];
    if data.deactivate && was_active {
        changes.push(FieldChangeEntry {
            field_name: "active",
            old_value: Some("true".to_string()),
            new_value: Some("false".to_string()),
        });
    }
    insert_changes(conn, RecordType::Equipment, data.equipment_id, data.author_id, &changes)
        .await?;
    insert_message(
        conn,
        RecordType::Equipment,
        data.equipment_id,
        data.author_id,
        &data.message,
        "notification",
    )
    .await?;

    Ok(true)
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with optional filters
    pub async fn list(&self, query: &EquipmentQuery, today: NaiveDate) -> AppResult<Vec<Equipment>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx = 1;

        if query.name.is_some() {
            conditions.push(format!(
                "(e.name ILIKE ${0} OR e.serial_number ILIKE ${0})",
                param_idx
            ));
            param_idx += 1;
        }
        if query.category_id.is_some() {
            conditions.push(format!("e.category_id = ${}", param_idx));
            param_idx += 1;
        }
        if query.team_id.is_some() {
            conditions.push(format!("e.team_id = ${}", param_idx));
            param_idx += 1;
        }
        if query.work_center_id.is_some() {
            conditions.push(format!("e.work_center_id = ${}", param_idx));
            param_idx += 1;
        }
        if !query.include_archived.unwrap_or(false) {
            conditions.push("e.active = TRUE".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("{}{} ORDER BY e.name, e.id", SELECT_EQUIPMENT, where_clause);

        let mut builder = sqlx::query_as::<_, EquipmentRow>(&sql);
        if let Some(ref name) = query.name {
            builder = builder.bind(format!("%{}%", name));
        }
        if let Some(category_id) = query.category_id {
            builder = builder.bind(category_id);
        }
        if let Some(team_id) = query.team_id {
            builder = builder.bind(team_id);
        }
        if let Some(work_center_id) = query.work_center_id {
            builder = builder.bind(work_center_id);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| Equipment::from_row(row, today))
            .collect())
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32, today: NaiveDate) -> AppResult<Equipment> {
        let query = format!("{} WHERE e.id = $1", SELECT_EQUIPMENT);
        let row = sqlx::query_as::<_, EquipmentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
        Ok(Equipment::from_row(row, today))
    }

    /// Check whether an equipment record exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Check if a serial number is already taken, optionally excluding a record
    pub async fn serial_exists(&self, serial: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = match exclude_id {
            Some(id) => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM equipment WHERE LOWER(serial_number) = LOWER($1) AND id != $2)",
                )
                .bind(serial)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM equipment WHERE LOWER(serial_number) = LOWER($1))",
                )
                .bind(serial)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(exists)
    }

    /// Insert a fully resolved equipment record
    pub async fn create(&self, data: &EquipmentWrite, today: NaiveDate) -> AppResult<Equipment> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO equipment
                (name, serial_number, active, category_id, ownership_type,
                 department_id, employee_id, team_id, technician_id, work_center_id,
                 purchase_date, purchase_value, warranty_expiry, vendor_id,
                 location, note, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(data.active)
        .bind(data.category_id)
        .bind(data.ownership_type)
        .bind(data.department_id)
        .bind(data.employee_id)
        .bind(data.team_id)
        .bind(data.technician_id)
        .bind(data.work_center_id)
        .bind(data.purchase_date)
        .bind(data.purchase_value)
        .bind(data.warranty_expiry)
        .bind(data.vendor_id)
        .bind(&data.location)
        .bind(&data.note)
        .bind(data.color)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id, today).await
    }

    /// Write the resolved state back and record the field changes atomically
    pub async fn update(
        &self,
        id: i32,
        data: &EquipmentWrite,
        changes: &[FieldChangeEntry],
        changed_by: Option<i32>,
        today: NaiveDate,
    ) -> AppResult<Equipment> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE equipment
            SET name = $1, serial_number = $2, active = $3, category_id = $4,
                ownership_type = $5, department_id = $6, employee_id = $7,
                team_id = $8, technician_id = $9, work_center_id = $10,
                purchase_date = $11, purchase_value = $12, warranty_expiry = $13,
                vendor_id = $14, location = $15, note = $16, color = $17,
                updated_at = $18
            WHERE id = $19
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(data.active)
        .bind(data.category_id)
        .bind(data.ownership_type)
        .bind(data.department_id)
        .bind(data.employee_id)
        .bind(data.team_id)
        .bind(data.technician_id)
        .bind(data.work_center_id)
        .bind(data.purchase_date)
        .bind(data.purchase_value)
        .bind(data.warranty_expiry)
        .bind(data.vendor_id)
        .bind(&data.location)
        .bind(&data.note)
        .bind(data.color)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }

        if !changes.is_empty() {
            insert_changes(&mut *tx, RecordType::Equipment, id, changed_by, changes).await?;
        }

        tx.commit().await?;

        self.get_by_id(id, today).await
    }

    /// Scrap an equipment record with its audit note in one transaction
    pub async fn scrap(&self, data: &EquipmentScrap) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        let applied = scrap_equipment(&mut *tx, data).await?;
        tx.commit().await?;
        Ok(applied)
    }
}
