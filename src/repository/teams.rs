//! Maintenance teams repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::audit::insert_changes;
use crate::{
    error::{AppError, AppResult},
    models::{
        audit::FieldChangeEntry,
        enums::RecordType,
        team::{CreateTeam, MaintenanceTeam, UpdateTeam},
    },
};

const SELECT_TEAM: &str = r#"
    SELECT t.id, t.name, t.active, t.color, t.note, t.leader_id,
           u.name AS leader_name,
           ARRAY(SELECT m.user_id FROM maintenance_team_members m
                 WHERE m.team_id = t.id ORDER BY m.user_id) AS member_ids,
           (SELECT COUNT(*) FROM maintenance_team_members m
            WHERE m.team_id = t.id) AS member_count,
           (SELECT COUNT(*) FROM equipment e
            WHERE e.team_id = t.id AND e.active = TRUE) AS equipment_count,
           (SELECT COUNT(*) FROM maintenance_requests r
            WHERE r.team_id = t.id AND r.active = TRUE) AS request_count,
           (SELECT COUNT(*) FROM maintenance_requests r
            JOIN maintenance_stages s ON s.id = r.stage_id
            WHERE r.team_id = t.id AND r.active = TRUE AND NOT s.is_closed) AS open_request_count,
           t.created_at, t.updated_at
    FROM maintenance_teams t
    LEFT JOIN users u ON u.id = t.leader_id
"#;

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List teams, optionally including archived ones
    pub async fn list(&self, include_archived: bool) -> AppResult<Vec<MaintenanceTeam>> {
        let query = if include_archived {
            format!("{} ORDER BY t.name", SELECT_TEAM)
        } else {
            format!("{} WHERE t.active = TRUE ORDER BY t.name", SELECT_TEAM)
        };
        let teams = sqlx::query_as::<_, MaintenanceTeam>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(teams)
    }

    /// Get team by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTeam> {
        let query = format!("{} WHERE t.id = $1", SELECT_TEAM);
        sqlx::query_as::<_, MaintenanceTeam>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    /// Check whether a team exists
    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM maintenance_teams WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Check whether a user belongs to a team
    pub async fn is_member(&self, team_id: i32, user_id: i32) -> AppResult<bool> {
        let is_member: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM maintenance_team_members WHERE team_id = $1 AND user_id = $2)",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(is_member)
    }

    /// Create a team along with its member list
    pub async fn create(&self, data: &CreateTeam) -> AppResult<MaintenanceTeam> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO maintenance_teams (name, color, note, leader_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(data.color.unwrap_or(0))
        .bind(&data.note)
        .bind(data.leader_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(ref members) = data.member_ids {
            if !members.is_empty() {
                sqlx::query(
                    "INSERT INTO maintenance_team_members (team_id, user_id) SELECT $1, UNNEST($2::INT[]) ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(members)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update a team, recording field changes; a provided member list
    /// replaces the current one
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateTeam,
        changes: &[FieldChangeEntry],
        changed_by: Option<i32>,
    ) -> AppResult<MaintenanceTeam> {
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
        add_field!(data.active, "active");
        add_field!(data.color, "color");
        add_field!(data.note, "note");
        add_field!(data.leader_id, "leader_id");

        let query = format!(
            "UPDATE maintenance_teams SET {} WHERE id = {}",
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
        bind_field!(data.active);
        bind_field!(data.color);
        bind_field!(data.note);
        bind_field!(data.leader_id);

        let result = builder.execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }

        if let Some(ref members) = data.member_ids {
            sqlx::query("DELETE FROM maintenance_team_members WHERE team_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if !members.is_empty() {
                sqlx::query(
                    "INSERT INTO maintenance_team_members (team_id, user_id) SELECT $1, UNNEST($2::INT[]) ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(members)
                .execute(&mut *tx)
                .await?;
            }
        }

        if !changes.is_empty() {
            insert_changes(&mut *tx, RecordType::Team, id, changed_by, changes).await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }
}
