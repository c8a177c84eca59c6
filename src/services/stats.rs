//! Statistics service

use sqlx::Row;

use crate::{
    api::stats::{EquipmentStats, RequestStats, StatEntry, StatsResponse, TeamStats},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Fleet-wide maintenance statistics. Counts cover active records only,
    /// except the scrapped total which includes deactivated equipment.
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let pool = &self.repository.pool;

        let total_equipment: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE active = TRUE")
                .fetch_one(pool)
                .await?;

        let scrapped_equipment: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE is_scrap = TRUE")
                .fetch_one(pool)
                .await?;

        let equipment_by_category = sqlx::query(
            r#"
            SELECT c.name as label, COUNT(*) as value
            FROM equipment e
            JOIN equipment_categories c ON e.category_id = c.id
            WHERE e.active = TRUE
            GROUP BY c.name
            ORDER BY value DESC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        let total_requests: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_requests WHERE active = TRUE")
                .fetch_one(pool)
                .await?;

        let open_requests: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM maintenance_requests r
            JOIN maintenance_stages s ON r.stage_id = s.id
            WHERE r.active = TRUE AND s.is_closed = FALSE
            "#,
        )
        .fetch_one(pool)
        .await?;

        let overdue_requests: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM maintenance_requests r
            JOIN maintenance_stages s ON r.stage_id = s.id
            WHERE r.active = TRUE AND s.is_closed = FALSE AND r.deadline < CURRENT_DATE
            "#,
        )
        .fetch_one(pool)
        .await?;

        // Kanban order, empty stages included
        let requests_by_stage = sqlx::query(
            r#"
            SELECT s.name as label, COUNT(r.id) as value
            FROM maintenance_stages s
            LEFT JOIN maintenance_requests r ON r.stage_id = s.id AND r.active = TRUE
            GROUP BY s.name, s.sequence, s.id
            ORDER BY s.sequence, s.id
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        let total_teams: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_teams WHERE active = TRUE")
                .fetch_one(pool)
                .await?;

        Ok(StatsResponse {
            equipment: EquipmentStats {
                total: total_equipment,
                scrapped: scrapped_equipment,
                by_category: equipment_by_category,
            },
            requests: RequestStats {
                total: total_requests,
                open: open_requests,
                overdue: overdue_requests,
                by_stage: requests_by_stage,
            },
            teams: TeamStats { total: total_teams },
        })
    }
}
