//! Work center model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct WorkCenterRow {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub active: bool,
    pub sequence: i32,
    pub location: Option<String>,
    pub capacity: f64,
    pub hourly_cost: Decimal,
    pub capacity_cost: Decimal,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
    pub note: Option<String>,
    pub color: Option<i32>,
    pub alternate_ids: Vec<i32>,
    pub equipment_count: i64,
    pub request_count: i64,
    /// Hours of closed work booked in the last 30 days
    pub closed_hours_30d: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkCenterRow> for WorkCenter {
    fn from(row: WorkCenterRow) -> Self {
        let utilization_rate = utilization_rate(row.closed_hours_30d, row.capacity);
        WorkCenter {
            id: row.id,
            name: row.name,
            code: row.code,
            active: row.active,
            sequence: row.sequence,
            location: row.location,
            capacity: row.capacity,
            total_cost: row.hourly_cost + row.capacity_cost,
            hourly_cost: row.hourly_cost,
            capacity_cost: row.capacity_cost,
            team_id: row.team_id,
            team_name: row.team_name,
            note: row.note,
            color: row.color,
            alternate_ids: row.alternate_ids,
            equipment_count: row.equipment_count,
            request_count: row.request_count,
            utilization_rate,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A physical location where maintenance work is performed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkCenter {
    pub id: i32,
    pub name: String,
    /// Short unique identifier (e.g. "WC-WELD1")
    pub code: String,
    pub active: bool,
    pub sequence: i32,
    pub location: Option<String>,
    /// Working hours available per day
    pub capacity: f64,
    #[schema(value_type = f64)]
    pub hourly_cost: Decimal,
    #[schema(value_type = f64)]
    pub capacity_cost: Decimal,
    /// Combined cost per hour of operation
    #[schema(value_type = f64)]
    pub total_cost: Decimal,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
    pub note: Option<String>,
    pub color: Option<i32>,
    /// Work centers that can stand in for this one
    pub alternate_ids: Vec<i32>,
    pub equipment_count: i64,
    pub request_count: i64,
    /// Share of the last 30 days' capacity consumed by closed requests, in percent
    pub utilization_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Capacity consumed over a 30 working-day window, in percent. Zero when the
/// center has no usable capacity.
pub fn utilization_rate(closed_hours: f64, capacity: f64) -> f64 {
    if capacity <= 0.0 {
        return 0.0;
    }
    closed_hours / (capacity * 30.0) * 100.0
}

/// Create work center request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWorkCenter {
    #[validate(length(min = 1, message = "Work center name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Work center code cannot be empty"))]
    pub code: String,
    pub sequence: Option<i32>,
    pub location: Option<String>,
    pub capacity: Option<f64>,
    #[schema(value_type = Option<f64>)]
    pub hourly_cost: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub capacity_cost: Option<Decimal>,
    pub team_id: Option<i32>,
    pub note: Option<String>,
    pub color: Option<i32>,
    pub alternate_ids: Option<Vec<i32>>,
}

/// Update work center request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkCenter {
    #[validate(length(min = 1, message = "Work center name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Work center code cannot be empty"))]
    pub code: Option<String>,
    pub active: Option<bool>,
    pub sequence: Option<i32>,
    pub location: Option<String>,
    pub capacity: Option<f64>,
    #[schema(value_type = Option<f64>)]
    pub hourly_cost: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub capacity_cost: Option<Decimal>,
    pub team_id: Option<i32>,
    pub note: Option<String>,
    pub color: Option<i32>,
    /// Replaces the whole alternates list when present
    pub alternate_ids: Option<Vec<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utilization_is_zero_without_capacity() {
        assert_eq!(utilization_rate(40.0, 0.0), 0.0);
        assert_eq!(utilization_rate(40.0, -1.0), 0.0);
    }

    #[test]
    fn utilization_scales_with_booked_hours() {
        // 8h/day over 30 days = 240h of capacity
        assert_eq!(utilization_rate(0.0, 8.0), 0.0);
        assert_eq!(utilization_rate(120.0, 8.0), 50.0);
        assert_eq!(utilization_rate(240.0, 8.0), 100.0);
    }

    #[test]
    fn utilization_can_exceed_one_hundred_percent() {
        // Overbooked centers report more than 100 rather than clamping
        assert_eq!(utilization_rate(300.0, 8.0), 125.0);
    }
}
