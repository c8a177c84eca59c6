//! Maintenance request model and related types

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{KanbanState, Priority, RequestType};

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct RequestRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub color: Option<i32>,
    pub priority: i16,
    pub request_type: RequestType,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub work_center_id: Option<i32>,
    pub work_center_name: Option<String>,
    pub team_id: i32,
    pub team_name: String,
    pub technician_id: Option<i32>,
    pub technician_name: Option<String>,
    pub created_by: Option<i32>,
    pub stage_id: i32,
    pub stage_name: String,
    pub stage_is_closed: bool,
    pub kanban_state: KanbanState,
    pub request_date: NaiveDate,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub deadline: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub duration: f64,
    pub reminder_days: Option<i32>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    /// Attach the date-dependent derived fields to a stored row.
    pub fn from_row(row: RequestRow, today: NaiveDate) -> Self {
        let reminder_date = reminder_date(row.scheduled_date, row.reminder_days);
        let is_overdue = is_overdue(row.deadline, row.stage_is_closed, today);
        let days_until_deadline = days_until_deadline(row.deadline, today);
        MaintenanceRequest {
            id: row.id,
            name: row.name,
            description: row.description,
            active: row.active,
            color: row.color,
            priority: row.priority,
            priority_label: Priority::from(row.priority).to_string(),
            request_type: row.request_type,
            equipment_id: row.equipment_id,
            equipment_name: row.equipment_name,
            work_center_id: row.work_center_id,
            work_center_name: row.work_center_name,
            team_id: row.team_id,
            team_name: row.team_name,
            technician_id: row.technician_id,
            technician_name: row.technician_name,
            created_by: row.created_by,
            stage_id: row.stage_id,
            stage_name: row.stage_name,
            stage_is_closed: row.stage_is_closed,
            kanban_state: row.kanban_state,
            request_date: row.request_date,
            scheduled_date: row.scheduled_date,
            deadline: row.deadline,
            close_date: row.close_date,
            duration: row.duration,
            reminder_days: row.reminder_days,
            reminder_date,
            is_overdue,
            days_until_deadline,
            estimated_cost: row.estimated_cost,
            actual_cost: row.actual_cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A maintenance job on a piece of equipment, tracked through kanban stages
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    /// Subject line
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub color: Option<i32>,
    /// 0 = low, 1 = normal, 2 = high, 3 = urgent
    pub priority: i16,
    pub priority_label: String,
    pub request_type: RequestType,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub work_center_id: Option<i32>,
    pub work_center_name: Option<String>,
    pub team_id: i32,
    pub team_name: String,
    pub technician_id: Option<i32>,
    pub technician_name: Option<String>,
    pub created_by: Option<i32>,
    pub stage_id: i32,
    pub stage_name: String,
    pub stage_is_closed: bool,
    pub kanban_state: KanbanState,
    /// Day the problem was reported
    pub request_date: NaiveDate,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub deadline: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    /// Repair time in hours
    pub duration: f64,
    pub reminder_days: Option<i32>,
    /// Day a reminder becomes due, derived from the schedule
    pub reminder_date: Option<NaiveDate>,
    pub is_overdue: bool,
    /// Signed distance to the deadline; zero when no deadline is set
    pub days_until_deadline: i64,
    #[schema(value_type = Option<f64>)]
    pub estimated_cost: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub actual_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reminder day, `reminder_days` before the scheduled date. Absent when there
/// is no schedule or the reminder offset is unset or zero.
pub fn reminder_date(
    scheduled_date: Option<DateTime<Utc>>,
    reminder_days: Option<i32>,
) -> Option<NaiveDate> {
    let scheduled = scheduled_date?;
    let days = reminder_days.filter(|d| *d != 0)?;
    Some((scheduled - Duration::days(days as i64)).date_naive())
}

/// A request is overdue when its deadline has passed and it is still open.
pub fn is_overdue(deadline: Option<NaiveDate>, stage_is_closed: bool, today: NaiveDate) -> bool {
    match deadline {
        Some(deadline) if !stage_is_closed => deadline < today,
        _ => false,
    }
}

/// Signed number of days from `today` to the deadline, zero without one.
pub fn days_until_deadline(deadline: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match deadline {
        Some(deadline) => (deadline - today).num_days(),
        None => 0,
    }
}

/// Create request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "Request subject cannot be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub priority: Option<i16>,
    pub request_type: Option<RequestType>,
    pub equipment_id: i32,
    pub work_center_id: Option<i32>,
    /// Defaults to the equipment's team when absent
    pub team_id: Option<i32>,
    /// Defaults to the equipment's technician when absent and the team allows it
    pub technician_id: Option<i32>,
    /// Defaults to the first stage when absent
    pub stage_id: Option<i32>,
    pub kanban_state: Option<KanbanState>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub deadline: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub duration: Option<f64>,
    pub reminder_days: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub estimated_cost: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub actual_cost: Option<Decimal>,
    pub color: Option<i32>,
}

/// Update request payload
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRequest {
    #[validate(length(min = 1, message = "Request subject cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub priority: Option<i16>,
    pub request_type: Option<RequestType>,
    pub equipment_id: Option<i32>,
    pub work_center_id: Option<i32>,
    pub team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub stage_id: Option<i32>,
    pub kanban_state: Option<KanbanState>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub deadline: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub duration: Option<f64>,
    pub reminder_days: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub estimated_cost: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub actual_cost: Option<Decimal>,
    pub color: Option<i32>,
}

/// Fully resolved request state, written column-for-column once the service
/// has applied the auto-fill and stage rules. `created_by` is only used on
/// insert.
#[derive(Debug, Clone)]
pub struct RequestWrite {
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub color: Option<i32>,
    pub priority: i16,
    pub request_type: RequestType,
    pub equipment_id: i32,
    pub work_center_id: Option<i32>,
    pub team_id: i32,
    pub technician_id: Option<i32>,
    pub created_by: Option<i32>,
    pub stage_id: i32,
    pub kanban_state: KanbanState,
    pub request_date: NaiveDate,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub deadline: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub duration: f64,
    pub reminder_days: Option<i32>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
}

/// Request list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RequestQuery {
    pub equipment_id: Option<i32>,
    pub team_id: Option<i32>,
    pub stage_id: Option<i32>,
    pub work_center_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub request_type: Option<RequestType>,
    /// Only requests past their deadline and still open
    pub overdue: Option<bool>,
    /// Include archived (inactive) requests
    pub include_archived: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn reminder_date_counts_back_from_schedule() {
        let scheduled = datetime(2025, 6, 20, 9);
        assert_eq!(reminder_date(Some(scheduled), Some(3)), Some(date(2025, 6, 17)));
        assert_eq!(reminder_date(Some(scheduled), Some(1)), Some(date(2025, 6, 19)));
    }

    #[test]
    fn reminder_date_requires_schedule_and_offset() {
        assert_eq!(reminder_date(None, Some(3)), None);
        assert_eq!(reminder_date(Some(datetime(2025, 6, 20, 9)), None), None);
        assert_eq!(reminder_date(Some(datetime(2025, 6, 20, 9)), Some(0)), None);
    }

    #[test]
    fn overdue_only_while_open() {
        let today = date(2025, 6, 15);
        assert!(is_overdue(Some(date(2025, 6, 14)), false, today));
        assert!(!is_overdue(Some(date(2025, 6, 14)), true, today));
        assert!(!is_overdue(Some(today), false, today));
        assert!(!is_overdue(None, false, today));
    }

    #[test]
    fn days_until_deadline_is_signed() {
        let today = date(2025, 6, 15);
        assert_eq!(days_until_deadline(Some(date(2025, 6, 18)), today), 3);
        assert_eq!(days_until_deadline(Some(date(2025, 6, 12)), today), -3);
        assert_eq!(days_until_deadline(Some(today), today), 0);
        assert_eq!(days_until_deadline(None, today), 0);
    }
}
