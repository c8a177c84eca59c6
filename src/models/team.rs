//! Maintenance team model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A crew of technicians. Requests and equipment are always attached to a
/// team; only team members can be assigned as technicians.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceTeam {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub color: Option<i32>,
    pub note: Option<String>,
    pub leader_id: Option<i32>,
    pub leader_name: Option<String>,
    /// User ids of the team members
    pub member_ids: Vec<i32>,
    pub member_count: i64,
    /// Equipment assigned to this team
    pub equipment_count: i64,
    /// All requests ever routed to this team
    pub request_count: i64,
    /// Requests not yet in a closed stage
    pub open_request_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create team request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeam {
    #[validate(length(min = 1, message = "Team name cannot be empty"))]
    pub name: String,
    pub color: Option<i32>,
    pub note: Option<String>,
    pub leader_id: Option<i32>,
    /// Initial member list; the leader must be part of it
    pub member_ids: Option<Vec<i32>>,
}

/// Update team request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeam {
    #[validate(length(min = 1, message = "Team name cannot be empty"))]
    pub name: Option<String>,
    pub active: Option<bool>,
    pub color: Option<i32>,
    pub note: Option<String>,
    pub leader_id: Option<i32>,
    /// Replaces the whole member list when present
    pub member_ids: Option<Vec<i32>>,
}
