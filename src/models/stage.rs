//! Maintenance stage model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A column of the request kanban. Stages are shared by all teams and ordered
/// by (sequence, id); the first one is the default for new requests.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceStage {
    pub id: i32,
    pub name: String,
    pub sequence: i32,
    /// Folded on the kanban board
    pub fold: bool,
    /// Requests in this stage count as done
    pub is_closed: bool,
    /// Reaching this stage scraps the linked equipment
    pub is_scrap: bool,
    pub description: Option<String>,
}

/// Create stage request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStage {
    #[validate(length(min = 1, message = "Stage name cannot be empty"))]
    pub name: String,
    pub sequence: Option<i32>,
    pub fold: Option<bool>,
    pub is_closed: Option<bool>,
    pub is_scrap: Option<bool>,
    pub description: Option<String>,
}

/// Update stage request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStage {
    #[validate(length(min = 1, message = "Stage name cannot be empty"))]
    pub name: Option<String>,
    pub sequence: Option<i32>,
    pub fold: Option<bool>,
    pub is_closed: Option<bool>,
    pub is_scrap: Option<bool>,
    pub description: Option<String>,
}
