//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    /// Equipment statistics
    pub equipment: EquipmentStats,
    /// Request statistics
    pub requests: RequestStats,
    /// Team statistics
    pub teams: TeamStats,
}

#[derive(Serialize, ToSchema)]
pub struct EquipmentStats {
    /// Active equipment
    pub total: i64,
    /// Scrapped equipment, archived included
    pub scrapped: i64,
    /// Active equipment by category
    pub by_category: Vec<StatEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct RequestStats {
    /// Active requests
    pub total: i64,
    /// Requests in a non-closed stage
    pub open: i64,
    /// Open requests past their deadline
    pub overdue: i64,
    /// Requests per stage, kanban order
    pub by_stage: Vec<StatEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct TeamStats {
    /// Active teams
    pub total: i64,
}

/// A label with its count
#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    pub label: String,
    pub value: i64,
}

/// Get maintenance statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Maintenance statistics", body = StatsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
