//! Maintenance team endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::team::{CreateTeam, MaintenanceTeam, UpdateTeam},
};

use super::AuthenticatedUser;

#[derive(Deserialize)]
pub struct TeamListParams {
    pub include_archived: Option<bool>,
}

/// List teams with member and workload counts
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(
        ("include_archived" = Option<bool>, Query, description = "Include archived teams")
    ),
    responses(
        (status = 200, description = "List of teams", body = Vec<MaintenanceTeam>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(params): Query<TeamListParams>,
) -> AppResult<Json<Vec<MaintenanceTeam>>> {
    claims.require_read_maintenance()?;

    let teams = state
        .services
        .teams
        .list(params.include_archived.unwrap_or(false))
        .await?;
    Ok(Json(teams))
}

/// Get team details by ID
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team details", body = MaintenanceTeam),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceTeam>> {
    claims.require_read_maintenance()?;

    let team = state.services.teams.get_by_id(id).await?;
    Ok(Json(team))
}

/// Create a new team
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = MaintenanceTeam),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<MaintenanceTeam>)> {
    claims.require_write_maintenance()?;

    let created = state.services.teams.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing team; `active=false` archives it
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Team ID")
    ),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = MaintenanceTeam),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTeam>,
) -> AppResult<Json<MaintenanceTeam>> {
    claims.require_write_maintenance()?;

    let updated = state
        .services
        .teams
        .update(id, &payload, Some(claims.user_id))
        .await?;
    Ok(Json(updated))
}
