//! Maintenance stage endpoints
//!
//! Stage reads are part of day-to-day maintenance work; reshaping the kanban
//! itself is a settings concern.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::stage::{CreateStage, MaintenanceStage, UpdateStage},
};

use super::AuthenticatedUser;

/// List stages in kanban order
#[utoipa::path(
    get,
    path = "/stages",
    tag = "stages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of stages", body = Vec<MaintenanceStage>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_stages(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceStage>>> {
    claims.require_read_maintenance()?;

    let stages = state.services.stages.list().await?;
    Ok(Json(stages))
}

/// Get stage details by ID
#[utoipa::path(
    get,
    path = "/stages/{id}",
    tag = "stages",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Stage ID")
    ),
    responses(
        (status = 200, description = "Stage details", body = MaintenanceStage),
        (status = 404, description = "Stage not found")
    )
)]
pub async fn get_stage(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceStage>> {
    claims.require_read_maintenance()?;

    let stage = state.services.stages.get_by_id(id).await?;
    Ok(Json(stage))
}

/// Create a new stage
#[utoipa::path(
    post,
    path = "/stages",
    tag = "stages",
    security(("bearer_auth" = [])),
    request_body = CreateStage,
    responses(
        (status = 201, description = "Stage created", body = MaintenanceStage),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_stage(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateStage>,
) -> AppResult<(StatusCode, Json<MaintenanceStage>)> {
    claims.require_write_settings()?;

    let created = state.services.stages.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing stage
#[utoipa::path(
    put,
    path = "/stages/{id}",
    tag = "stages",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Stage ID")
    ),
    request_body = UpdateStage,
    responses(
        (status = 200, description = "Stage updated", body = MaintenanceStage),
        (status = 404, description = "Stage not found")
    )
)]
pub async fn update_stage(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStage>,
) -> AppResult<Json<MaintenanceStage>> {
    claims.require_write_settings()?;

    let updated = state.services.stages.update(id, &payload).await?;
    Ok(Json(updated))
}

/// Delete a stage
#[utoipa::path(
    delete,
    path = "/stages/{id}",
    tag = "stages",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Stage ID")
    ),
    responses(
        (status = 204, description = "Stage deleted"),
        (status = 404, description = "Stage not found"),
        (status = 409, description = "Stage still has requests")
    )
)]
pub async fn delete_stage(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write_settings()?;

    state.services.stages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
