//! Work center endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter},
};

use super::AuthenticatedUser;

#[derive(Deserialize)]
pub struct WorkCenterListParams {
    pub include_archived: Option<bool>,
}

/// List work centers with cost and utilization figures
#[utoipa::path(
    get,
    path = "/work-centers",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(
        ("include_archived" = Option<bool>, Query, description = "Include archived work centers")
    ),
    responses(
        (status = 200, description = "List of work centers", body = Vec<WorkCenter>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_work_centers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(params): Query<WorkCenterListParams>,
) -> AppResult<Json<Vec<WorkCenter>>> {
    claims.require_read_assets()?;

    let work_centers = state
        .services
        .work_centers
        .list(params.include_archived.unwrap_or(false))
        .await?;
    Ok(Json(work_centers))
}

/// Get work center details by ID
#[utoipa::path(
    get,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Work center ID")
    ),
    responses(
        (status = 200, description = "Work center details", body = WorkCenter),
        (status = 404, description = "Work center not found")
    )
)]
pub async fn get_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<WorkCenter>> {
    claims.require_read_assets()?;

    let work_center = state.services.work_centers.get_by_id(id).await?;
    Ok(Json(work_center))
}

/// Create a new work center
#[utoipa::path(
    post,
    path = "/work-centers",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    request_body = CreateWorkCenter,
    responses(
        (status = 201, description = "Work center created", body = WorkCenter),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Code already in use")
    )
)]
pub async fn create_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateWorkCenter>,
) -> AppResult<(StatusCode, Json<WorkCenter>)> {
    claims.require_write_assets()?;

    let created = state.services.work_centers.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing work center; `active=false` archives it
#[utoipa::path(
    put,
    path = "/work-centers/{id}",
    tag = "work-centers",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Work center ID")
    ),
    request_body = UpdateWorkCenter,
    responses(
        (status = 200, description = "Work center updated", body = WorkCenter),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Work center not found"),
        (status = 409, description = "Code already in use")
    )
)]
pub async fn update_work_center(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWorkCenter>,
) -> AppResult<Json<WorkCenter>> {
    claims.require_write_assets()?;

    let updated = state
        .services
        .work_centers
        .update(id, &payload, Some(claims.user_id))
        .await?;
    Ok(Json(updated))
}
