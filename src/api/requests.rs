//! Maintenance request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::request::{CreateRequest, MaintenanceRequest, RequestQuery, UpdateRequest},
};

use super::{today, AuthenticatedUser};

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// List requests with filters and pagination
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses(
        (status = 200, description = "List of requests", body = PaginatedResponse<MaintenanceRequest>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<PaginatedResponse<MaintenanceRequest>>> {
    claims.require_read_maintenance()?;

    let (requests, total) = state.services.requests.list(&query, today()).await?;

    Ok(Json(PaginatedResponse {
        items: requests,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get request details by ID
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request details", body = MaintenanceRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequest>> {
    claims.require_read_maintenance()?;

    let request = state.services.requests.get_by_id(id, today()).await?;
    Ok(Json(request))
}

/// Create a new maintenance request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = MaintenanceRequest),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    claims.require_write_maintenance()?;

    let created = state
        .services
        .requests
        .create(&payload, Some(claims.user_id), today())
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing request; stage changes apply their kanban effects
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    claims.require_write_maintenance()?;

    let updated = state
        .services
        .requests
        .update(id, &payload, Some(claims.user_id), today())
        .await?;
    Ok(Json(updated))
}

/// Take the request: assigns the acting user as technician
#[utoipa::path(
    post,
    path = "/requests/{id}/assign-to-me",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request assigned", body = MaintenanceRequest),
        (status = 403, description = "Acting user is not on the request's team"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn assign_to_me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequest>> {
    claims.require_write_maintenance()?;

    let request = state
        .services
        .requests
        .assign_to_me(id, claims.user_id, today())
        .await?;
    Ok(Json(request))
}

/// Close the request by moving it to the "Repaired" stage
#[utoipa::path(
    post,
    path = "/requests/{id}/mark-repaired",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request marked repaired", body = MaintenanceRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn mark_repaired(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceRequest>> {
    claims.require_write_maintenance()?;

    let request = state
        .services
        .requests
        .mark_repaired(id, claims.user_id, today())
        .await?;
    Ok(Json(request))
}
