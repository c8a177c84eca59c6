//! Equipment endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::equipment::{
        CreateEquipment, Equipment, EquipmentQuery, ScrapEquipment, UpdateEquipment,
    },
};

use super::{today, AuthenticatedUser};

/// List equipment with filters
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses(
        (status = 200, description = "List of equipment", body = Vec<Equipment>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    claims.require_read_assets()?;

    let equipment = state.services.equipment.list(&query, today()).await?;
    Ok(Json(equipment))
}

/// Get equipment details by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    claims.require_read_assets()?;

    let equipment = state.services.equipment.get_by_id(id, today()).await?;
    Ok(Json(equipment))
}

/// Create new equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Serial number already in use")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    claims.require_write_assets()?;

    let created = state.services.equipment.create(&payload, today()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update existing equipment; `active=false` archives it
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Serial number already in use")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    claims.require_write_assets()?;

    let updated = state
        .services
        .equipment
        .update(id, &payload, Some(claims.user_id), today())
        .await?;
    Ok(Json(updated))
}

/// Scrap equipment: marks it unusable, deactivates it and records the reason
#[utoipa::path(
    post,
    path = "/equipment/{id}/scrap",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = ScrapEquipment,
    responses(
        (status = 200, description = "Equipment scrapped", body = Equipment),
        (status = 404, description = "Equipment not found"),
        (status = 422, description = "Equipment is already scrapped")
    )
)]
pub async fn scrap_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<ScrapEquipment>,
) -> AppResult<Json<Equipment>> {
    claims.require_write_assets()?;

    let scrapped = state
        .services
        .equipment
        .scrap(id, payload.reason, Some(claims.user_id), today())
        .await?;
    Ok(Json(scrapped))
}
