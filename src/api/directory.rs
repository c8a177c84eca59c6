//! Directory endpoints: lookup lists for pickers

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::directory::{Department, Employee, Vendor},
};

use super::AuthenticatedUser;

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "directory",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of departments", body = Vec<Department>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_departments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Department>>> {
    let departments = state.services.directory.list_departments().await?;
    Ok(Json(departments))
}

/// List employees
#[utoipa::path(
    get,
    path = "/employees",
    tag = "directory",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of employees", body = Vec<Employee>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_employees(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.services.directory.list_employees().await?;
    Ok(Json(employees))
}

/// List vendors
#[utoipa::path(
    get,
    path = "/vendors",
    tag = "directory",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of vendors", body = Vec<Vendor>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_vendors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Vendor>>> {
    let vendors = state.services.directory.list_vendors().await?;
    Ok(Json(vendors))
}
