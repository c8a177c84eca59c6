//! Identity records referenced by equipment and requests

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Organizational unit that can own equipment
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i32,
    pub name: String,
}

/// Person that can own equipment
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
}

/// Supplier of equipment
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Vendor {
    pub id: i32,
    pub name: String,
}
