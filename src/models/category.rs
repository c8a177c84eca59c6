//! Equipment category model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment category, used to group assets for filtering and reporting
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentCategory {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
    pub color: Option<i32>,
    pub note: Option<String>,
    /// Number of equipment records attached to this category
    pub equipment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name cannot be empty"))]
    pub name: String,
    pub code: Option<String>,
    pub color: Option<i32>,
    pub note: Option<String>,
}

/// Update category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "Category name cannot be empty"))]
    pub name: Option<String>,
    pub code: Option<String>,
    pub color: Option<i32>,
    pub note: Option<String>,
}
