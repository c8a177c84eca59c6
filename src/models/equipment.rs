//! Equipment model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{OwnershipType, WarrantyStatus};

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    pub id: i32,
    pub name: String,
    pub serial_number: Option<String>,
    pub active: bool,
    pub category_id: i32,
    pub category_name: String,
    pub ownership_type: OwnershipType,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    pub employee_id: Option<i32>,
    pub employee_name: Option<String>,
    pub team_id: i32,
    pub team_name: String,
    pub technician_id: Option<i32>,
    pub technician_name: Option<String>,
    pub work_center_id: Option<i32>,
    pub work_center_name: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_value: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub vendor_id: Option<i32>,
    pub vendor_name: Option<String>,
    pub location: Option<String>,
    pub is_scrap: bool,
    pub scrap_date: Option<NaiveDate>,
    pub scrap_reason: Option<String>,
    pub note: Option<String>,
    pub color: Option<i32>,
    pub request_count: i64,
    pub open_request_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Equipment {
    /// Attach the date-dependent derived fields to a stored row.
    pub fn from_row(row: EquipmentRow, today: NaiveDate) -> Self {
        let warranty_status = warranty_status(row.warranty_expiry, today);
        let owner_display = owner_display(
            row.ownership_type,
            row.department_name.as_deref(),
            row.employee_name.as_deref(),
        );
        Equipment {
            id: row.id,
            name: row.name,
            serial_number: row.serial_number,
            active: row.active,
            category_id: row.category_id,
            category_name: row.category_name,
            ownership_type: row.ownership_type,
            department_id: row.department_id,
            department_name: row.department_name,
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            owner_display,
            team_id: row.team_id,
            team_name: row.team_name,
            technician_id: row.technician_id,
            technician_name: row.technician_name,
            work_center_id: row.work_center_id,
            work_center_name: row.work_center_name,
            purchase_date: row.purchase_date,
            purchase_value: row.purchase_value,
            warranty_expiry: row.warranty_expiry,
            warranty_status,
            vendor_id: row.vendor_id,
            vendor_name: row.vendor_name,
            location: row.location,
            is_scrap: row.is_scrap,
            scrap_date: row.scrap_date,
            scrap_reason: row.scrap_reason,
            note: row.note,
            color: row.color,
            request_count: row.request_count,
            open_request_count: row.open_request_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// An asset under maintenance management
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub serial_number: Option<String>,
    pub active: bool,
    pub category_id: i32,
    pub category_name: String,
    pub ownership_type: OwnershipType,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    pub employee_id: Option<i32>,
    pub employee_name: Option<String>,
    /// Human-readable owner derived from the ownership fields
    pub owner_display: String,
    pub team_id: i32,
    pub team_name: String,
    /// Default technician copied onto new requests for this asset
    pub technician_id: Option<i32>,
    pub technician_name: Option<String>,
    pub work_center_id: Option<i32>,
    pub work_center_name: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub purchase_value: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub warranty_status: WarrantyStatus,
    pub vendor_id: Option<i32>,
    pub vendor_name: Option<String>,
    pub location: Option<String>,
    pub is_scrap: bool,
    pub scrap_date: Option<NaiveDate>,
    pub scrap_reason: Option<String>,
    pub note: Option<String>,
    pub color: Option<i32>,
    /// All maintenance requests ever filed for this asset
    pub request_count: i64,
    /// Requests not yet in a closed stage
    pub open_request_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Warranty state as of `today`. The expiry day itself counts as expired.
pub fn warranty_status(expiry: Option<NaiveDate>, today: NaiveDate) -> WarrantyStatus {
    match expiry {
        None => WarrantyStatus::Na,
        Some(expiry) if today < expiry => WarrantyStatus::Valid,
        Some(_) => WarrantyStatus::Expired,
    }
}

/// Owner label shown on equipment cards.
pub fn owner_display(
    ownership: OwnershipType,
    department_name: Option<&str>,
    employee_name: Option<&str>,
) -> String {
    match ownership {
        OwnershipType::Company => "Company".to_string(),
        OwnershipType::Department => match department_name {
            Some(name) => name.to_string(),
            None => "Not Assigned".to_string(),
        },
        OwnershipType::Employee => match employee_name {
            Some(name) => name.to_string(),
            None => "Not Assigned".to_string(),
        },
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Equipment name cannot be empty"))]
    pub name: String,
    pub serial_number: Option<String>,
    pub category_id: i32,
    pub ownership_type: Option<OwnershipType>,
    pub department_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub team_id: i32,
    pub technician_id: Option<i32>,
    pub work_center_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub purchase_value: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub vendor_id: Option<i32>,
    pub location: Option<String>,
    pub note: Option<String>,
    pub color: Option<i32>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Equipment name cannot be empty"))]
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub active: Option<bool>,
    pub category_id: Option<i32>,
    pub ownership_type: Option<OwnershipType>,
    pub department_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub team_id: Option<i32>,
    pub technician_id: Option<i32>,
    pub work_center_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub purchase_value: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub vendor_id: Option<i32>,
    pub location: Option<String>,
    pub note: Option<String>,
    pub color: Option<i32>,
}

/// Fully resolved equipment state, written column-for-column once the
/// service has applied the ownership and team rules.
#[derive(Debug, Clone)]
pub struct EquipmentWrite {
    pub name: String,
    pub serial_number: Option<String>,
    pub active: bool,
    pub category_id: i32,
    pub ownership_type: OwnershipType,
    pub department_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub team_id: i32,
    pub technician_id: Option<i32>,
    pub work_center_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_value: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub vendor_id: Option<i32>,
    pub location: Option<String>,
    pub note: Option<String>,
    pub color: Option<i32>,
}

/// Scrap action payload
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ScrapEquipment {
    pub reason: Option<String>,
}

/// Equipment list query parameters
#[derive(Debug, Default, Deserialize, utoipa::IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Substring match on name or serial number
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub team_id: Option<i32>,
    pub work_center_id: Option<i32>,
    /// Include inactive (scrapped or archived) records
    pub include_archived: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn warranty_valid_strictly_before_expiry() {
        let today = date(2025, 6, 15);
        assert_eq!(warranty_status(Some(date(2025, 6, 16)), today), WarrantyStatus::Valid);
        assert_eq!(warranty_status(Some(date(2026, 1, 1)), today), WarrantyStatus::Valid);
    }

    #[test]
    fn warranty_expires_on_the_expiry_day() {
        let today = date(2025, 6, 15);
        assert_eq!(warranty_status(Some(today), today), WarrantyStatus::Expired);
        assert_eq!(warranty_status(Some(date(2025, 6, 14)), today), WarrantyStatus::Expired);
    }

    #[test]
    fn warranty_absent_is_not_applicable() {
        assert_eq!(warranty_status(None, date(2025, 6, 15)), WarrantyStatus::Na);
    }

    #[test]
    fn owner_display_follows_ownership_type() {
        assert_eq!(owner_display(OwnershipType::Company, Some("IT"), Some("Ana")), "Company");
        assert_eq!(owner_display(OwnershipType::Department, Some("IT"), None), "IT");
        assert_eq!(owner_display(OwnershipType::Employee, None, Some("Ana")), "Ana");
        assert_eq!(owner_display(OwnershipType::Employee, None, None), "Not Assigned");
    }
}
