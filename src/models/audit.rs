//! Audit trail models: record messages and the field change log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::RecordType;

/// Free-form note or system notification attached to a record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RecordMessage {
    pub id: i32,
    pub record_type: RecordType,
    pub record_id: i32,
    pub author_id: Option<i32>,
    pub author_name: Option<String>,
    pub body: String,
    /// "comment" for user posts, "notification" for system events
    pub message_type: String,
    pub posted_at: DateTime<Utc>,
}

/// One tracked field transition, written alongside the update that caused it
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FieldChange {
    pub id: i32,
    pub record_type: RecordType,
    pub record_id: i32,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: Option<i32>,
    pub changed_by_name: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// A pending change-log row, collected while diffing an update
#[derive(Debug, Clone)]
pub struct FieldChangeEntry {
    pub field_name: &'static str,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl FieldChangeEntry {
    /// Append an entry when the two rendered values differ.
    pub fn track(
        changes: &mut Vec<FieldChangeEntry>,
        field_name: &'static str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) {
        if old_value != new_value {
            changes.push(FieldChangeEntry {
                field_name,
                old_value,
                new_value,
            });
        }
    }
}

/// Post message payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMessage {
    #[validate(length(min = 1, message = "Message body cannot be empty"))]
    pub body: String,
}
