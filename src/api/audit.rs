//! Audit trail endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::{CreateMessage, FieldChange, RecordMessage},
        enums::RecordType,
        user::UserClaims,
    },
};

use super::AuthenticatedUser;

/// Messages and field changes recorded on one record
#[derive(Serialize, ToSchema)]
pub struct AuditTrailResponse {
    pub messages: Vec<RecordMessage>,
    pub changes: Vec<FieldChange>,
}

/// Posting on a record requires write rights on that record's domain.
fn require_write_for(claims: &UserClaims, record_type: RecordType) -> Result<(), AppError> {
    match record_type {
        RecordType::Equipment | RecordType::WorkCenter => claims.require_write_assets(),
        RecordType::Request | RecordType::Team => claims.require_write_maintenance(),
    }
}

/// Get the audit trail of a record
#[utoipa::path(
    get,
    path = "/audit/{record_type}/{record_id}",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(
        ("record_type" = String, Path, description = "One of: equipment, request, team, work_center"),
        ("record_id" = i32, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Audit trail", body = AuditTrailResponse),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_audit_trail(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path((record_type, record_id)): Path<(RecordType, i32)>,
) -> AppResult<Json<AuditTrailResponse>> {
    let (messages, changes) = state.services.audit.trail(record_type, record_id).await?;
    Ok(Json(AuditTrailResponse { messages, changes }))
}

/// Post a note on a record
#[utoipa::path(
    post,
    path = "/audit/{record_type}/{record_id}/messages",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(
        ("record_type" = String, Path, description = "One of: equipment, request, team, work_center"),
        ("record_id" = i32, Path, description = "Record ID")
    ),
    request_body = CreateMessage,
    responses(
        (status = 201, description = "Message posted", body = RecordMessage),
        (status = 400, description = "Empty message body"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn post_message(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((record_type, record_id)): Path<(RecordType, i32)>,
    Json(payload): Json<CreateMessage>,
) -> AppResult<(StatusCode, Json<RecordMessage>)> {
    require_write_for(&claims, record_type)?;

    let message = state
        .services
        .audit
        .post_message(record_type, record_id, Some(claims.user_id), &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
