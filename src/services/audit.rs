//! Audit trail service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::{CreateMessage, FieldChange, RecordMessage},
        enums::RecordType,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Messages and field changes for a record, newest first
    pub async fn trail(
        &self,
        record_type: RecordType,
        record_id: i32,
    ) -> AppResult<(Vec<RecordMessage>, Vec<FieldChange>)> {
        self.check_record(record_type, record_id).await?;
        let messages = self.repository.audit.messages(record_type, record_id).await?;
        let changes = self.repository.audit.changes(record_type, record_id).await?;
        Ok((messages, changes))
    }

    /// Post a free-form comment on a record
    pub async fn post_message(
        &self,
        record_type: RecordType,
        record_id: i32,
        author_id: Option<i32>,
        data: &CreateMessage,
    ) -> AppResult<RecordMessage> {
        data.validate()?;
        let body = data.body.trim();
        if body.is_empty() {
            return Err(AppError::Validation(
                "Message body cannot be empty".to_string(),
            ));
        }
        self.check_record(record_type, record_id).await?;
        self.repository
            .audit
            .post_message(record_type, record_id, author_id, body, "comment")
            .await
    }

    async fn check_record(&self, record_type: RecordType, record_id: i32) -> AppResult<()> {
        let exists = match record_type {
            RecordType::Equipment => self.repository.equipment.exists(record_id).await?,
            RecordType::Request => self.repository.requests.exists(record_id).await?,
            RecordType::Team => self.repository.teams.exists(record_id).await?,
            RecordType::WorkCenter => self.repository.work_centers.exists(record_id).await?,
        };
        if !exists {
            return Err(AppError::NotFound(format!(
                "Record {} {} not found",
                record_type, record_id
            )));
        }
        Ok(())
    }
}
