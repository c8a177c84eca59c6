//! Maintenance stages service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::stage::{CreateStage, MaintenanceStage, UpdateStage},
    repository::Repository,
};

#[derive(Clone)]
pub struct StagesService {
    repository: Repository,
}

impl StagesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceStage>> {
        self.repository.stages.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceStage> {
        self.repository.stages.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateStage) -> AppResult<MaintenanceStage> {
        data.validate()?;
        if data.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Stage name cannot be empty".to_string(),
            ));
        }
        self.repository.stages.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateStage) -> AppResult<MaintenanceStage> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Stage name cannot be empty".to_string(),
                ));
            }
        }
        self.repository.stages.update(id, data).await
    }

    /// Delete a stage (fails while requests still sit in it)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let count = self.repository.stages.count_requests(id).await?;
        if count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete stage: {} maintenance request(s) still in it",
                count
            )));
        }
        self.repository.stages.delete(id).await
    }
}
