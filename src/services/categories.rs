//! Equipment categories service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::category::{CreateCategory, EquipmentCategory, UpdateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentCategory>> {
        self.repository.categories.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EquipmentCategory> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateCategory) -> AppResult<EquipmentCategory> {
        data.validate()?;
        if data.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }
        self.repository.categories.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<EquipmentCategory> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Category name cannot be empty".to_string(),
                ));
            }
        }
        self.repository.categories.update(id, data).await
    }

    /// Delete a category (fails while equipment still references it)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let count = self.repository.categories.count_equipment(id).await?;
        if count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete category: {} equipment record(s) still linked",
                count
            )));
        }
        self.repository.categories.delete(id).await
    }
}
