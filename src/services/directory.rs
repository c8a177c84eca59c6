//! Directory service: read-only lookups for departments, employees, vendors

use crate::{
    error::AppResult,
    models::directory::{Department, Employee, Vendor},
    repository::Repository,
};

#[derive(Clone)]
pub struct DirectoryService {
    repository: Repository,
}

impl DirectoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.repository.directory.list_departments().await
    }

    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.repository.directory.list_employees().await
    }

    pub async fn list_vendors(&self) -> AppResult<Vec<Vendor>> {
        self.repository.directory.list_vendors().await
    }
}
