//! Business logic services

pub mod audit;
pub mod auth;
pub mod categories;
pub mod directory;
pub mod equipment;
pub mod requests;
pub mod stages;
pub mod stats;
pub mod teams;
pub mod work_centers;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub categories: categories::CategoriesService,
    pub stages: stages::StagesService,
    pub teams: teams::TeamsService,
    pub work_centers: work_centers::WorkCentersService,
    pub equipment: equipment::EquipmentService,
    pub requests: requests::RequestsService,
    pub directory: directory::DirectoryService,
    pub audit: audit::AuditService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            categories: categories::CategoriesService::new(repository.clone()),
            stages: stages::StagesService::new(repository.clone()),
            teams: teams::TeamsService::new(repository.clone()),
            work_centers: work_centers::WorkCentersService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            directory: directory::DirectoryService::new(repository.clone()),
            audit: audit::AuditService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    /// Database round-trip backing the readiness probe
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
