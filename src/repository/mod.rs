//! Repository layer for database operations

pub mod audit;
pub mod categories;
pub mod directory;
pub mod equipment;
pub mod requests;
pub mod stages;
pub mod teams;
pub mod users;
pub mod work_centers;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub categories: categories::CategoriesRepository,
    pub stages: stages::StagesRepository,
    pub teams: teams::TeamsRepository,
    pub work_centers: work_centers::WorkCentersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub requests: requests::RequestsRepository,
    pub directory: directory::DirectoryRepository,
    pub audit: audit::AuditRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            stages: stages::StagesRepository::new(pool.clone()),
            teams: teams::TeamsRepository::new(pool.clone()),
            work_centers: work_centers::WorkCentersRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            directory: directory::DirectoryRepository::new(pool.clone()),
            audit: audit::AuditRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
