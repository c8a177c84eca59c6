//! Work centers service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::FieldChangeEntry,
        work_center::{CreateWorkCenter, UpdateWorkCenter, WorkCenter},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct WorkCentersService {
    repository: Repository,
}

impl WorkCentersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, include_archived: bool) -> AppResult<Vec<WorkCenter>> {
        self.repository.work_centers.list(include_archived).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<WorkCenter> {
        self.repository.work_centers.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateWorkCenter) -> AppResult<WorkCenter> {
        data.validate()?;
        if data.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Work center name cannot be empty".to_string(),
            ));
        }
        if data.code.trim().is_empty() {
            return Err(AppError::Validation(
                "Work center code cannot be empty".to_string(),
            ));
        }
        Self::check_amounts(data.capacity, data.hourly_cost, data.capacity_cost)?;

        if self
            .repository
            .work_centers
            .code_exists(&data.code, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Work center code '{}' is already in use",
                data.code
            )));
        }
        if let Some(team_id) = data.team_id {
            if !self.repository.teams.exists(team_id).await? {
                return Err(AppError::Validation(format!(
                    "Team {} does not exist",
                    team_id
                )));
            }
        }
        if let Some(ref alternates) = data.alternate_ids {
            self.check_alternates(None, alternates).await?;
        }

        self.repository.work_centers.create(data).await
    }

    pub async fn update(
        &self,
        id: i32,
        data: &UpdateWorkCenter,
        changed_by: Option<i32>,
    ) -> AppResult<WorkCenter> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Work center name cannot be empty".to_string(),
                ));
            }
        }
        if let Some(ref code) = data.code {
            if code.trim().is_empty() {
                return Err(AppError::Validation(
                    "Work center code cannot be empty".to_string(),
                ));
            }
        }
        Self::check_amounts(data.capacity, data.hourly_cost, data.capacity_cost)?;

        let current = self.repository.work_centers.get_by_id(id).await?;

        if let Some(ref code) = data.code {
            if self
                .repository
                .work_centers
                .code_exists(code, Some(id))
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "Work center code '{}' is already in use",
                    code
                )));
            }
        }
        if let Some(team_id) = data.team_id {
            if !self.repository.teams.exists(team_id).await? {
                return Err(AppError::Validation(format!(
                    "Team {} does not exist",
                    team_id
                )));
            }
        }
        if let Some(ref alternates) = data.alternate_ids {
            self.check_alternates(Some(id), alternates).await?;
        }

        let mut changes = Vec::new();
        FieldChangeEntry::track(
            &mut changes,
            "name",
            Some(current.name.clone()),
            Some(data.name.clone().unwrap_or_else(|| current.name.clone())),
        );
        FieldChangeEntry::track(
            &mut changes,
            "code",
            Some(current.code.clone()),
            Some(data.code.clone().unwrap_or_else(|| current.code.clone())),
        );
        FieldChangeEntry::track(
            &mut changes,
            "capacity",
            Some(current.capacity.to_string()),
            Some(data.capacity.unwrap_or(current.capacity).to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "hourly_cost",
            Some(current.hourly_cost.to_string()),
            Some(data.hourly_cost.unwrap_or(current.hourly_cost).to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "capacity_cost",
            Some(current.capacity_cost.to_string()),
            Some(
                data.capacity_cost
                    .unwrap_or(current.capacity_cost)
                    .to_string(),
            ),
        );
        FieldChangeEntry::track(
            &mut changes,
            "team_id",
            current.team_id.map(|id| id.to_string()),
            data.team_id.or(current.team_id).map(|id| id.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "active",
            Some(current.active.to_string()),
            Some(data.active.unwrap_or(current.active).to_string()),
        );

        self.repository
            .work_centers
            .update(id, data, &changes, changed_by)
            .await
    }

    fn check_amounts(
        capacity: Option<f64>,
        hourly_cost: Option<Decimal>,
        capacity_cost: Option<Decimal>,
    ) -> AppResult<()> {
        if let Some(capacity) = capacity {
            if capacity <= 0.0 {
                return Err(AppError::Validation(
                    "Work center capacity must be greater than zero".to_string(),
                ));
            }
        }
        if let Some(hourly_cost) = hourly_cost {
            if hourly_cost < Decimal::ZERO {
                return Err(AppError::Validation(
                    "Hourly cost cannot be negative".to_string(),
                ));
            }
        }
        if let Some(capacity_cost) = capacity_cost {
            if capacity_cost < Decimal::ZERO {
                return Err(AppError::Validation(
                    "Capacity cost cannot be negative".to_string(),
                ));
            }
        }
        Ok(())
    }

    async fn check_alternates(&self, self_id: Option<i32>, alternates: &[i32]) -> AppResult<()> {
        if let Some(self_id) = self_id {
            if alternates.contains(&self_id) {
                return Err(AppError::Validation(
                    "A work center cannot be its own alternate".to_string(),
                ));
            }
        }
        if alternates.is_empty() {
            return Ok(());
        }
        let mut unique = alternates.to_vec();
        unique.sort_unstable();
        unique.dedup();
        let found = self
            .repository
            .work_centers
            .count_existing(&unique)
            .await?;
        if found != unique.len() as i64 {
            return Err(AppError::Validation(
                "One or more alternate work centers do not exist".to_string(),
            ));
        }
        Ok(())
    }
}
