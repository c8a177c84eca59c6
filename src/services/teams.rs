//! Maintenance teams service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::FieldChangeEntry,
        team::{CreateTeam, MaintenanceTeam, UpdateTeam},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, include_archived: bool) -> AppResult<Vec<MaintenanceTeam>> {
        self.repository.teams.list(include_archived).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTeam> {
        self.repository.teams.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateTeam) -> AppResult<MaintenanceTeam> {
        data.validate()?;
        if data.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Team name cannot be empty".to_string(),
            ));
        }

        let members = data.member_ids.clone().unwrap_or_default();
        self.check_members_exist(&members).await?;
        Self::check_leader_in_members(data.leader_id, &members)?;

        self.repository.teams.create(data).await
    }

    pub async fn update(
        &self,
        id: i32,
        data: &UpdateTeam,
        changed_by: Option<i32>,
    ) -> AppResult<MaintenanceTeam> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Team name cannot be empty".to_string(),
                ));
            }
        }

        let current = self.repository.teams.get_by_id(id).await?;

        let members = match data.member_ids {
            Some(ref members) => {
                self.check_members_exist(members).await?;
                members.clone()
            }
            None => current.member_ids.clone(),
        };
        let leader = data.leader_id.or(current.leader_id);
        Self::check_leader_in_members(leader, &members)?;

        let mut changes = Vec::new();
        if let Some(ref name) = data.name {
            FieldChangeEntry::track(
                &mut changes,
                "name",
                Some(current.name.clone()),
                Some(name.clone()),
            );
        }
        FieldChangeEntry::track(
            &mut changes,
            "leader_id",
            current.leader_id.map(|id| id.to_string()),
            leader.map(|id| id.to_string()),
        );

        self.repository
            .teams
            .update(id, data, &changes, changed_by)
            .await
    }

    async fn check_members_exist(&self, members: &[i32]) -> AppResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        let mut unique = members.to_vec();
        unique.sort_unstable();
        unique.dedup();
        let found = self.repository.users.count_existing(&unique).await?;
        if found != unique.len() as i64 {
            return Err(AppError::Validation(
                "One or more team members do not exist".to_string(),
            ));
        }
        Ok(())
    }

    fn check_leader_in_members(leader_id: Option<i32>, members: &[i32]) -> AppResult<()> {
        if let Some(leader_id) = leader_id {
            if !members.contains(&leader_id) {
                return Err(AppError::BusinessRule(
                    "Team leader must be one of the team members".to_string(),
                ));
            }
        }
        Ok(())
    }
}
