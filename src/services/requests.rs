//! Maintenance request service: equipment auto-fill, stage transition
//! effects and the kanban quick actions

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::FieldChangeEntry,
        enums::{KanbanState, RequestType},
        equipment::Equipment,
        request::{CreateRequest, MaintenanceRequest, RequestQuery, RequestWrite, UpdateRequest},
        stage::MaintenanceStage,
    },
    repository::{equipment::EquipmentScrap, Repository},
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        query: &RequestQuery,
        today: NaiveDate,
    ) -> AppResult<(Vec<MaintenanceRequest>, i64)> {
        self.repository.requests.list(query, today).await
    }

    pub async fn get_by_id(&self, id: i32, today: NaiveDate) -> AppResult<MaintenanceRequest> {
        self.repository.requests.get_by_id(id, today).await
    }

    pub async fn create(
        &self,
        data: &CreateRequest,
        created_by: Option<i32>,
        today: NaiveDate,
    ) -> AppResult<MaintenanceRequest> {
        data.validate()?;
        if data.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Request subject cannot be empty".to_string(),
            ));
        }
        Self::check_priority(data.priority)?;
        Self::check_amounts(data.duration, data.estimated_cost, data.actual_cost)?;

        let equipment = self.get_equipment(data.equipment_id, today).await?;

        // A request without an explicit team inherits the equipment's team,
        // and in that case also its default technician.
        let (team_id, technician_id) = match data.team_id {
            Some(team_id) => {
                if !self.repository.teams.exists(team_id).await? {
                    return Err(AppError::Validation(format!(
                        "Team {} does not exist",
                        team_id
                    )));
                }
                (team_id, data.technician_id)
            }
            None => (
                equipment.team_id,
                data.technician_id.or(equipment.technician_id),
            ),
        };
        if let Some(technician_id) = technician_id {
            self.check_technician_in_team(technician_id, team_id).await?;
        }

        if let Some(work_center_id) = data.work_center_id {
            if !self.repository.work_centers.exists(work_center_id).await? {
                return Err(AppError::Validation(format!(
                    "Work center {} does not exist",
                    work_center_id
                )));
            }
        }

        let stage = match data.stage_id {
            Some(stage_id) => self.get_stage(stage_id).await?,
            None => self.repository.stages.first().await?.ok_or_else(|| {
                AppError::Validation("No maintenance stages are configured".to_string())
            })?,
        };

        let request_type = data.request_type.unwrap_or(RequestType::Corrective);
        let scheduled_date = data.scheduled_date.or_else(|| {
            // Preventive work gets a default slot a week out.
            (request_type == RequestType::Preventive).then(|| Utc::now() + Duration::days(7))
        });

        let name = data.name.trim().to_string();
        let close_date = if stage.is_closed {
            data.close_date.or(Some(today))
        } else {
            data.close_date
        };
        let scrap = stage
            .is_scrap
            .then(|| Self::scrap_for_stage(equipment.id, &name, created_by, today));

        let write = RequestWrite {
            name,
            description: data.description.clone(),
            active: true,
            color: data.color,
            priority: data.priority.unwrap_or(1),
            request_type,
            equipment_id: equipment.id,
            work_center_id: data.work_center_id,
            team_id,
            technician_id,
            created_by,
            stage_id: stage.id,
            kanban_state: data.kanban_state.unwrap_or(KanbanState::Normal),
            request_date: today,
            scheduled_date,
            deadline: data.deadline,
            close_date,
            duration: data.duration.unwrap_or(0.0),
            reminder_days: data.reminder_days.or(Some(1)),
            estimated_cost: data.estimated_cost,
            actual_cost: data.actual_cost,
        };

        self.repository
            .requests
            .create(&write, scrap.as_ref(), today)
            .await
    }

    pub async fn update(
        &self,
        id: i32,
        data: &UpdateRequest,
        changed_by: Option<i32>,
        today: NaiveDate,
    ) -> AppResult<MaintenanceRequest> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Request subject cannot be empty".to_string(),
                ));
            }
        }
        Self::check_priority(data.priority)?;
        Self::check_amounts(data.duration, data.estimated_cost, data.actual_cost)?;

        let current = self.repository.requests.get_by_id(id, today).await?;

        // Moving the request to different equipment re-runs the auto-fill
        // against the new record.
        let equipment_id = data.equipment_id.unwrap_or(current.equipment_id);
        let equipment = if equipment_id != current.equipment_id {
            Some(self.get_equipment(equipment_id, today).await?)
        } else {
            None
        };

        let team_id = match data.team_id {
            Some(team_id) => {
                if !self.repository.teams.exists(team_id).await? {
                    return Err(AppError::Validation(format!(
                        "Team {} does not exist",
                        team_id
                    )));
                }
                team_id
            }
            None => match equipment {
                Some(ref equipment) => equipment.team_id,
                None => current.team_id,
            },
        };

        let technician_id = match data.technician_id {
            Some(technician_id) => {
                self.check_technician_in_team(technician_id, team_id).await?;
                Some(technician_id)
            }
            None => {
                let carried = match equipment {
                    Some(ref equipment) => equipment.technician_id.or(current.technician_id),
                    None => current.technician_id,
                };
                match carried {
                    // A team change drops a carried-over technician who is
                    // not on the new team; an explicit assignment above is
                    // an error.
                    Some(technician_id)
                        if team_id != current.team_id || equipment.is_some() =>
                    {
                        if self.repository.teams.is_member(team_id, technician_id).await? {
                            Some(technician_id)
                        } else {
                            None
                        }
                    }
                    other => other,
                }
            }
        };

        if let Some(work_center_id) = data.work_center_id {
            if !self.repository.work_centers.exists(work_center_id).await? {
                return Err(AppError::Validation(format!(
                    "Work center {} does not exist",
                    work_center_id
                )));
            }
        }

        let name = data.name.as_deref().map(str::trim).map(String::from);
        let name = name.unwrap_or_else(|| current.name.clone());

        // Stage effects fire only when the request actually changes stage.
        let stage_id = data.stage_id.unwrap_or(current.stage_id);
        let stage = if stage_id != current.stage_id {
            Some(self.get_stage(stage_id).await?)
        } else {
            None
        };

        let mut close_date = data.close_date.or(current.close_date);
        let mut scrap = None;
        if let Some(ref stage) = stage {
            if stage.is_closed {
                if data.close_date.is_none() {
                    close_date = Some(today);
                }
            } else if current.stage_is_closed && data.close_date.is_none() {
                // Reopening clears the close date.
                close_date = None;
            }
            if stage.is_scrap {
                scrap = Some(Self::scrap_for_stage(equipment_id, &name, changed_by, today));
            }
        }

        let write = RequestWrite {
            name,
            description: data.description.clone().or_else(|| current.description.clone()),
            active: data.active.unwrap_or(current.active),
            color: data.color.or(current.color),
            priority: data.priority.unwrap_or(current.priority),
            request_type: data.request_type.unwrap_or(current.request_type),
            equipment_id,
            work_center_id: data.work_center_id.or(current.work_center_id),
            team_id,
            technician_id,
            created_by: current.created_by,
            stage_id,
            kanban_state: data.kanban_state.unwrap_or(current.kanban_state),
            request_date: current.request_date,
            scheduled_date: data.scheduled_date.or(current.scheduled_date),
            deadline: data.deadline.or(current.deadline),
            close_date,
            duration: data.duration.unwrap_or(current.duration),
            reminder_days: data.reminder_days.or(current.reminder_days),
            estimated_cost: data.estimated_cost.or(current.estimated_cost),
            actual_cost: data.actual_cost.or(current.actual_cost),
        };

        let changes = Self::diff(&current, &write);
        self.repository
            .requests
            .update(id, &write, &changes, changed_by, scrap.as_ref(), today)
            .await
    }

    /// Assign the acting user as technician. Picking up a request that still
    /// sits in the first stage also advances it to the next one.
    pub async fn assign_to_me(
        &self,
        id: i32,
        user_id: i32,
        today: NaiveDate,
    ) -> AppResult<MaintenanceRequest> {
        let current = self.repository.requests.get_by_id(id, today).await?;
        if !self.repository.teams.is_member(current.team_id, user_id).await? {
            return Err(AppError::Authorization(
                "You cannot assign yourself - you're not a member of the assigned team!"
                    .to_string(),
            ));
        }

        let mut patch = UpdateRequest {
            technician_id: Some(user_id),
            ..Default::default()
        };
        let stages = self.repository.stages.list().await?;
        if let (Some(first), Some(second)) = (stages.first(), stages.get(1)) {
            if current.stage_id == first.id {
                patch.stage_id = Some(second.id);
            }
        }
        self.update(id, &patch, Some(user_id), today).await
    }

    /// Move the request into the stage named "Repaired" and close it. Does
    /// nothing when no such stage exists.
    pub async fn mark_repaired(
        &self,
        id: i32,
        user_id: i32,
        today: NaiveDate,
    ) -> AppResult<MaintenanceRequest> {
        let Some(repaired) = self.repository.stages.find_repaired().await? else {
            return self.repository.requests.get_by_id(id, today).await;
        };

        let patch = UpdateRequest {
            stage_id: Some(repaired.id),
            close_date: Some(today),
            ..Default::default()
        };
        self.update(id, &patch, Some(user_id), today).await
    }

    fn check_priority(priority: Option<i16>) -> AppResult<()> {
        if let Some(priority) = priority {
            if !(0..=3).contains(&priority) {
                return Err(AppError::Validation(
                    "Priority must be between 0 and 3".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn check_amounts(
        duration: Option<f64>,
        estimated_cost: Option<Decimal>,
        actual_cost: Option<Decimal>,
    ) -> AppResult<()> {
        if let Some(duration) = duration {
            if duration < 0.0 {
                return Err(AppError::Validation(
                    "Duration cannot be negative".to_string(),
                ));
            }
        }
        if let Some(cost) = estimated_cost {
            if cost < Decimal::ZERO {
                return Err(AppError::Validation(
                    "Estimated cost cannot be negative".to_string(),
                ));
            }
        }
        if let Some(cost) = actual_cost {
            if cost < Decimal::ZERO {
                return Err(AppError::Validation(
                    "Actual cost cannot be negative".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn scrap_for_stage(
        equipment_id: i32,
        request_name: &str,
        author_id: Option<i32>,
        today: NaiveDate,
    ) -> EquipmentScrap {
        EquipmentScrap {
            equipment_id,
            scrap_date: today,
            reason: Some(format!("Scrapped via maintenance request: {}", request_name)),
            deactivate: false,
            message: format!(
                "Equipment marked as SCRAP based on maintenance request: {}",
                request_name
            ),
            author_id,
        }
    }

    async fn get_equipment(&self, equipment_id: i32, today: NaiveDate) -> AppResult<Equipment> {
        match self.repository.equipment.get_by_id(equipment_id, today).await {
            Ok(equipment) => Ok(equipment),
            Err(AppError::NotFound(_)) => Err(AppError::Validation(format!(
                "Equipment {} does not exist",
                equipment_id
            ))),
            Err(e) => Err(e),
        }
    }

    async fn get_stage(&self, stage_id: i32) -> AppResult<MaintenanceStage> {
        match self.repository.stages.get_by_id(stage_id).await {
            Ok(stage) => Ok(stage),
            Err(AppError::NotFound(_)) => Err(AppError::Validation(format!(
                "Stage {} does not exist",
                stage_id
            ))),
            Err(e) => Err(e),
        }
    }

    async fn check_technician_in_team(&self, technician_id: i32, team_id: i32) -> AppResult<()> {
        if !self.repository.users.exists(technician_id).await? {
            return Err(AppError::Validation(format!(
                "Technician {} does not exist",
                technician_id
            )));
        }
        if !self.repository.teams.is_member(team_id, technician_id).await? {
            let technician = self.repository.users.get_by_id(technician_id).await?;
            let team = self.repository.teams.get_by_id(team_id).await?;
            return Err(AppError::BusinessRule(format!(
                "Technician '{}' is not a member of team '{}'. \
                 Only team members can be assigned to requests.",
                technician.name, team.name
            )));
        }
        Ok(())
    }

    fn diff(current: &MaintenanceRequest, write: &RequestWrite) -> Vec<FieldChangeEntry> {
        let mut changes = Vec::new();
        FieldChangeEntry::track(
            &mut changes,
            "name",
            Some(current.name.clone()),
            Some(write.name.clone()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "priority",
            Some(current.priority.to_string()),
            Some(write.priority.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "request_type",
            Some(current.request_type.to_string()),
            Some(write.request_type.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "equipment_id",
            Some(current.equipment_id.to_string()),
            Some(write.equipment_id.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "team_id",
            Some(current.team_id.to_string()),
            Some(write.team_id.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "technician_id",
            current.technician_id.map(|id| id.to_string()),
            write.technician_id.map(|id| id.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "stage_id",
            Some(current.stage_id.to_string()),
            Some(write.stage_id.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "kanban_state",
            Some(current.kanban_state.to_string()),
            Some(write.kanban_state.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "scheduled_date",
            current.scheduled_date.map(|d| d.to_rfc3339()),
            write.scheduled_date.map(|d| d.to_rfc3339()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "deadline",
            current.deadline.map(|d| d.to_string()),
            write.deadline.map(|d| d.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "duration",
            Some(current.duration.to_string()),
            Some(write.duration.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "estimated_cost",
            current.estimated_cost.map(|v| v.to_string()),
            write.estimated_cost.map(|v| v.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "actual_cost",
            current.actual_cost.map(|v| v.to_string()),
            write.actual_cost.map(|v| v.to_string()),
        );
        changes
    }
}
