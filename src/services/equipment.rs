//! Equipment service: ownership rules, team membership and the scrap action

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        audit::FieldChangeEntry,
        enums::OwnershipType,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, EquipmentWrite, UpdateEquipment},
    },
    repository::{equipment::EquipmentScrap, Repository},
};

const SCRAP_MESSAGE: &str = "Equipment has been marked as SCRAPPED and is no longer usable.";

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery, today: NaiveDate) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query, today).await
    }

    pub async fn get_by_id(&self, id: i32, today: NaiveDate) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id, today).await
    }

    pub async fn create(&self, data: &CreateEquipment, today: NaiveDate) -> AppResult<Equipment> {
        data.validate()?;
        if data.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Equipment name cannot be empty".to_string(),
            ));
        }
        Self::check_purchase_value(data.purchase_value)?;

        let ownership = data.ownership_type.unwrap_or(OwnershipType::Company);
        let (department_id, employee_id) =
            Self::apply_ownership(ownership, data.department_id, data.employee_id);
        Self::check_ownership(ownership, department_id, employee_id)?;

        self.check_references(
            data.category_id,
            data.team_id,
            department_id,
            employee_id,
            data.work_center_id,
            data.vendor_id,
        )
        .await?;

        let serial_number = Self::normalize_serial(data.serial_number.as_deref());
        if let Some(ref serial) = serial_number {
            if self.repository.equipment.serial_exists(serial, None).await? {
                return Err(AppError::Conflict(format!(
                    "Serial number '{}' is already in use",
                    serial
                )));
            }
        }

        if let Some(technician_id) = data.technician_id {
            self.check_technician_in_team(technician_id, data.team_id)
                .await?;
        }

        let write = EquipmentWrite {
            name: data.name.trim().to_string(),
            serial_number,
            active: true,
            category_id: data.category_id,
            ownership_type: ownership,
            department_id,
            employee_id,
            team_id: data.team_id,
            technician_id: data.technician_id,
            work_center_id: data.work_center_id,
            purchase_date: data.purchase_date,
            purchase_value: data.purchase_value,
            warranty_expiry: data.warranty_expiry,
            vendor_id: data.vendor_id,
            location: data.location.clone(),
            note: data.note.clone(),
            color: data.color,
        };

        self.repository.equipment.create(&write, today).await
    }

    pub async fn update(
        &self,
        id: i32,
        data: &UpdateEquipment,
        changed_by: Option<i32>,
        today: NaiveDate,
    ) -> AppResult<Equipment> {
        data.validate()?;
        if let Some(ref name) = data.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation(
                    "Equipment name cannot be empty".to_string(),
                ));
            }
        }
        Self::check_purchase_value(data.purchase_value)?;

        let current = self.repository.equipment.get_by_id(id, today).await?;

        // Merge the payload over the stored record, then re-apply the
        // ownership and team rules to the merged state.
        let ownership = data.ownership_type.unwrap_or(current.ownership_type);
        let (department_id, employee_id) = Self::apply_ownership(
            ownership,
            data.department_id.or(current.department_id),
            data.employee_id.or(current.employee_id),
        );
        Self::check_ownership(ownership, department_id, employee_id)?;

        let team_id = data.team_id.unwrap_or(current.team_id);
        let technician_id = match data.technician_id {
            Some(technician_id) => {
                self.check_technician_in_team(technician_id, team_id).await?;
                Some(technician_id)
            }
            None => match current.technician_id {
                // A team change drops a carried-over technician who is not
                // on the new team; an explicit assignment above is an error.
                Some(technician_id) if team_id != current.team_id => {
                    if self.repository.teams.is_member(team_id, technician_id).await? {
                        Some(technician_id)
                    } else {
                        None
                    }
                }
                other => other,
            },
        };

        let category_id = data.category_id.unwrap_or(current.category_id);
        let work_center_id = data.work_center_id.or(current.work_center_id);
        let vendor_id = data.vendor_id.or(current.vendor_id);
        self.check_references(
            category_id,
            team_id,
            department_id.filter(|_| data.department_id.is_some()),
            employee_id.filter(|_| data.employee_id.is_some()),
            data.work_center_id,
            data.vendor_id,
        )
        .await?;

        let serial_number = match data.serial_number {
            Some(ref serial) => Self::normalize_serial(Some(serial)),
            None => current.serial_number.clone(),
        };
        if let Some(ref serial) = serial_number {
            if serial_number != current.serial_number
                && self
                    .repository
                    .equipment
                    .serial_exists(serial, Some(id))
                    .await?
            {
                return Err(AppError::Conflict(format!(
                    "Serial number '{}' is already in use",
                    serial
                )));
            }
        }

        let write = EquipmentWrite {
            name: data.name.clone().unwrap_or_else(|| current.name.clone()),
            serial_number,
            active: data.active.unwrap_or(current.active),
            category_id,
            ownership_type: ownership,
            department_id,
            employee_id,
            team_id,
            technician_id,
            work_center_id,
            purchase_date: data.purchase_date.or(current.purchase_date),
            purchase_value: data.purchase_value.or(current.purchase_value),
            warranty_expiry: data.warranty_expiry.or(current.warranty_expiry),
            vendor_id,
            location: data.location.clone().or_else(|| current.location.clone()),
            note: data.note.clone().or_else(|| current.note.clone()),
            color: data.color.or(current.color),
        };

        let changes = Self::diff(&current, &write);
        self.repository
            .equipment
            .update(id, &write, &changes, changed_by, today)
            .await
    }

    /// Mark equipment as scrapped: deactivates the record and posts an
    /// audit note
    pub async fn scrap(
        &self,
        id: i32,
        reason: Option<String>,
        author_id: Option<i32>,
        today: NaiveDate,
    ) -> AppResult<Equipment> {
        let current = self.repository.equipment.get_by_id(id, today).await?;
        if current.is_scrap {
            return Err(AppError::BusinessRule(
                "Equipment is already scrapped".to_string(),
            ));
        }

        let scrap = EquipmentScrap {
            equipment_id: id,
            scrap_date: today,
            reason: reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()),
            deactivate: true,
            message: SCRAP_MESSAGE.to_string(),
            author_id,
        };
        self.repository.equipment.scrap(&scrap).await?;

        self.repository.equipment.get_by_id(id, today).await
    }

    fn normalize_serial(serial: Option<&str>) -> Option<String> {
        serial
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }

    fn check_purchase_value(purchase_value: Option<Decimal>) -> AppResult<()> {
        if let Some(value) = purchase_value {
            if value < Decimal::ZERO {
                return Err(AppError::Validation(
                    "Purchase value cannot be negative".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Clear the ownership fields that no longer apply for the given type.
    fn apply_ownership(
        ownership: OwnershipType,
        department_id: Option<i32>,
        employee_id: Option<i32>,
    ) -> (Option<i32>, Option<i32>) {
        match ownership {
            OwnershipType::Company => (None, None),
            OwnershipType::Department => (department_id, None),
            OwnershipType::Employee => (None, employee_id),
        }
    }

    fn check_ownership(
        ownership: OwnershipType,
        department_id: Option<i32>,
        employee_id: Option<i32>,
    ) -> AppResult<()> {
        match ownership {
            OwnershipType::Department if department_id.is_none() => Err(AppError::Validation(
                "Please select a department for department-owned equipment.".to_string(),
            )),
            OwnershipType::Employee if employee_id.is_none() => Err(AppError::Validation(
                "Please select an employee for employee-owned equipment.".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn check_references(
        &self,
        category_id: i32,
        team_id: i32,
        department_id: Option<i32>,
        employee_id: Option<i32>,
        work_center_id: Option<i32>,
        vendor_id: Option<i32>,
    ) -> AppResult<()> {
        if !self.repository.categories.exists(category_id).await? {
            return Err(AppError::Validation(format!(
                "Category {} does not exist",
                category_id
            )));
        }
        if !self.repository.teams.exists(team_id).await? {
            return Err(AppError::Validation(format!(
                "Team {} does not exist",
                team_id
            )));
        }
        if let Some(department_id) = department_id {
            if !self.repository.directory.department_exists(department_id).await? {
                return Err(AppError::Validation(format!(
                    "Department {} does not exist",
                    department_id
                )));
            }
        }
        if let Some(employee_id) = employee_id {
            if !self.repository.directory.employee_exists(employee_id).await? {
                return Err(AppError::Validation(format!(
                    "Employee {} does not exist",
                    employee_id
                )));
            }
        }
        if let Some(work_center_id) = work_center_id {
            if !self.repository.work_centers.exists(work_center_id).await? {
                return Err(AppError::Validation(format!(
                    "Work center {} does not exist",
                    work_center_id
                )));
            }
        }
        if let Some(vendor_id) = vendor_id {
            if !self.repository.directory.vendor_exists(vendor_id).await? {
                return Err(AppError::Validation(format!(
                    "Vendor {} does not exist",
                    vendor_id
                )));
            }
        }
        Ok(())
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
                "Technician '{}' is not a member of team '{}'",
                technician.name, team.name
            )));
        }
        Ok(())
    }

    fn diff(current: &Equipment, write: &EquipmentWrite) -> Vec<FieldChangeEntry> {
        let mut changes = Vec::new();
        FieldChangeEntry::track(
            &mut changes,
            "name",
            Some(current.name.clone()),
            Some(write.name.clone()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "serial_number",
            current.serial_number.clone(),
            write.serial_number.clone(),
        );
        FieldChangeEntry::track(
            &mut changes,
            "category_id",
            Some(current.category_id.to_string()),
            Some(write.category_id.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "ownership_type",
            Some(current.ownership_type.to_string()),
            Some(write.ownership_type.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "department_id",
            current.department_id.map(|id| id.to_string()),
            write.department_id.map(|id| id.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "employee_id",
            current.employee_id.map(|id| id.to_string()),
            write.employee_id.map(|id| id.to_string()),
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
            "work_center_id",
            current.work_center_id.map(|id| id.to_string()),
            write.work_center_id.map(|id| id.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "purchase_date",
            current.purchase_date.map(|d| d.to_string()),
            write.purchase_date.map(|d| d.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "purchase_value",
            current.purchase_value.map(|v| v.to_string()),
            write.purchase_value.map(|v| v.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "warranty_expiry",
            current.warranty_expiry.map(|d| d.to_string()),
            write.warranty_expiry.map(|d| d.to_string()),
        );
        FieldChangeEntry::track(
            &mut changes,
            "location",
            current.location.clone(),
            write.location.clone(),
        );
        FieldChangeEntry::track(
            &mut changes,
            "active",
            Some(current.active.to_string()),
            Some(write.active.to_string()),
        );
        changes
    }
}
