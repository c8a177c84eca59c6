//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    audit, auth, categories, directory, equipment, health, requests, stages, stats, teams,
    work_centers,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "1.0.0",
        description = "Maintenance Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "GearGuard Team", email = "contact@gearguard.dev")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        auth::list_users,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::scrap_equipment,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Requests
        requests::list_requests,
        requests::get_request,
        requests::create_request,
        requests::update_request,
        requests::assign_to_me,
        requests::mark_repaired,
        // Stages
        stages::list_stages,
        stages::get_stage,
        stages::create_stage,
        stages::update_stage,
        stages::delete_stage,
        // Teams
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        // Work centers
        work_centers::list_work_centers,
        work_centers::get_work_center,
        work_centers::create_work_center,
        work_centers::update_work_center,
        // Directory
        directory::list_departments,
        directory::list_employees,
        directory::list_vendors,
        // Audit trail
        audit::get_audit_trail,
        audit::post_message,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::User,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentQuery,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::ScrapEquipment,
            crate::models::category::EquipmentCategory,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Requests
            crate::models::request::MaintenanceRequest,
            crate::models::request::RequestQuery,
            crate::models::request::CreateRequest,
            crate::models::request::UpdateRequest,
            crate::models::stage::MaintenanceStage,
            crate::models::stage::CreateStage,
            crate::models::stage::UpdateStage,
            // Teams
            crate::models::team::MaintenanceTeam,
            crate::models::team::CreateTeam,
            crate::models::team::UpdateTeam,
            // Work centers
            crate::models::work_center::WorkCenter,
            crate::models::work_center::CreateWorkCenter,
            crate::models::work_center::UpdateWorkCenter,
            // Shared vocabulary
            crate::models::enums::OwnershipType,
            crate::models::enums::RequestType,
            crate::models::enums::KanbanState,
            crate::models::enums::WarrantyStatus,
            crate::models::enums::RecordType,
            // Directory
            crate::models::directory::Department,
            crate::models::directory::Employee,
            crate::models::directory::Vendor,
            // Audit trail
            crate::models::audit::RecordMessage,
            crate::models::audit::FieldChange,
            crate::models::audit::CreateMessage,
            audit::AuditTrailResponse,
            // Stats
            stats::StatsResponse,
            stats::EquipmentStats,
            stats::RequestStats,
            stats::TeamStats,
            stats::StatEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipment", description = "Equipment fleet management"),
        (name = "categories", description = "Equipment categories"),
        (name = "requests", description = "Maintenance request management"),
        (name = "stages", description = "Kanban stage configuration"),
        (name = "teams", description = "Maintenance teams"),
        (name = "work-centers", description = "Work center management"),
        (name = "directory", description = "Departments, employees and vendors"),
        (name = "audit", description = "Record messages and change history"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by the per-route security requirements.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
