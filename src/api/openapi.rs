//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, inventories, material_requests, reports, safety, staff};
use crate::models::enums;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Logistics API",
        version = "1.0.0",
        description = "Material requests, classroom inventory and safety audits REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::issue_token,
        // Staff
        staff::list_staff,
        staff::upsert_staff,
        // Material requests
        material_requests::list_requests,
        material_requests::get_request,
        material_requests::submit_request,
        material_requests::approve_request,
        material_requests::decline_request,
        material_requests::issue_request,
        material_requests::return_request,
        // Classroom inventories
        inventories::list_classrooms,
        inventories::get_inventory,
        inventories::update_inventory,
        inventories::set_inventory_item,
        // Safety
        safety::list_inspections,
        safety::latest_inspection,
        safety::get_inspection,
        safety::start_inspection,
        safety::update_inspection,
        safety::set_check,
        // Reports
        reports::get_logistics_report,
    ),
    components(
        schemas(
            // Auth
            auth::TokenRequest,
            auth::TokenResponse,
            // Staff
            crate::models::staff::StaffMember,
            crate::models::staff::StaffRole,
            crate::models::staff::StaffRef,
            crate::models::staff::UpsertStaff,
            // Material requests
            crate::models::material_request::MaterialRequest,
            crate::models::material_request::MaterialRequestView,
            crate::models::material_request::CreateMaterialRequest,
            crate::models::material_request::Approval,
            crate::models::material_request::Issuance,
            crate::models::material_request::ReturnRecord,
            material_requests::ApproveRequest,
            material_requests::DeclineRequest,
            material_requests::IssueRequest,
            material_requests::ReturnRequest,
            enums::Category,
            enums::Purpose,
            enums::UsageDuration,
            enums::Priority,
            enums::RequestStatus,
            enums::SupplyCondition,
            enums::ReturnCondition,
            enums::ReturnStatus,
            // Inventories
            crate::models::inventory::ClassroomInventory,
            crate::models::inventory::InventoryEntry,
            crate::models::inventory::UpdateInventory,
            crate::models::inventory::SetInventoryItem,
            crate::models::inventory::InventorySummary,
            enums::ItemStatus,
            enums::ItemCondition,
            enums::InventoryPriority,
            // Safety
            crate::models::safety::SafetyInspection,
            crate::models::safety::SafetyCheck,
            crate::models::safety::CreateSafetyInspection,
            crate::models::safety::UpdateSafetyInspection,
            crate::models::safety::SetSafetyCheck,
            crate::models::safety::SafetySummary,
            enums::CheckStatus,
            enums::RiskLevel,
            enums::InspectionStatus,
            // Reports
            reports::LogisticsReport,
            reports::StatEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Token issuance"),
        (name = "staff", description = "Staff directory"),
        (name = "material_requests", description = "Material request lifecycle"),
        (name = "inventories", description = "Classroom inventory checklists"),
        (name = "safety", description = "Safety inspections"),
        (name = "reports", description = "Logistics analytics")
    )
)]
pub struct ApiDoc;

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
