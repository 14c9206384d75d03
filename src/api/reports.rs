//! Logistics reporting endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        inventory::InventorySummary, material_request::MaterialRequestView, safety::SafetySummary,
    },
};

use super::AuthenticatedUser;

/// Logistics analytics computed from current records
#[derive(Serialize, ToSchema)]
pub struct LogisticsReport {
    /// Total number of requests
    pub total_requests: i64,
    /// Requests per status
    pub by_status: Vec<StatEntry>,
    /// Requests per category (empty categories omitted)
    pub by_category: Vec<StatEntry>,
    /// Issued requests not yet returned
    pub unreturned: i64,
    /// Issued requests past their expected return date
    pub overdue: i64,
    /// Percentage of requests returned, 100 when there are none
    pub compliance_rate: f64,
    pub overdue_items: Vec<MaterialRequestView>,
    pub classrooms_needing_attention: Vec<InventorySummary>,
    pub latest_safety_summary: Option<SafetySummary>,
}

#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    /// Label
    pub label: String,
    /// Value
    pub value: i64,
}

/// Get logistics analytics
#[utoipa::path(
    get,
    path = "/reports/logistics",
    tag = "reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logistics report", body = LogisticsReport),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_logistics_report(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<LogisticsReport>> {
    Ok(Json(state.services.reports.logistics_report().await))
}
