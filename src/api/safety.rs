//! Safety inspection endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::safety::{
        CreateSafetyInspection, SafetyInspection, SetSafetyCheck, UpdateSafetyInspection,
    },
};

use super::AuthenticatedUser;

/// List safety inspections, oldest first
#[utoipa::path(
    get,
    path = "/safety-inspections",
    tag = "safety",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Safety inspections", body = Vec<SafetyInspection>)
    )
)]
pub async fn list_inspections(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SafetyInspection>>> {
    Ok(Json(state.services.safety.list().await))
}

/// Get the most recent inspection
#[utoipa::path(
    get,
    path = "/safety-inspections/latest",
    tag = "safety",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Latest inspection", body = SafetyInspection),
        (status = 404, description = "No inspection recorded")
    )
)]
pub async fn latest_inspection(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<SafetyInspection>> {
    let inspection = state.services.safety.latest().await?;
    Ok(Json(inspection))
}

/// Get an inspection by ID
#[utoipa::path(
    get,
    path = "/safety-inspections/{id}",
    tag = "safety",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Inspection ID")
    ),
    responses(
        (status = 200, description = "Inspection", body = SafetyInspection),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn get_inspection(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SafetyInspection>> {
    let inspection = state.services.safety.get(id).await?;
    Ok(Json(inspection))
}

/// Start a new inspection
#[utoipa::path(
    post,
    path = "/safety-inspections",
    tag = "safety",
    security(("bearer_auth" = [])),
    request_body = CreateSafetyInspection,
    responses(
        (status = 201, description = "Inspection started", body = SafetyInspection),
        (status = 403, description = "Not allowed to record inspections")
    )
)]
pub async fn start_inspection(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(input): Json<CreateSafetyInspection>,
) -> AppResult<(StatusCode, Json<SafetyInspection>)> {
    claims.require_write_safety()?;

    let inspection = state.services.safety.start(input, &claims.actor()).await?;
    Ok((StatusCode::CREATED, Json(inspection)))
}

/// Update an inspection's findings and status
#[utoipa::path(
    put,
    path = "/safety-inspections/{id}",
    tag = "safety",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Inspection ID")
    ),
    request_body = UpdateSafetyInspection,
    responses(
        (status = 200, description = "Inspection updated", body = SafetyInspection),
        (status = 403, description = "Not allowed to record inspections"),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn update_inspection(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateSafetyInspection>,
) -> AppResult<Json<SafetyInspection>> {
    claims.require_write_safety()?;

    let inspection = state.services.safety.update(id, update).await?;
    Ok(Json(inspection))
}

/// Set one check's status and risk
#[utoipa::path(
    put,
    path = "/safety-inspections/{id}/checks",
    tag = "safety",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Inspection ID")
    ),
    request_body = SetSafetyCheck,
    responses(
        (status = 200, description = "Check updated", body = SafetyInspection),
        (status = 400, description = "Unknown safety check"),
        (status = 403, description = "Not allowed to record inspections"),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn set_check(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(change): Json<SetSafetyCheck>,
) -> AppResult<Json<SafetyInspection>> {
    claims.require_write_safety()?;

    let inspection = state.services.safety.set_check(id, change).await?;
    Ok(Json(inspection))
}
