//! Staff directory endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::staff::{StaffMember, UpsertStaff},
};

use super::AuthenticatedUser;

/// List the staff directory
#[utoipa::path(
    get,
    path = "/staff",
    tag = "staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Staff members", body = Vec<StaffMember>)
    )
)]
pub async fn list_staff(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<StaffMember>>> {
    Ok(Json(state.services.staff.list().await))
}

/// Create or replace a staff member
#[utoipa::path(
    post,
    path = "/staff",
    tag = "staff",
    security(("bearer_auth" = [])),
    request_body = UpsertStaff,
    responses(
        (status = 201, description = "Staff member created", body = StaffMember),
        (status = 200, description = "Staff member replaced", body = StaffMember),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Administrator only")
    )
)]
pub async fn upsert_staff(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<UpsertStaff>,
) -> AppResult<(StatusCode, Json<StaffMember>)> {
    claims.require_admin()?;

    let (member, created) = state.services.staff.upsert(data).await?;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(member)))
}
