//! Authentication endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::staff::StaffMember};

/// Token request
#[derive(Deserialize, ToSchema)]
pub struct TokenRequest {
    /// Staff directory id
    pub staff_id: String,
    /// School access code
    pub access_code: String,
}

/// Token response
#[derive(Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in hours
    pub expires_in_hours: u64,
    pub staff: StaffMember,
}

/// Obtain a bearer token for a staff member
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid staff id or access code")
    )
)]
pub async fn issue_token(
    State(state): State<crate::AppState>,
    Json(request): Json<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let (token, staff) = state
        .services
        .auth
        .issue_token(&request.staff_id, &request.access_code)
        .await?;

    Ok(Json(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in_hours: state.services.auth.expiration_hours(),
        staff,
    }))
}
