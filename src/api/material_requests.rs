//! Material request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        enums::{ReturnCondition, SupplyCondition},
        material_request::{
            CreateMaterialRequest, MaterialRequest, MaterialRequestQuery, MaterialRequestView,
            Transition,
        },
    },
};

use super::{AuthenticatedUser, OptionalJson};

/// Approve request body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ApproveRequest {
    /// Quantity granted (defaults to the quantity requested)
    pub approved_quantity: Option<u32>,
    /// Version the caller last read
    pub expected_version: Option<u32>,
}

/// Decline request body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeclineRequest {
    pub expected_version: Option<u32>,
}

/// Issue request body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IssueRequest {
    pub expected_return_date: Option<NaiveDate>,
    #[serde(default)]
    pub condition_on_supply: SupplyCondition,
    /// Store or budget line the material comes from
    pub store_source: Option<String>,
    pub expected_version: Option<u32>,
}

/// Return request body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReturnRequest {
    /// Quantity handed back (defaults to the approved quantity)
    pub quantity_returned: Option<u32>,
    #[serde(default)]
    pub condition_on_return: ReturnCondition,
    pub loss_description: Option<String>,
    pub expected_version: Option<u32>,
}

/// List material requests, newest first
#[utoipa::path(
    get,
    path = "/material-requests",
    tag = "material_requests",
    security(("bearer_auth" = [])),
    params(MaterialRequestQuery),
    responses(
        (status = 200, description = "Material requests", body = Vec<MaterialRequestView>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<MaterialRequestQuery>,
) -> AppResult<Json<Vec<MaterialRequestView>>> {
    let requests = state.services.material_requests.list(&query).await;
    Ok(Json(requests))
}

/// Get a material request by ID
#[utoipa::path(
    get,
    path = "/material-requests/{id}",
    tag = "material_requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Material request", body = MaterialRequestView),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MaterialRequestView>> {
    let request = state.services.material_requests.get(id).await?;
    Ok(Json(request))
}

/// Submit a new material request
#[utoipa::path(
    post,
    path = "/material-requests",
    tag = "material_requests",
    security(("bearer_auth" = [])),
    request_body = CreateMaterialRequest,
    responses(
        (status = 201, description = "Request submitted", body = MaterialRequest),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn submit_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(input): Json<CreateMaterialRequest>,
) -> AppResult<(StatusCode, Json<MaterialRequest>)> {
    let request = state.services.material_requests.submit(input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Approve a pending request
#[utoipa::path(
    post,
    path = "/material-requests/{id}/approve",
    tag = "material_requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "Request approved", body = MaterialRequest),
        (status = 403, description = "Not allowed to approve"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is not pending or is stale")
    )
)]
pub async fn approve_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    OptionalJson(body): OptionalJson<ApproveRequest>,
) -> AppResult<Json<MaterialRequest>> {
    claims.require_approve_requests()?;

    let transition = Transition::Approve {
        approved_quantity: body.approved_quantity,
    };
    let request = state
        .services
        .material_requests
        .transition(id, transition, &claims.actor(), body.expected_version)
        .await?;
    Ok(Json(request))
}

/// Decline a pending request
#[utoipa::path(
    post,
    path = "/material-requests/{id}/decline",
    tag = "material_requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = DeclineRequest,
    responses(
        (status = 200, description = "Request declined", body = MaterialRequest),
        (status = 403, description = "Not allowed to decline"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is not pending or is stale")
    )
)]
pub async fn decline_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    OptionalJson(body): OptionalJson<DeclineRequest>,
) -> AppResult<Json<MaterialRequest>> {
    claims.require_approve_requests()?;

    let request = state
        .services
        .material_requests
        .transition(id, Transition::Decline, &claims.actor(), body.expected_version)
        .await?;
    Ok(Json(request))
}

/// Issue an approved request
#[utoipa::path(
    post,
    path = "/material-requests/{id}/issue",
    tag = "material_requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = IssueRequest,
    responses(
        (status = 200, description = "Material issued", body = MaterialRequest),
        (status = 403, description = "Not allowed to issue"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is not approved or is stale")
    )
)]
pub async fn issue_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    OptionalJson(body): OptionalJson<IssueRequest>,
) -> AppResult<Json<MaterialRequest>> {
    claims.require_issue_materials()?;

    let transition = Transition::Issue {
        expected_return_date: body.expected_return_date,
        condition_on_supply: body.condition_on_supply,
        store_source: body.store_source,
    };
    let request = state
        .services
        .material_requests
        .transition(id, transition, &claims.actor(), body.expected_version)
        .await?;
    Ok(Json(request))
}

/// Record the return of an issued request
#[utoipa::path(
    post,
    path = "/material-requests/{id}/return",
    tag = "material_requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Return recorded", body = MaterialRequest),
        (status = 403, description = "Not allowed to receive returns"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is not issued or is stale")
    )
)]
pub async fn return_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    OptionalJson(body): OptionalJson<ReturnRequest>,
) -> AppResult<Json<MaterialRequest>> {
    claims.require_receive_returns()?;

    let transition = Transition::Return {
        quantity_returned: body.quantity_returned,
        condition_on_return: body.condition_on_return,
        loss_description: body.loss_description,
    };
    let request = state
        .services
        .material_requests
        .transition(id, transition, &claims.actor(), body.expected_version)
        .await?;
    Ok(Json(request))
}
