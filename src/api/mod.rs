//! API handlers for the logistics REST endpoints

pub mod auth;
pub mod health;
pub mod inventories;
pub mod material_requests;
pub mod openapi;
pub mod reports;
pub mod safety;
pub mod staff;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post, put},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::staff::UserClaims, AppState};

/// Extractor for authenticated staff from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// JSON body that may be omitted; an empty body yields `T::default()`
pub struct OptionalJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(OptionalJson)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/token", post(auth::issue_token))
        // Staff directory
        .route("/staff", get(staff::list_staff).post(staff::upsert_staff))
        // Material requests
        .route(
            "/material-requests",
            get(material_requests::list_requests).post(material_requests::submit_request),
        )
        .route("/material-requests/:id", get(material_requests::get_request))
        .route("/material-requests/:id/approve", post(material_requests::approve_request))
        .route("/material-requests/:id/decline", post(material_requests::decline_request))
        .route("/material-requests/:id/issue", post(material_requests::issue_request))
        .route("/material-requests/:id/return", post(material_requests::return_request))
        // Classroom inventories
        .route("/classrooms", get(inventories::list_classrooms))
        .route(
            "/classrooms/:class/inventory",
            get(inventories::get_inventory).put(inventories::update_inventory),
        )
        .route("/classrooms/:class/inventory/items", put(inventories::set_inventory_item))
        // Safety inspections
        .route(
            "/safety-inspections",
            get(safety::list_inspections).post(safety::start_inspection),
        )
        .route("/safety-inspections/latest", get(safety::latest_inspection))
        .route(
            "/safety-inspections/:id",
            get(safety::get_inspection).put(safety::update_inspection),
        )
        .route("/safety-inspections/:id/checks", put(safety::set_check))
        // Reports
        .route("/reports/logistics", get(reports::get_logistics_report))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
