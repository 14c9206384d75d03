//! API integration tests against an in-memory router

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use school_logistics_server::{
    api::create_router,
    config::AppConfig,
    models::staff::{StaffMember, StaffRole, UserClaims},
    repository::{
        snapshots::{MemorySnapshotSink, MATERIAL_REQUESTS_KEY},
        Repository,
    },
    services::Services,
    AppState,
};

const SECRET: &str = "integration-secret";
const ACCESS_CODE: &str = "staff-room-1234";

fn member(id: &str, name: &str, role: StaffRole) -> StaffMember {
    StaffMember {
        id: id.into(),
        name: name.into(),
        role,
    }
}

fn staff() -> Vec<StaffMember> {
    vec![
        member("fac-1", "Ama Mensah", StaffRole::Facilitator),
        member("mgr-1", "Kofi Boateng", StaffRole::LogisticsManager),
        member("store-1", "Yaw Owusu", StaffRole::StoreKeeper),
        member("desk-1", "Efua Asante", StaffRole::AdminDesk),
        member("safe-1", "Akua Darko", StaffRole::SafetyOfficer),
        member("admin", "Administrator", StaffRole::Administrator),
    ]
}

struct TestApp {
    router: Router,
    sink: MemorySnapshotSink,
    services: Arc<Services>,
}

impl TestApp {
    async fn new() -> Self {
        let sink = MemorySnapshotSink::new();
        let repository = Repository::load(Arc::new(sink.clone()), staff())
            .await
            .expect("repository");
        let mut config = AppConfig::default();
        config.auth.jwt_secret = SECRET.to_string();
        config.auth.access_code = ACCESS_CODE.to_string();

        let services = Arc::new(Services::new(repository, config.auth.clone()));

        let router = create_router(AppState {
            config: Arc::new(config),
            services: services.clone(),
        });
        Self { router, sink, services }
    }

    fn token(&self, staff_id: &str) -> String {
        let member = staff()
            .into_iter()
            .find(|m| m.id == staff_id)
            .expect("seeded staff member");
        UserClaims::for_staff(&member, 1)
            .create_token(SECRET)
            .expect("token")
    }

    async fn call(&self, method: Method, uri: &str, as_staff: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = as_staff {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(id)));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    async fn get(&self, uri: &str, as_staff: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, Some(as_staff), None).await
    }

    async fn post(&self, uri: &str, as_staff: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(as_staff), Some(body)).await
    }

    async fn put(&self, uri: &str, as_staff: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(as_staff), Some(body)).await
    }

    async fn submit_projector(&self) -> String {
        let (status, body) = self
            .post(
                "/api/v1/material-requests",
                "fac-1",
                json!({ "staff_id": "fac-1", "item_name": "Projector", "quantity_requested": 1, "category": "ict" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().expect("id").to_string()
    }

    async fn issue_with_return_date(&self, id: &str, expected_return_date: &str) {
        let (status, _) = self
            .post(&format!("/api/v1/material-requests/{}/approve", id), "mgr-1", json!({ "approved_quantity": 1 }))
            .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = self
            .post(
                &format!("/api/v1/material-requests/{}/issue", id),
                "store-1",
                json!({ "expected_return_date": expected_return_date, "condition_on_supply": "good" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.call(Method::GET, "/api/v1/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["persistence"], "memory");
}

#[tokio::test]
async fn test_requires_authentication() {
    let app = TestApp::new().await;
    let (status, body) = app.call(Method::GET, "/api/v1/material-requests", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_request_lifecycle() {
    let app = TestApp::new().await;
    let today = Utc::now().date_naive().to_string();

    // submission starts pending
    let id = app.submit_projector().await;
    let (_, list) = app.get("/api/v1/material-requests", "fac-1").await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert_eq!(list[0]["status"], "pending");
    assert_eq!(list[0]["staff_name"], "Ama Mensah");

    // approval records the approver and date
    let (status, approved) = app
        .post(
            &format!("/api/v1/material-requests/{}/approve", id),
            "mgr-1",
            json!({ "approved_quantity": 1, "expected_version": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");
    assert_eq!(approved["approval"]["approval_date"], today);
    assert_eq!(approved["approval"]["approved_by"]["name"], "Kofi Boateng");

    // issue records the supplier
    let (status, issued) = app
        .post(
            &format!("/api/v1/material-requests/{}/issue", id),
            "store-1",
            json!({ "expected_return_date": "2024-06-01", "condition_on_supply": "good" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(issued["status"], "issued");
    assert_eq!(issued["issuance"]["supplied_by"]["staff_id"], "store-1");

    // declining an issued request is rejected
    let (status, body) = app
        .post(&format!("/api/v1/material-requests/{}/decline", id), "mgr-1", json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "InvalidTransition");
    let (_, current) = app.get(&format!("/api/v1/material-requests/{}", id), "fac-1").await;
    assert_eq!(current["status"], "issued");

    // returning the full quantity completes the request
    let (status, returned) = app
        .post(
            &format!("/api/v1/material-requests/{}/return", id),
            "desk-1",
            json!({ "quantity_returned": 1, "condition_on_return": "good" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["status"], "returned");
    assert_eq!(returned["return_record"]["return_status"], "completed");
    assert_eq!(returned["return_record"]["received_by"]["name"], "Efua Asante");
}

#[tokio::test]
async fn test_overdue_request_is_reported() {
    let app = TestApp::new().await;

    // issued with a past return date and never returned
    let overdue_id = app.submit_projector().await;
    app.issue_with_return_date(&overdue_id, "2024-06-01").await;
    let on_time_id = app.submit_projector().await;
    app.issue_with_return_date(&on_time_id, "2999-01-01").await;

    let (_, view) = app.get(&format!("/api/v1/material-requests/{}", overdue_id), "fac-1").await;
    assert_eq!(view["is_overdue"], true);

    let (_, overdue) = app.get("/api/v1/material-requests?overdue=true", "fac-1").await;
    assert_eq!(overdue.as_array().map(Vec::len), Some(1));
    assert_eq!(overdue[0]["id"], overdue_id.as_str());

    let (status, report) = app.get("/api/v1/reports/logistics", "mgr-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_requests"], 2);
    assert_eq!(report["unreturned"], 2);
    assert_eq!(report["overdue"], 1);
    assert_eq!(report["overdue_items"][0]["id"], overdue_id.as_str());
}

#[tokio::test]
async fn test_facilitator_cannot_approve() {
    let app = TestApp::new().await;
    let id = app.submit_projector().await;

    let (status, body) = app
        .post(&format!("/api/v1/material-requests/{}/approve", id), "fac-1", json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "NotAuthorized");

    let (_, current) = app.get(&format!("/api/v1/material-requests/{}", id), "fac-1").await;
    assert_eq!(current["status"], "pending");
}

#[tokio::test]
async fn test_issue_before_approval_is_rejected() {
    let app = TestApp::new().await;
    let id = app.submit_projector().await;

    let (status, body) = app
        .post(&format!("/api/v1/material-requests/{}/issue", id), "store-1", json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "InvalidTransition");
}

#[tokio::test]
async fn test_stale_version_is_rejected() {
    let app = TestApp::new().await;
    let id = app.submit_projector().await;

    let (status, body) = app
        .post(
            &format!("/api/v1/material-requests/{}/decline", id),
            "mgr-1",
            json!({ "expected_version": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "StaleRecord");
}

#[tokio::test]
async fn test_invalid_submission_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/v1/material-requests",
            "fac-1",
            json!({ "staff_id": "fac-1", "item_name": "Markers", "quantity_requested": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, _) = app.get("/api/v1/material-requests/not-a-uuid", "fac-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = app.get("/api/v1/material-requests", "fac-1").await;
    assert_eq!(list.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_empty_report_is_fully_compliant() {
    let app = TestApp::new().await;
    let (status, report) = app.get("/api/v1/reports/logistics", "fac-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_requests"], 0);
    assert_eq!(report["compliance_rate"], 100.0);
    assert!(report["latest_safety_summary"].is_null());
}

#[tokio::test]
async fn test_classroom_inventory() {
    let app = TestApp::new().await;

    let (status, template) = app.get("/api/v1/classrooms/JHS%201/inventory", "fac-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(template["items"].as_array().map(Vec::len), Some(10));
    assert_eq!(template["items"][0]["status"], "available");

    let (status, updated) = app
        .put(
            "/api/v1/classrooms/JHS%201/inventory/items",
            "fac-1",
            json!({ "item": "ICT Equipment (Projector/Laptop)", "status": "missing", "condition": "not_applicable" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["school_class"], "JHS 1");

    let (status, _) = app
        .put(
            "/api/v1/classrooms/JHS%201/inventory/items",
            "fac-1",
            json!({ "item": "Hovercraft", "status": "missing", "condition": "poor" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, report) = app.get("/api/v1/reports/logistics", "fac-1").await;
    assert_eq!(report["classrooms_needing_attention"][0]["school_class"], "JHS 1");
    assert_eq!(report["classrooms_needing_attention"][0]["missing"], 1);
}

#[tokio::test]
async fn test_safety_inspection_roles() {
    let app = TestApp::new().await;

    let (status, _) = app.post("/api/v1/safety-inspections", "fac-1", json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/v1/safety-inspections/latest", "fac-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, inspection) = app.post("/api/v1/safety-inspections", "safe-1", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(inspection["inspector_name"], "Akua Darko");
    let id = inspection["id"].as_str().expect("id").to_string();

    let (status, _) = app
        .put(
            &format!("/api/v1/safety-inspections/{}/checks", id),
            "safe-1",
            json!({ "check": "Fire Safety Equipment", "status": "unsafe", "risk": "high" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, latest) = app.get("/api/v1/safety-inspections/latest", "fac-1").await;
    assert_eq!(latest["id"], id.as_str());

    let (_, report) = app.get("/api/v1/reports/logistics", "fac-1").await;
    assert_eq!(report["latest_safety_summary"]["unsafe_count"], 1);
    assert_eq!(report["latest_safety_summary"]["high_risk_count"], 1);
}

#[tokio::test]
async fn test_staff_upsert_is_admin_only() {
    let app = TestApp::new().await;
    let new_member = json!({ "id": "fac-2", "name": "Kwame Asare", "role": "facilitator" });

    let (status, _) = app.post("/api/v1/staff", "mgr-1", new_member.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.post("/api/v1/staff", "admin", new_member.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.post("/api/v1/staff", "admin", new_member).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = app.get("/api/v1/staff", "fac-1").await;
    assert_eq!(list.as_array().map(Vec::len), Some(staff().len() + 1));
}

#[tokio::test]
async fn test_accepted_changes_reach_the_sink() {
    let app = TestApp::new().await;
    let id = app.submit_projector().await;
    app.post(&format!("/api/v1/material-requests/{}/decline", id), "mgr-1", json!({}))
        .await;

    app.services.flush().await;
    let saved = app.sink.get(MATERIAL_REQUESTS_KEY).await.expect("snapshot saved");
    assert_eq!(saved[0]["id"], id.as_str());
    assert_eq!(saved[0]["status"], "declined");
    assert_eq!(saved[0]["version"], 2);
}

#[tokio::test]
async fn test_transitions_accept_an_empty_body() {
    let app = TestApp::new().await;

    let declined = app.submit_projector().await;
    let (status, body) = app
        .call(Method::POST, &format!("/api/v1/material-requests/{}/decline", declined), Some("mgr-1"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "declined");

    let approved = app.submit_projector().await;
    let (status, body) = app
        .call(Method::POST, &format!("/api/v1/material-requests/{}/approve", approved), Some("mgr-1"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approval"]["approved_quantity"], 1);

    let (status, body) = app
        .call(Method::POST, &format!("/api/v1/material-requests/{}/issue", approved), Some("store-1"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["issuance"]["condition_on_supply"], "good");
}

#[tokio::test]
async fn test_malformed_transition_body_is_rejected() {
    let app = TestApp::new().await;
    let id = app.submit_projector().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/material-requests/{}/approve", id))
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token("mgr-1")))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"approved_quantity\": \"lots\"}"))
        .expect("request");
    let response = app.router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["error"], "BadValue");

    let (_, current) = app.get(&format!("/api/v1/material-requests/{}", id), "fac-1").await;
    assert_eq!(current["status"], "pending");
}

#[tokio::test]
async fn test_issued_token_grants_role_access() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/auth/token",
            None,
            Some(json!({ "staff_id": "mgr-1", "access_code": ACCESS_CODE })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in_hours"], 12);
    assert_eq!(body["staff"]["role"], "logistics_manager");

    let claims = UserClaims::from_token(body["token"].as_str().expect("token"), SECRET).expect("claims");
    assert_eq!(claims.sub, "mgr-1");
    assert_eq!(claims.exp - claims.iat, 12 * 3600);

    let id = app.submit_projector().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/material-requests/{}/approve", id))
        .header(header::AUTHORIZATION, format!("Bearer {}", body["token"].as_str().expect("token")))
        .body(Body::empty())
        .expect("request");
    let response = app.router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_refused_for_bad_credentials() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/auth/token",
            None,
            Some(json!({ "staff_id": "mgr-1", "access_code": "guess" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NotAuthorized");

    let (status, _) = app
        .call(
            Method::POST,
            "/api/v1/auth/token",
            None,
            Some(json!({ "staff_id": "nobody", "access_code": ACCESS_CODE })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_staff_id_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/staff", "admin", json!({ "id": "   ", "name": "X", "role": "facilitator" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (_, list) = app.get("/api/v1/staff", "admin").await;
    assert_eq!(list.as_array().map(Vec::len), Some(staff().len()));
}
