use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, HeaderName, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use vehicle_configurator::config::EnvironmentConfig;
use vehicle_configurator::models::{BodyConfig, ChassisSpec, ConfigurationSession};
use vehicle_configurator::repositories::memory_repository::{
    DEMO_BODY_B4XR_ID, DEMO_CHASSIS_138_ID, DEMO_CHASSIS_158_ID,
};
use vehicle_configurator::repositories::{CatalogRepository, InMemoryStore, Repositories, SessionRepository};
use vehicle_configurator::utils::errors::AppError;
use vehicle_configurator::{create_app, AppState};

struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    content_disposition: Option<String>,
    bytes: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap()
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers.get(name).map(|v| v.to_str().unwrap().to_string())
}

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::with_demo_catalog());
        let repositories = Repositories {
            catalog: store.clone(),
            sessions: store.clone(),
            quotes: store.clone(),
            saved: store.clone(),
        };
        let router = create_app(AppState::new(EnvironmentConfig::default(), repositories));
        Self { router, store }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = header_value(response.headers(), header::CONTENT_TYPE);
        let content_disposition = header_value(response.headers(), header::CONTENT_DISPOSITION);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

        TestResponse {
            status,
            content_type,
            content_disposition,
            bytes,
        }
    }

    async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    async fn create_session(&self) -> String {
        let response = self.post("/api/configurations/sessions", json!({})).await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()["sessionId"].as_str().unwrap().to_string()
    }

    async fn select(&self, session_id: &str, selection_type: &str, item_id: Uuid) -> TestResponse {
        self.post(
            &format!("/api/configurations/sessions/{}/selections", session_id),
            json!({ "selectionType": selection_type, "selectedItemId": item_id.to_string() }),
        )
        .await
    }

    async fn create_quote(&self, session_id: &str) -> TestResponse {
        self.post(
            "/api/quotes",
            json!({
                "sessionId": session_id,
                "customerName": "Dana Fleet",
                "customerEmail": "dana@example.com",
                "customerCompany": "Metro Transit"
            }),
        )
        .await
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_chassis_catalog() {
    let app = TestApp::new();

    let response = app.get("/api/chassis").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json().as_array().unwrap().len(), 2);

    let response = app.get(&format!("/api/chassis/{}", DEMO_CHASSIS_138_ID)).await;
    assert_eq!(response.status, StatusCode::OK);
    let chassis = response.json();
    assert_eq!(chassis["msrp"].as_f64(), Some(41585.0));
    assert_eq!(chassis["destinationCharge"].as_f64(), Some(2095.0));
    assert_eq!(chassis["totalPrice"].as_f64(), Some(43680.0));
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = TestApp::new();

    let response = app.get(&format!("/api/chassis/{}", Uuid::new_v4())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Chassis not found");

    let response = app.get("/api/bodies/not-a-uuid").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Body configuration not found");

    let response = app.get("/api/configurations/sessions/123").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Session not found");
}

#[tokio::test]
async fn test_catalog_vehicles_filters() {
    let app = TestApp::new();

    let response = app.get("/api/catalog/vehicles?fuelType=all").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["total"], 2);
    assert_eq!(body["vehicles"][0]["price"], "Contact for pricing");
    assert_eq!(body["vehicles"][0]["image"], "/api/placeholder/400/300");

    let body = app.get("/api/catalog/vehicles?maxPassengers=18").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["vehicles"][0]["code"], "B4XR-CONFIG");

    let body = app.get("/api/catalog/vehicles?fuelType=Gasoline").await.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_create_session_then_get() {
    let app = TestApp::new();
    let session_id = app.create_session().await;

    let response = app.get(&format!("/api/configurations/sessions/{}", session_id)).await;
    assert_eq!(response.status, StatusCode::OK);
    let session = response.json();
    assert_eq!(session["status"], "active");
    assert_eq!(session["currentStep"], "chassis_selection");
    assert_eq!(session["userType"], "customer");
    assert_eq!(session["sessionToken"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_create_session_without_body() {
    let app = TestApp::new();
    let response = app.request(Method::POST, "/api/configurations/sessions", None).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["userType"], "customer");
}

#[tokio::test]
async fn test_create_session_with_wrong_types_is_rejected() {
    let app = TestApp::new();
    let response = app.post("/api/configurations/sessions", json!({ "userType": 5 })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_selection_missing_field_stores_nothing() {
    let app = TestApp::new();
    let session_id = app.create_session().await;
    let uri = format!("/api/configurations/sessions/{}/selections", session_id);

    let response = app.post(&uri, json!({ "selectedItemId": "abc" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Missing required field: selectionType");

    let response = app.post(&uri, json!({ "selectionType": "chassis" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Missing required field: selectedItemId");

    let response = app.get(&uri).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json().as_array().unwrap().is_empty());

    let session_uuid = Uuid::parse_str(&session_id).unwrap();
    assert!(app.store.list_selections(session_uuid).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_selection_for_unknown_session() {
    let app = TestApp::new();
    let response = app.select(&Uuid::new_v4().to_string(), "chassis", DEMO_CHASSIS_138_ID).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Session not found");
}

#[tokio::test]
async fn test_pricing_with_chassis_selection() {
    let app = TestApp::new();
    let session_id = app.create_session().await;

    let response = app.select(&session_id, "chassis", DEMO_CHASSIS_138_ID).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["selectionType"], "chassis");
    let response = app.select(&session_id, "body", DEMO_BODY_B4XR_ID).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.get(&format!("/api/pricing/sessions/{}", session_id)).await;
    assert_eq!(response.status, StatusCode::OK);
    let pricing = response.json();
    assert_eq!(pricing["chassisPrice"].as_f64(), Some(41585.0));
    assert_eq!(pricing["destinationCharge"].as_f64(), Some(2095.0));
    assert_eq!(pricing["bodyPrice"].as_f64(), Some(0.0));
    assert_eq!(pricing["totalPrice"].as_f64(), Some(43680.0));
    assert_eq!(pricing["breakdown"]["body"]["note"], "Contact for pricing");
}

#[tokio::test]
async fn test_pricing_follows_latest_chassis_selection() {
    let app = TestApp::new();
    let session_id = app.create_session().await;

    app.select(&session_id, "chassis", DEMO_CHASSIS_138_ID).await;
    app.select(&session_id, "chassis", DEMO_CHASSIS_158_ID).await;

    let pricing = app.get(&format!("/api/pricing/sessions/{}", session_id)).await.json();
    assert_eq!(pricing["chassisPrice"].as_f64(), Some(42330.0));
    assert_eq!(pricing["totalPrice"].as_f64(), Some(44425.0));
}

#[tokio::test]
async fn test_pricing_without_chassis_is_zero() {
    let app = TestApp::new();
    let session_id = app.create_session().await;

    let response = app.get(&format!("/api/pricing/sessions/{}", session_id)).await;
    assert_eq!(response.status, StatusCode::OK);
    let pricing = response.json();
    assert_eq!(pricing["chassisPrice"].as_f64(), Some(0.0));
    assert_eq!(pricing["destinationCharge"].as_f64(), Some(0.0));
    assert_eq!(pricing["bodyPrice"].as_f64(), Some(0.0));
    assert_eq!(pricing["totalPrice"].as_f64(), Some(0.0));
    assert!(pricing["breakdown"]["body"]["note"].is_null());
}

#[tokio::test]
async fn test_pricing_missing_chassis_warns() {
    let app = TestApp::new();
    let session_id = app.create_session().await;

    let response = app.select(&session_id, "chassis", Uuid::new_v4()).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.get(&format!("/api/pricing/sessions/{}", session_id)).await;
    assert_eq!(response.status, StatusCode::OK);
    let pricing = response.json();
    assert_eq!(pricing["totalPrice"].as_f64(), Some(0.0));
    assert_eq!(pricing["breakdown"]["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_quote_requires_fields() {
    let app = TestApp::new();
    let session_id = app.create_session().await;

    let response = app
        .post("/api/quotes", json!({ "sessionId": session_id, "customerEmail": "dana@example.com" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Missing required field: customerName");

    let response = app
        .post(
            "/api/quotes",
            json!({ "sessionId": session_id, "customerName": "Dana", "customerEmail": "dana" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "VALIDATION_ERROR");

    let response = app.create_quote(&Uuid::new_v4().to_string()).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_two_quotes_share_totals() {
    let app = TestApp::new();
    let session_id = app.create_session().await;
    app.select(&session_id, "chassis", DEMO_CHASSIS_138_ID).await;

    let first = app.create_quote(&session_id).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let second = app.create_quote(&session_id).await;
    assert_eq!(second.status, StatusCode::CREATED);

    let (first, second) = (first.json(), second.json());
    assert_ne!(first["quoteId"], second["quoteId"]);
    assert_ne!(first["quoteNumber"], second["quoteNumber"]);
    assert_eq!(first["totalPrice"].as_f64(), Some(43680.0));
    assert_eq!(first["totalPrice"], second["totalPrice"]);
    assert_eq!(first["status"], "draft");

    let quote_id = first["quoteId"].as_str().unwrap();
    let response = app.get(&format!("/api/quotes/{}", quote_id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["quoteNumber"], first["quoteNumber"]);
}

#[tokio::test]
async fn test_quoted_session_rejects_selections() {
    let app = TestApp::new();
    let session_id = app.create_session().await;
    app.select(&session_id, "chassis", DEMO_CHASSIS_138_ID).await;
    app.create_quote(&session_id).await;

    let session = app.get(&format!("/api/configurations/sessions/{}", session_id)).await.json();
    assert_eq!(session["status"], "completed");
    assert_eq!(session["currentStep"], "complete");

    let response = app.select(&session_id, "body", DEMO_BODY_B4XR_ID).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["code"], "INVALID_STATE");
}

#[tokio::test]
async fn test_expired_session_is_reported_and_locked() {
    let app = TestApp::new();
    let created = Utc::now() - Duration::days(45);
    let session = ConfigurationSession::new("stale-token".into(), "dealer".into(), created);
    let session = app.store.create_session(&session).await.unwrap();
    let session_id = session.id.to_string();

    let body = app.get(&format!("/api/configurations/sessions/{}", session_id)).await.json();
    assert_eq!(body["status"], "expired");

    let response = app.select(&session_id, "chassis", DEMO_CHASSIS_138_ID).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_pdf_for_unknown_quote() {
    let app = TestApp::new();
    let response = app.get(&format!("/api/quotes/{}/pdf", Uuid::new_v4())).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Quote not found");
}

#[tokio::test]
async fn test_pdf_for_existing_quote() {
    let app = TestApp::new();
    let session_id = app.create_session().await;
    app.select(&session_id, "chassis", DEMO_CHASSIS_138_ID).await;
    app.select(&session_id, "body", DEMO_BODY_B4XR_ID).await;
    let quote = app.create_quote(&session_id).await.json();

    let pdf_url = quote["pdfUrl"].as_str().unwrap();
    let response = app.get(pdf_url).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("application/pdf"));
    assert!(response.bytes.starts_with(b"%PDF"));
    let disposition = response.content_disposition.unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&format!("Endera_Quote_{}.pdf", quote["quoteNumber"].as_str().unwrap())));
}

#[tokio::test]
async fn test_update_session_step() {
    let app = TestApp::new();
    let session_id = app.create_session().await;
    let uri = format!("/api/configurations/sessions/{}", session_id);

    let response = app.request(Method::PUT, &uri, Some(json!({ "currentStep": "body_selection" }))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["currentStep"], "body_selection");

    let response = app.request(Method::PUT, &uri, Some(json!({ "currentStep": "checkout" }))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_selection() {
    let app = TestApp::new();
    let session_id = app.create_session().await;
    let selection = app.select(&session_id, "option", Uuid::new_v4()).await.json();
    let uri = format!(
        "/api/configurations/sessions/{}/selections/{}",
        session_id,
        selection["id"].as_str().unwrap()
    );

    let response = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["success"], true);

    let response = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Selection not found");
}

/// Catálogo que siempre falla, para comprobar que no se filtran detalles
#[tokio::test]
async fn test_quote_validation_names_api_field() {
    let app = TestApp::new();
    let session_id = app.create_session().await;

    let response = app
        .post(
            "/api/quotes",
            json!({ "sessionId": session_id, "customerName": "Dana Fleet", "customerEmail": "dana" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Invalid field: customerEmail");

    let response = app
        .post(
            "/api/quotes",
            json!({ "sessionId": session_id, "customerName": "Dana Fleet", "customerEmail": " dana@example.com " }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["customerEmail"], "dana@example.com");
}

#[tokio::test]
async fn test_save_and_open_shared_configuration() {
    let app = TestApp::new();
    let session_id = app.create_session().await;
    assert_eq!(app.select(&session_id, "chassis", DEMO_CHASSIS_138_ID).await.status, StatusCode::CREATED);

    let response = app
        .post(
            "/api/configurations/save",
            json!({ "sessionId": session_id, "configurationName": "Campus loop", "userEmail": "ops@example.com" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let saved = response.json();
    let share_token = saved["shareToken"].as_str().unwrap().to_string();
    assert_eq!(saved["shareUrl"], format!("/api/configurations/shared/{}", share_token));

    let response = app.get(&format!("/api/configurations/shared/{}", share_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let shared = response.json();
    assert_eq!(shared["configurationId"], saved["configurationId"]);
    assert_eq!(shared["configurationName"], "Campus loop");
    assert_eq!(shared["chassisId"], DEMO_CHASSIS_138_ID.to_string());
    assert_eq!(shared["selections"].as_array().unwrap().len(), 1);
    assert_eq!(shared["totalPrice"].as_f64(), Some(43680.0));
    assert_eq!(shared["isFavorite"], false);
    assert!(shared.get("userEmail").is_none());
}

#[tokio::test]
async fn test_save_configuration_errors() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/configurations/save",
            json!({ "sessionId": Uuid::new_v4().to_string(), "configurationName": "Ghost" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Session not found");

    let session_id = app.create_session().await;
    let response = app.post("/api/configurations/save", json!({ "sessionId": session_id })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Missing required field: configurationName");

    let response = app.get("/api/configurations/shared/not-a-token").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Configuration not found");
}

#[tokio::test]
async fn test_catalog_filter_options() {
    let app = TestApp::new();
    let response = app.get("/api/catalog/filters").await;
    assert_eq!(response.status, StatusCode::OK);

    let filters = response.json();
    assert_eq!(filters["fuelTypes"], json!(["Electric"]));
    assert_eq!(filters["capacityRange"], json!({ "min": 18, "max": 20 }));
    assert_eq!(filters["priceRange"]["min"].as_f64(), Some(43680.0));
    assert_eq!(filters["seriesCodes"], json!(["E3F"]));
    assert_eq!(filters["wheelchairOptions"], json!([0, 1, 2]));
}

struct FailingCatalog;

#[async_trait]
impl CatalogRepository for FailingCatalog {
    async fn list_chassis(&self) -> Result<Vec<ChassisSpec>, AppError> {
        Err(AppError::Storage("connection to 10.0.0.5:5432 refused".into()))
    }

    async fn find_chassis(&self, _id: Uuid) -> Result<Option<ChassisSpec>, AppError> {
        Err(AppError::Storage("connection to 10.0.0.5:5432 refused".into()))
    }

    async fn list_bodies(&self, _fuel_type: Option<&str>) -> Result<Vec<BodyConfig>, AppError> {
        Err(AppError::Storage("connection to 10.0.0.5:5432 refused".into()))
    }

    async fn find_body(&self, _id: Uuid) -> Result<Option<BodyConfig>, AppError> {
        Err(AppError::Storage("connection to 10.0.0.5:5432 refused".into()))
    }
}

#[tokio::test]
async fn test_storage_failure_is_generic_500() {
    let store = Arc::new(InMemoryStore::default());
    let repositories = Repositories {
        catalog: Arc::new(FailingCatalog),
        sessions: store.clone(),
        quotes: store.clone(),
        saved: store,
    };
    let router = create_app(AppState::new(EnvironmentConfig::default(), repositories));

    let request = Request::builder().uri("/api/chassis").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert!(!String::from_utf8_lossy(&bytes).contains("10.0.0.5"));
}
