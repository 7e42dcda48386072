//! End-to-end checks of the HTTP surface against an in-memory database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use chairside_api::{app, AppState};
use chairside_core::Database;

fn clinic() -> Router {
    let db = Database::open_in_memory().unwrap();
    app(AppState::new(db))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

fn date_from_today(days: i64) -> String {
    (chrono::Local::now().date_naive() + chrono::Duration::days(days)).to_string()
}

#[tokio::test]
async fn test_health_and_service_index() {
    let app = clinic();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["endpoints"]["patients"], "/api/patients");
    assert_eq!(body["endpoints"]["roster"], "/api/roster");
}

#[tokio::test]
async fn test_unknown_route_gets_the_failure_envelope() {
    let app = clinic();

    let (status, body) = get(&app, "/api/prescriptions").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_patient_registration_flow() {
    let app = clinic();

    let (status, body) = post(
        &app,
        "/api/patients",
        json!({
            "name": "Alice Zhang",
            "phone": "13800000000",
            "desc": "Persistent toothache",
            "visitDate": "2025-06-10",
            "time": "09:30",
            "toothPos": "UL1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let profile = &body["data"];
    let id = profile["id"].as_str().unwrap().to_string();
    assert_eq!(profile["visitDate"], "2025-06-10");
    assert_eq!(profile["time"], "09:30");
    assert_eq!(profile["status"], "waiting");
    assert_eq!(profile["treatmentType"], "initial");
    assert_eq!(profile["records"].as_array().unwrap().len(), 1);

    let (status, body) = get(&app, "/api/patients").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = get(&app, &format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice Zhang");

    let (status, body) = get(&app, "/api/patients/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not found: patient ghost");
}

#[tokio::test]
async fn test_patient_update_rewrites_the_latest_record() {
    let app = clinic();

    let (_, body) = post(
        &app,
        "/api/patients",
        json!({
            "name": "Alice Zhang",
            "phone": "13800000000",
            "desc": "Persistent toothache",
            "visitDate": "2025-06-10"
        }),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = put(
        &app,
        &format!("/api/patients/{id}"),
        json!({ "status": "completed", "desc": "Filled UL1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["records"].as_array().unwrap().len(), 1);

    // Identity-only patches leave the history alone.
    let (status, body) = put(
        &app,
        &format!("/api/patients/{id}"),
        json!({ "phone": "13900000000" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone"], "13900000000");
    assert_eq!(body["data"]["records"][0]["desc"], "Filled UL1");

    let (status, body) = delete(&app, &format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["message"].is_string());

    let (status, _) = delete(&app, &format!("/api/patients/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_a_bad_request() {
    let app = clinic();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/patients")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    // Structurally valid JSON missing a required field fails the same way.
    let (status, body) = post(&app, "/api/patients", json!({ "phone": "13800000000" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_treatment_record_endpoints() {
    let app = clinic();

    let (_, body) = post(
        &app,
        "/api/patients",
        json!({ "name": "Alice Zhang", "phone": "13800000000" }),
    )
    .await;
    let patient_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["records"].as_array().unwrap().len(), 0);

    let (status, _) = post(
        &app,
        "/api/treatments",
        json!({
            "patientId": patient_id,
            "date": "2025-06-10",
            "time": "09:00",
            "desc": "Cleaning",
            "status": "completed"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = post(
        &app,
        "/api/treatments",
        json!({
            "patientId": patient_id,
            "date": "2025-06-11",
            "time": "10:30",
            "desc": "Check healing",
            "status": "waiting"
        }),
    )
    .await;
    let record_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = get(&app, &format!("/api/treatments/patient/{patient_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["date"], "2025-06-11");

    // The profile reflects the newest record.
    let (_, body) = get(&app, &format!("/api/patients/{patient_id}")).await;
    assert_eq!(body["data"]["visitDate"], "2025-06-11");
    assert_eq!(body["data"]["status"], "waiting");

    let (status, body) = put(
        &app,
        &format!("/api/treatments/{record_id}"),
        json!({ "desc": "Healing well" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["desc"], "Healing well");

    let (status, body) = get(
        &app,
        "/api/treatments/date-range?startDate=2025-06-10&endDate=2025-06-10",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["patientName"], "Alice Zhang");

    let (status, _) = delete(&app, &format!("/api/treatments/{record_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, &format!("/api/patients/{patient_id}")).await;
    assert_eq!(body["data"]["visitDate"], "2025-06-10");
}

#[tokio::test]
async fn test_appointment_day_filter() {
    let app = clinic();

    let (status, body) = post(
        &app,
        "/api/appointments",
        json!({
            "patientName": "Bob Li",
            "phone": "13900000000",
            "type": "cleaning",
            "date": "2025-06-10",
            "time": "14:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["time"], "14:00");
    assert_eq!(body["data"]["status"], "booked");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    post(
        &app,
        "/api/appointments",
        json!({
            "patientName": "Carol Wu",
            "phone": "13700000000",
            "type": "extraction",
            "date": "2025-06-11",
            "time": "09:30"
        }),
    )
    .await;

    let (_, body) = get(&app, "/api/appointments?date=2025-06-10").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["patientName"], "Bob Li");

    let (_, body) = get(&app, "/api/appointments").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = put(
        &app,
        &format!("/api/appointments/{id}"),
        json!({ "status": "break" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "break");

    let (status, _) = delete(&app, &format!("/api/appointments/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/appointments").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_medicine_inventory_flow() {
    let app = clinic();

    let (status, body) = post(
        &app,
        "/api/medicines",
        json!({
            "name": "Lidocaine",
            "expiryDate": date_from_today(200),
            "stock": 5,
            "minStock": 10,
            "unit": "box"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "normal");

    let (_, body) = post(
        &app,
        "/api/medicines",
        json!({ "name": "Articaine", "expiryDate": date_from_today(10) }),
    )
    .await;
    assert_eq!(body["data"]["status"], "warning");

    let (_, body) = post(
        &app,
        "/api/medicines",
        json!({ "name": "Old gel", "expiryDate": date_from_today(-1) }),
    )
    .await;
    assert_eq!(body["data"]["status"], "expired");

    let (status, body) = get(&app, "/api/medicines?status=warning").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Articaine");

    let (status, body) = get(&app, "/api/medicines?status=bogus").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);

    let (status, body) = get(&app, "/api/medicines/summary").await;
    assert_eq!(status, StatusCode::OK);
    let report = &body["data"];
    assert_eq!(report["expiredCount"], 1);
    assert_eq!(report["warningCount"], 1);
    assert_eq!(report["attention"].as_array().unwrap().len(), 2);
    assert_eq!(report["lowStock"].as_array().unwrap().len(), 1);
    assert_eq!(report["lowStock"][0]["name"], "Lidocaine");
}

#[tokio::test]
async fn test_shopping_list_flow() {
    let app = clinic();

    let (status, body) = post(
        &app,
        "/api/shopping",
        json!({ "name": "Gloves", "quantity": "2 boxes" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["isBought"], false);
    assert_eq!(body["data"]["isCustom"], true);
    let gloves = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = post(&app, "/api/shopping", json!({ "name": "Masks" })).await;
    let masks = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(&app, &format!("/api/shopping/{gloves}/toggle"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isBought"], true);

    let (_, body) = get(&app, "/api/shopping?pending=true").await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Masks");

    let (status, body) = post(
        &app,
        "/api/shopping/batch-bought",
        json!({ "ids": [masks, "ghost"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], 1);

    let (_, body) = get(&app, "/api/shopping?pending=true").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (status, _) = delete(&app, &format!("/api/shopping/{gloves}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/shopping").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_roster_query() {
    let app = clinic();

    post(
        &app,
        "/api/patients",
        json!({
            "name": "Alice Zhang",
            "phone": "13800000000",
            "desc": "Persistent toothache",
            "visitDate": "2025-06-10",
            "time": "09:30"
        }),
    )
    .await;
    post(
        &app,
        "/api/patients",
        json!({
            "name": "Bob Li",
            "phone": "13900000000",
            "desc": "Wisdom tooth",
            "visitDate": "2025-06-11",
            "time": "10:00"
        }),
    )
    .await;

    let (status, body) = get(&app, "/api/roster?year=2025&month=6&day=10").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["patientName"], "Alice Zhang");
    assert_eq!(rows[0]["time"], "09:30");
    assert_eq!(rows[0]["completed"], false);

    let (_, body) = get(&app, "/api/roster?year=2025&month=6").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = get(&app, "/api/roster?year=2025&month=6&q=Bob").await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["patientName"], "Bob Li");

    let (status, body) = get(&app, "/api/roster?year=2025&month=13").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}
