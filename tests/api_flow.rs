//! End-to-end API tests over the in-process router. No advisory
//! service is configured, so every selector-backed endpoint serves the
//! local fallback.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use caretide::advisor::ReferenceData;
use caretide::api::router::api_router;
use caretide::api::types::ApiContext;
use caretide::db::sqlite::open_memory_database;

const TOKEN: &str = "test-token";

fn test_router() -> Router {
    let ctx = ApiContext::new(
        open_memory_database().unwrap(),
        ReferenceData::load().unwrap(),
        None,
        TOKEN.into(),
    );
    api_router(ctx)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn sample_medication(name: &str) -> Value {
    json!({
        "name": name,
        "dosage": "5mg",
        "frequency": "once_daily",
        "quantity": 30
    })
}

#[tokio::test]
async fn health_probe_needs_no_auth() {
    let router = test_router();
    let (status, body) = send(&router, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["advisor_configured"], false);
}

#[tokio::test]
async fn protected_routes_reject_missing_and_bad_tokens() {
    let router = test_router();

    let (status, body) = send(&router, Method::GET, "/api/medications", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    let (status, _) = send(
        &router,
        Method::GET,
        "/api/medications",
        Some("wrong-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn medication_create_and_fetch_round_trip() {
    let router = test_router();

    let (status, created) = send(
        &router,
        Method::POST,
        "/api/medications",
        Some(TOKEN),
        Some(sample_medication("Lisinopril")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["name"], "Lisinopril");
    assert_eq!(created["data"]["status"], "active");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, list) = send(&router, Method::GET, "/api/medications", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let (status, detail) = send(
        &router,
        Method::GET,
        &format!("/api/medications/{id}"),
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["id"], id.as_str());
}

#[tokio::test]
async fn status_transition_rules_enforced() {
    let router = test_router();
    let (_, created) = send(
        &router,
        Method::POST,
        "/api/medications",
        Some(TOKEN),
        Some(sample_medication("Metformin")),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &router,
        Method::PUT,
        &format!("/api/medications/{id}/status"),
        Some(TOKEN),
        Some(json!({ "status": "paused" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Paused is terminal-adjacent: only Active can transition.
    let (status, body) = send(
        &router,
        Method::PUT,
        &format!("/api/medications/{id}/status"),
        Some(TOKEN),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (_, filtered) = send(
        &router,
        Method::GET,
        "/api/medications?status=active",
        Some(TOKEN),
        None,
    )
    .await;
    assert!(filtered["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn interactions_served_as_fallback_without_advisor() {
    let router = test_router();
    for name in ["Warfarin", "Aspirin"] {
        send(
            &router,
            Method::POST,
            "/api/medications",
            Some(TOKEN),
            Some(sample_medication(name)),
        )
        .await;
    }

    let (status, body) = send(
        &router,
        Method::GET,
        "/api/medications/interactions",
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["service_status"], "fallback");
    assert_eq!(body["data"]["risk_level"], "moderate-high");
    assert_eq!(body["data"]["total_interactions"], 1);
    assert_eq!(body["data"]["major"].as_array().unwrap().len(), 1);
    assert!(body["data"]["severe"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["major"][0]["medications"][0], "Warfarin");
}

#[tokio::test]
async fn reminders_and_refill_alerts_fall_back() {
    let router = test_router();
    send(
        &router,
        Method::POST,
        "/api/medications",
        Some(TOKEN),
        Some(json!({
            "name": "Metformin",
            "dosage": "500mg",
            "frequency": "twice_daily",
            "quantity": 4
        })),
    )
    .await;

    let (status, reminders) = send(
        &router,
        Method::GET,
        "/api/medications/reminders",
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reminders["service_status"], "fallback");
    // Default window is 7 days at 2 doses per day.
    let listed = reminders["data"]["reminders"].as_array().unwrap();
    assert_eq!(listed.len(), 14);
    assert_eq!(reminders["data"]["today_count"], 2);
    assert_eq!(reminders["data"]["upcoming_count"], 12);
    assert!(listed[0]["scheduled_at"]
        .as_str()
        .unwrap()
        .contains("T08:00:00"));

    // 4 tablets at 2/day, started today: 2 days of supply left.
    let (status, alerts) = send(
        &router,
        Method::GET,
        "/api/medications/refill-alerts",
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alerts["service_status"], "fallback");
    assert_eq!(alerts["data"]["critical_count"], 1);
    let alert = &alerts["data"]["refill_alerts"].as_array().unwrap()[0];
    assert_eq!(alert["level"], "critical");
    assert_eq!(alert["days_remaining"], 2);
}

#[tokio::test]
async fn manual_vital_reading_round_trip() {
    let router = test_router();

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/vitals",
        Some(TOKEN),
        Some(json!({
            "heart_rate": 72,
            "systolic": 118,
            "diastolic": 76,
            "oxygen_saturation": 98
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, latest) = send(&router, Method::GET, "/api/vitals/latest", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["data"]["heart_rate"], 72);
}

#[tokio::test]
async fn implausible_vital_reading_rejected() {
    let router = test_router();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/vitals",
        Some(TOKEN),
        Some(json!({
            "heart_rate": 400,
            "systolic": 118,
            "diastolic": 76
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("heart_rate"));
}

#[tokio::test]
async fn simulation_requires_profile_then_fills_history() {
    let router = test_router();

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/vitals/simulate",
        Some(TOKEN),
        Some(json!({ "hours": 24, "seed": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        Method::PUT,
        "/api/profile",
        Some(TOKEN),
        Some(json!({
            "age": 40,
            "weight": 70.0,
            "height": 175.0,
            "smoking": false,
            "symptoms": [],
            "conditions": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, simulated) = send(
        &router,
        Method::POST,
        "/api/vitals/simulate",
        Some(TOKEN),
        Some(json!({ "hours": 24, "seed": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(simulated["data"].as_array().unwrap().len(), 24);

    let (status, analysis) = send(&router, Method::GET, "/api/vitals/analysis", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis["service_status"], "fallback");
    assert_eq!(analysis["data"]["sample_count"], 24);
}

#[tokio::test]
async fn risk_assessment_falls_back_and_flags_critical_symptoms() {
    let router = test_router();

    let (status, _) = send(&router, Method::GET, "/api/health/assessment", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &router,
        Method::PUT,
        "/api/profile",
        Some(TOKEN),
        Some(json!({
            "age": 70,
            "weight": 70.0,
            "height": 175.0,
            "smoking": true,
            "symptoms": ["chest pain"],
            "conditions": []
        })),
    )
    .await;

    let (status, body) = send(&router, Method::GET, "/api/health/assessment", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service_status"], "fallback");
    assert_eq!(body["data"]["risk_level"], "High");
    assert!(body["data"]["recommendations"][0]
        .as_str()
        .unwrap()
        .contains("immediate medical attention"));
}

#[tokio::test]
async fn dosage_validation_flags_excess() {
    let router = test_router();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/medications/validate-dosage",
        Some(TOKEN),
        Some(json!({
            "medication": "metformin",
            "dosage": "1.5g",
            "frequency": "twice_daily"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["exceeds_max"], true);
    // Local-only operation: no degradation marker.
    assert!(body.get("service_status").is_none());
}
