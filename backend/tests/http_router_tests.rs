//! Router-level tests driving the axum app with `oneshot`.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use plfs_dashboard::http::{create_router, AppState};
use support::{fixture_dataset, seeded_repository, settings, LFPR, UR};

async fn app() -> Router {
    let repo = Arc::new(seeded_repository());
    create_router(AppState::new(repo, fixture_dataset().await, settings()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_session(app: &Router) -> String {
    let (status, body) = send_json(app, Method::POST, "/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_reports_dataset() {
    let app = app().await;
    let (status, body) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert!(body["rows"].as_u64().unwrap() > 0);
    assert_eq!(body["fingerprint"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_options_and_domains() {
    let app = app().await;
    let (status, body) = send_json(&app, Method::GET, "/v1/options", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["indicator"][0], LFPR);
    assert_eq!(body["year"][0], "Select All");

    let uri = "/v1/domains?indicator=Unemployment%20Rate%20(UR)";
    let (status, body) = send_json(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sector"], json!(["Rural + Urban"]));
    assert_eq!(body["year"], json!(["Select All", 2022, 2021, 2020, 2019]));
}

#[tokio::test]
async fn test_stateless_resolve() {
    let app = app().await;
    let selection = json!({
        "indicator": UR,
        "region": "Kerala",
        "sector": "Rural + Urban",
        "gender": "female",
        "years": [2021, 2019],
        "status": "Usual Status (ps+ss)"
    });
    let (status, body) = send_json(&app, Method::POST, "/v1/resolve", Some(selection)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chart"]["traces"][0]["x"], json!([2019, 2021]));
    assert_eq!(body["series"]["points"].as_array().unwrap().len(), 2);
    assert_eq!(body["chart"]["layout"]["hover_mode"], "closest");
}

#[tokio::test]
async fn test_session_flow_with_export() {
    let app = app().await;
    let id = new_session(&app).await;

    let (status, body) =
        send_json(&app, Method::POST, &format!("/v1/sessions/{id}/initial-load"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rendered"], true);

    let (_, body) =
        send_json(&app, Method::POST, &format!("/v1/sessions/{id}/initial-load"), None).await;
    assert_eq!(body["rendered"], false);

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/v1/sessions/{id}/indicator"),
        Some(json!({ "indicator": UR })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], json!(["All India", "Kerala"]));

    let (status, body) = send_json(
        &app,
        Method::PATCH,
        &format!("/v1/sessions/{id}/selection"),
        Some(json!({ "years": [2020], "gender": "person" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["years"], json!([2020]));

    let (status, body) =
        send_json(&app, Method::POST, &format!("/v1/sessions/{id}/apply"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["traces"][0]["x"], json!([2020]));

    let (status, body) = send_json(&app, Method::GET, &format!("/v1/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "rendered");
    assert_eq!(body["apply_count"], 1);
    assert_eq!(body["last_trigger"], "apply");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/v1/sessions/{id}/export?format=svg"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/svg+xml"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"plot.svg\""
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("</svg>"));
}

#[tokio::test]
async fn test_error_status_mapping() {
    let app = app().await;
    let id = new_session(&app).await;

    let (status, body) =
        send_json(&app, Method::GET, &format!("/v1/sessions/{id}/export"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_CHART_TO_EXPORT");

    let (status, body) =
        send_json(&app, Method::GET, &format!("/v1/sessions/{id}/chart"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NO_CHART_TO_EXPORT");

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/v1/sessions/{id}/indicator"),
        Some(json!({ "indicator": "Literacy Rate" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_VALID_SELECTION");

    send_json(
        &app,
        Method::PUT,
        &format!("/v1/sessions/{id}/indicator"),
        Some(json!({ "indicator": UR })),
    )
    .await;
    let (status, body) = send_json(
        &app,
        Method::PATCH,
        &format!("/v1/sessions/{id}/selection"),
        Some(json!({ "region": "Bihar" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_OPTION");

    send_json(&app, Method::POST, &format!("/v1/sessions/{id}/apply"), None).await;
    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("/v1/sessions/{id}/export?format=png"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["code"], "RENDER_UNAVAILABLE");

    let (status, _) = send_json(
        &app,
        Method::GET,
        &format!("/v1/sessions/{id}/export?format=gif"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_and_deleted_sessions() {
    let app = app().await;
    let (status, body) = send_json(&app, Method::GET, "/v1/sessions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let id = new_session(&app).await;
    let (status, _) = send(&app, Method::DELETE, &format!("/v1/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) =
        send(&app, Method::POST, &format!("/v1/sessions/{id}/apply"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
