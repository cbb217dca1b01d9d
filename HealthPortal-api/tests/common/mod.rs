#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use health_portal_api::{create_app, AppConfig, AppState};
use health_portal_data::database::DatabasePool;
use health_portal_domain::ai::AnalysisPipeline;

/// Application over a fresh in-memory database
pub fn test_app(pipeline: Option<AnalysisPipeline>) -> Router {
    let pool = DatabasePool::in_memory().expect("in-memory database");
    create_app(AppState::new(pool, pipeline), &AppConfig::default())
}

/// Send a request and decode the JSON response body (`Null` when empty)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Create a supplement and return its ID
pub async fn create_supplement(app: &Router, body: Value) -> i64 {
    let (status, json) = post(app, "/api/supplements", body).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", json);
    json["id"].as_i64().unwrap()
}
