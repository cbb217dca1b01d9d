mod common;

use std::fs;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

use health_portal_api::{create_app, AppConfig, AppState};
use health_portal_data::database::DatabasePool;
use health_portal_domain::testing::ScriptedCompletionClient;

use common::{get, test_app};

#[tokio::test]
async fn test_health_reports_degraded_without_ai() {
    let app = test_app(None);

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["database"]["status"], "ok");
    assert_eq!(body["components"]["ai"]["status"], "degraded");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_ok_with_ai() {
    let (pipeline, _client) = ScriptedCompletionClient::new("ok").into_pipeline();
    let app = test_app(Some(pipeline));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app(None);

    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Health Portal API");
    assert!(body["paths"]["/api/ai/analyze"].is_object());
}

#[tokio::test]
async fn test_request_id_and_nosniff_headers() {
    let app = test_app(None);

    let response = app
        .oneshot(Request::builder().uri("/api/goals").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

    let app = test_app(None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/goals")
                .header("x-request-id", "trace-me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_app(None);

    let preflight = |origin: &'static str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/supplements")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(preflight("http://localhost:5173")).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "300");

    let response = app.oneshot(preflight("https://evil.example.com")).await.unwrap();
    assert!(!response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_static_files_fall_back_to_index() {
    let dir = std::env::temp_dir().join(format!("health_portal_static_{}", std::process::id()));
    fs::create_dir_all(dir.join("assets")).unwrap();
    fs::write(dir.join("index.html"), "<html>portal</html>").unwrap();
    fs::write(dir.join("assets").join("app.js"), "console.log('portal')").unwrap();

    let config = AppConfig {
        static_dir: dir.clone(),
        ..AppConfig::default()
    };
    let pool = DatabasePool::in_memory().unwrap();
    let app = create_app(AppState::new(pool, None), &config);

    for (uri, expected) in [
        ("/assets/app.js", "console.log('portal')"),
        ("/supplements/12", "<html>portal</html>"),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, expected.as_bytes(), "{}", uri);
    }

    // API routes still win over the fallback
    let (status, _) = get(&app, "/api/goals").await;
    assert_eq!(status, StatusCode::OK);

    let _ = fs::remove_dir_all(dir);
}
