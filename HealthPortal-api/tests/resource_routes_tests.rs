mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use common::{create_supplement, delete, get, post, put, send_request, test_app};

#[tokio::test]
async fn test_supplement_crud_round_trip() {
    let app = test_app(None);

    let id = create_supplement(
        &app,
        json!({"name": "Magnesium glycinate", "dose": "400 mg", "time_of_day": "evening", "category": "minerals"}),
    )
    .await;

    let (status, body) = get(&app, &format!("/api/supplements/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Magnesium glycinate");
    assert_eq!(body["status"], "active");

    // Unset fields survive a partial update
    let (status, body) = put(&app, &format!("/api/supplements/{}", id), json!({"dose": "200 mg"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dose"], "200 mg");
    assert_eq!(body["time_of_day"], "evening");
    assert_eq!(body["category"], "minerals");

    let (status, body) = delete(&app, &format!("/api/supplements/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (_, body) = get(&app, "/api/supplements?status=removed").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = get(&app, "/api/supplements?status=active").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_supplement_groupings() {
    let app = test_app(None);
    create_supplement(&app, json!({"name": "Vitamin D3", "time_of_day": "morning", "category": "vitamins"})).await;
    create_supplement(&app, json!({"name": "Omega-3", "time_of_day": "morning"})).await;
    create_supplement(&app, json!({"name": "Glycine", "time_of_day": "evening", "category": "amino acids"})).await;

    let (status, body) = get(&app, "/api/supplements/schedule").await;
    assert_eq!(status, StatusCode::OK);
    let slots = body.as_array().unwrap();
    assert_eq!(slots.len(), 2);
    let morning = slots.iter().find(|slot| slot["time_of_day"] == "morning").unwrap();
    assert_eq!(morning["supplements"].as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/api/supplements/by-category").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uncategorized"][0]["name"], "Omega-3");
    assert_eq!(body["vitamins"][0]["name"], "Vitamin D3");
}

#[tokio::test]
async fn test_error_status_mapping() {
    let app = test_app(None);

    let (status, body) = post(&app, "/api/supplements", json!({"name": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = get(&app, "/api/goals/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Goal with ID 999 not found");

    let (status, body) = get(&app, "/api/labs/not-a-number").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/goals")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = delete(&app, "/api/reminders/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_goal_lifecycle() {
    let app = test_app(None);

    let (status, body) = post(
        &app,
        "/api/goals",
        json!({"name": "Lower ApoB", "target_value": "< 80 mg/dL", "priority": "high"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["status"], "active");

    let (status, body) = put(&app, &format!("/api/goals/{}", id), json!({"status": "achieved"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "achieved");
    assert_eq!(body["priority"], "high");

    let (status, _) = post(&app, "/api/goals", json!({"name": "Sleep", "priority": "urgent"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = delete(&app, &format!("/api/goals/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &format!("/api/goals/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_interactions_carry_supplement_names() {
    let app = test_app(None);
    let zinc = create_supplement(&app, json!({"name": "Zinc"})).await;
    let copper = create_supplement(&app, json!({"name": "Copper"})).await;

    let (status, body) = post(
        &app,
        "/api/interactions",
        json!({
            "supplement_1_id": zinc,
            "supplement_2_id": copper,
            "interaction_type": "warning",
            "description": "Zinc lowers copper absorption"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["supplement_1_name"], "Zinc");
    assert_eq!(body["supplement_2_name"], "Copper");

    let (_, body) = get(&app, "/api/interactions?type=warning").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = get(&app, "/api/interactions?type=synergy").await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = post(
        &app,
        "/api/interactions",
        json!({"supplement_1_id": zinc, "supplement_2_id": zinc}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/api/interactions",
        json!({"supplement_1_id": zinc, "supplement_2_id": 999}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lab_trends_marker_history_and_import() {
    let app = test_app(None);

    for (date, value) in [("2024-03-01", 3.1), ("2024-01-15", 2.4)] {
        let (status, _) = post(
            &app,
            "/api/labs",
            json!({"test_date": date, "marker_name": "TSH", "value": value, "unit": "mIU/L", "category": "thyroid"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, "/api/labs/trends").await;
    assert_eq!(status, StatusCode::OK);
    let trends = body.as_array().unwrap();
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0]["marker_name"], "TSH");
    assert_eq!(trends[0]["data_points"][0]["date"], "2024-01-15");
    assert_eq!(trends[0]["data_points"][1]["value"], 3.1);

    let (_, body) = get(&app, "/api/labs/marker/TSH").await;
    assert_eq!(body[0]["test_date"], "2024-03-01");

    let (status, body) = post(
        &app,
        "/api/labs/import",
        json!({
            "lab_name": "Helix",
            "test_date": "2024-06-01",
            "markers": [
                {"marker_name": "Ferritin", "value": 85.0, "unit": "ng/mL"},
                {"marker_name": null, "value": 1.0},
                {"marker_name": "Glucose", "value": null}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"imported": 1, "total": 3}));

    let (_, body) = get(&app, "/api/labs?category=thyroid").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_reminder_toggle_and_today() {
    let app = test_app(None);

    let (status, body) = post(
        &app,
        "/api/reminders",
        json!({"title": "Morning stack", "time": "08:00"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["is_active"], true);

    // No weekdays means every day
    let (_, body) = get(&app, "/api/reminders/today").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = post(&app, &format!("/api/reminders/{}/toggle", id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (_, body) = get(&app, "/api/reminders/today").await;
    assert!(body.as_array().unwrap().is_empty());
    let (_, body) = get(&app, "/api/reminders?active=true").await;
    assert!(body.as_array().unwrap().is_empty());
    let (_, body) = get(&app, "/api/reminders").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = post(&app, "/api/reminders", json!({"title": "Bad", "time": "25:99"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cycle_lifecycle() {
    let app = test_app(None);

    let (status, body) = get(&app, "/api/cycles/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (status, body) = post(
        &app,
        "/api/cycles",
        json!({"cycle_date": "2024-05-01", "cycle_type": "full", "input_data": {"sleep": "6h"}}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (_, body) = get(&app, "/api/cycles/latest").await;
    assert_eq!(body["id"], id);

    let (status, body) = put(&app, &format!("/api/cycles/{}", id), json!({"verdict": "go"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verdict"], "go");
    assert_eq!(body["cycle_type"], "full");

    let (status, body) = delete(&app, &format!("/api/cycles/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cycle deleted");

    let (status, _) = delete(&app, &format!("/api/cycles/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let app = test_app(None);
    let a = create_supplement(&app, json!({"name": "Iron"})).await;
    let b = create_supplement(&app, json!({"name": "Calcium"})).await;
    post(
        &app,
        "/api/interactions",
        json!({"supplement_1_id": a, "supplement_2_id": b, "interaction_type": "critical"}),
    )
    .await;
    post(
        &app,
        "/api/labs",
        json!({"test_date": "2024-02-01", "marker_name": "Ferritin", "value": 12.0, "reference_min": 30.0, "reference_max": 400.0}),
    )
    .await;

    let (status, body) = get(&app, "/api/dashboard/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active_supplements"], 2);
    assert_eq!(body["critical_interactions"], 1);
    assert_eq!(body["active_goals"], 0);
    assert!(body["latest_cycle"].is_null());
    assert_eq!(body["lab_alerts"][0]["marker_name"], "Ferritin");
    assert_eq!(body["lab_alerts"][0]["status"], "low");
}

#[tokio::test]
async fn test_profile_partial_update() {
    let app = test_app(None);

    let (status, body) = get(&app, "/api/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Default User");

    let (status, body) = put(&app, "/api/profile", json!({"weight_kg": 82.5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight_kg"], 82.5);
    assert_eq!(body["name"], "Default User");

    let (status, _) = put(&app, "/api/profile", json!({"height_cm": 10})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
