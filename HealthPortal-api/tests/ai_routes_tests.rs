mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};

use health_portal_domain::testing::ScriptedCompletionClient;

use common::{get, post, send_request, test_app};

const STAGES: [&str; 4] = [
    "research_strategy_lead",
    "master_curator",
    "red_team",
    "meta_supervisor",
];

fn sorted_stages() -> Vec<String> {
    let mut stages: Vec<String> = STAGES.iter().map(|s| s.to_string()).collect();
    stages.sort();
    stages
}

/// Role keys of an analysis response; JSON objects do not keep insertion order here
fn result_roles(body: &Value) -> Vec<String> {
    let mut roles: Vec<String> = body["results"].as_object().unwrap().keys().cloned().collect();
    roles.sort();
    roles
}

#[tokio::test]
async fn test_analyze_requires_input() {
    let app = test_app(None);

    let (status, body) = post(&app, "/api/ai/analyze", json!({"role": "full"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Input data is required");

    let (status, _) = post(&app, "/api/ai/analyze", json!({"cycle_id": 77})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_without_api_key_is_an_internal_error() {
    let app = test_app(None);

    let (status, body) = post(&app, "/api/ai/analyze", json!({"input_data": "Slept 6h"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body["message"].as_str().unwrap().starts_with("AI analysis failed"));
}

#[tokio::test]
async fn test_full_cycle_is_saved_to_the_cycle() {
    let (pipeline, client) = ScriptedCompletionClient::new("Stage verdict: wait").into_pipeline();
    let app = test_app(Some(pipeline));

    let (status, cycle) = post(
        &app,
        "/api/cycles",
        json!({"cycle_type": "full", "input_data": {"hrv": 48, "sleep_hours": 6.5}}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let cycle_id = cycle["id"].as_i64().unwrap();

    let (status, body) = post(&app, "/api/ai/analyze", json!({"cycle_id": cycle_id})).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(body["cycle_id"], cycle_id);
    assert_eq!(result_roles(&body), sorted_stages());
    assert_eq!(body["results"]["red_team"]["model"], "scripted");

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 4);
    assert!(prompts[0].contains("sleep_hours"));

    let (status, stored) = get(&app, &format!("/api/ai/analysis/{}", cycle_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_roles(&stored), sorted_stages());
    assert_eq!(stored["results"]["meta_supervisor"]["content"], "Stage verdict: wait");

    let (_, cycle) = get(&app, &format!("/api/cycles/{}", cycle_id)).await;
    assert_eq!(cycle["rsl_output"], "Stage verdict: wait");
}

#[tokio::test]
async fn test_single_role_and_stage_failure() {
    let (pipeline, _client) = ScriptedCompletionClient::new("ok")
        .with_reply("Red team findings")
        .into_pipeline();
    let app = test_app(Some(pipeline));

    let (status, body) = post(
        &app,
        "/api/ai/analyze",
        json!({"role": "red_team", "input_data": "Adding berberine"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["red_team"]["content"], "Red team findings");
    assert!(body.get("cycle_id").is_none());

    let (pipeline, _client) = ScriptedCompletionClient::new("ok")
        .with_reply("RSL plan")
        .with_failure("overloaded")
        .into_pipeline();
    let app = test_app(Some(pipeline));

    let (status, body) = post(&app, "/api/ai/analyze", json!({"input_data": "x"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("master_curator"));
}

#[tokio::test]
async fn test_stored_analysis_for_missing_cycle() {
    let app = test_app(None);
    let (status, _) = get(&app, "/api/ai/analysis/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_parse_labs_with_rule_parser() {
    let app = test_app(None);

    let (status, body) = post(
        &app,
        "/api/ai/parse-labs",
        json!({"text": "ТТГ 250 мМЕ/л 0,4-4,0\nФерритин 85 нг/мл 30-400", "lab_name": "Helix"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lab_name"], "Helix");
    assert_eq!(body["test_date"], "");
    assert_eq!(body["markers"].as_array().unwrap().len(), 2);
    assert_eq!(body["warnings"][0], "TSH: value 250.00 seems out of range");
    assert!(body.get("raw_text").is_none());

    let (status, _) = post(&app, "/api/ai/parse-labs", json!({"text": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_parse_labs_with_model_reply() {
    let reply = r#"Here you go: [{"marker_name": "Ferritin", "value": 85, "unit": "ng/mL", "reference_min": 30, "reference_max": 400, "category": "iron"}]"#;
    let (pipeline, client) = ScriptedCompletionClient::new(reply).into_pipeline();
    let app = test_app(Some(pipeline));

    let (status, body) = post(&app, "/api/ai/parse-labs", json!({"text": "Ferritin 85"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["markers"][0]["marker_name"], "Ferritin");
    assert_eq!(body["markers"][0]["category"], "iron");
    assert!(client.prompts()[0].contains("Ferritin 85"));
}

fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let boundary = "health-portal-boundary";
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/ai/parse-pdf")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_parse_pdf_upload() {
    let app = test_app(None);

    let request = multipart_request(&[
        ("file", Some("report.pdf"), &b"%PDF-1.4\nBT (Glucose 5,2 mmol/L 3,9-6,1) Tj ET\nBT (Ferritin 85 ng/mL 30-400) Tj ET"[..]),
        ("lab_name", None, &b"Invitro"[..]),
        ("test_date", None, &b"2024-06-01"[..]),
    ]);
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(body["lab_name"], "Invitro");
    assert_eq!(body["test_date"], "2024-06-01");
    assert_eq!(body["markers"].as_array().unwrap().len(), 2);
    assert_eq!(body["markers"][0]["value"], 5.2);
    assert_eq!(body["markers"][1]["marker_name"], "Ferritin");

    let request = multipart_request(&[("file", Some("scan.pdf"), &b"%PDF-1.4 no text objects"[..])]);
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Could not extract text from PDF"));

    let request = multipart_request(&[("lab_name", None, &b"Invitro"[..])]);
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_parse_pdf_rejects_oversized_upload() {
    let app = test_app(None);

    let mut pdf = b"%PDF-1.4\n".to_vec();
    pdf.resize(11 * 1024 * 1024, b' ');
    let request = multipart_request(&[("file", Some("huge.pdf"), &pdf[..])]);

    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "payload_too_large");
    assert!(body["message"].as_str().unwrap().contains("10 MiB"));
}
