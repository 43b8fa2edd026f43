//! Export, backup and settings API tests.

mod common;

use axum::http::header::{AUTHORIZATION, CONTENT_DISPOSITION};
use axum::http::StatusCode;

use common::fixtures;
use common::TestContext;

#[tokio::test]
#[ignore = "requires database"]
async fn test_export_round_trips_through_import() {
    let ctx = TestContext::new().await;
    let server = ctx.server();
    let (device_id, token) = ctx.create_test_device(None).await;
    let auth = TestContext::auth_header_value(&token);

    server
        .post("/api/words/import")
        .add_header(AUTHORIZATION, auth.clone())
        .json(&fixtures::import_history_request(vec![
            fixtures::history_record("h1", "partir", 3, Some("2024-01-10")),
            fixtures::history_record("h2", "venir", 0, None),
        ]))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/export")
        .add_header(AUTHORIZATION, auth.clone())
        .await;

    response.assert_status_ok();
    let disposition = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"vocab_progress_"));

    let exported: Vec<serde_json::Value> = serde_json::from_str(&response.text()).unwrap();
    assert_eq!(exported.len(), 2);
    assert_eq!(exported[0]["word"], "partir");
    assert_eq!(exported[0]["last_seen"], "2024-01-10");
    assert!(exported[1]["last_seen"].is_null());

    let reimported: serde_json::Value = server
        .post("/api/words/import")
        .add_header(AUTHORIZATION, auth)
        .json(&serde_json::json!({ "history": exported }))
        .await
        .json();
    assert_eq!(reimported["words"].as_array().unwrap().len(), 2);
    assert_eq!(reimported["words"][0]["streak"], 3);

    ctx.cleanup_device(device_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_backup_without_storage_fails() {
    let ctx = TestContext::new().await;
    let server = ctx.server();
    let (device_id, token) = ctx.create_test_device(None).await;

    let response = server
        .post("/api/export/backup")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "storage_error");

    ctx.cleanup_device(device_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_settings_report_engine_defaults() {
    let ctx = TestContext::new().await;
    let server = ctx.server();
    let (device_id, token) = ctx.create_test_device(None).await;

    let response = server
        .get("/api/settings")
        .add_header(AUTHORIZATION, TestContext::auth_header_value(&token))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["engine"]["graduation_streak"], 5);
    assert_eq!(body["engine"]["cold_share"], 0.75);
    assert_eq!(body["default_session_size"], 10);

    ctx.cleanup_device(device_id).await;
}
