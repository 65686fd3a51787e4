mod common;

use activity_service::services::providers::mock::MockTextProvider;
use activity_service::services::storage::mock::MockStorage;
use common::TestApp;
use serde_json::{json, Value};

const SUGGESTIONS: &str =
    r#"[{"activity":"Kayaking","location":"Lake Michigan"},{"activity":"Museum visit","location":"Art Institute"}]"#;

#[tokio::test]
async fn valid_reply_is_passed_through() {
    let app = TestApp::spawn(SUGGESTIONS).await;

    let response = app.get_activities("outdoor stuff", "Chicago, IL").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "activities": SUGGESTIONS }));
}

#[tokio::test]
async fn fenced_reply_is_cleaned() {
    let app = TestApp::spawn(&format!("```json\n{}\n```", SUGGESTIONS)).await;

    let response = app.get_activities("outdoor stuff", "Chicago, IL").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["activities"], SUGGESTIONS);
}

#[tokio::test]
async fn invalid_reply_is_reported_with_raw_text() {
    let app = TestApp::spawn("Sure! Here are some ideas: kayaking, hiking").await;

    let response = app.get_activities("outdoor stuff", "Chicago, IL").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid JSON response from AI");
    assert_eq!(body["raw"], "Sure! Here are some ideas: kayaking, hiking");
    assert!(body.get("activities").is_none());
}

#[tokio::test]
async fn prompt_contains_the_request() {
    let app = TestApp::spawn(SUGGESTIONS).await;

    app.get_activities("board games", "Austin, TX").await;

    let prompts = app.text_provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with("User Request: board games with Austin, TX"));
}

#[tokio::test]
async fn provider_failure_is_a_server_error() {
    let app = TestApp::spawn_with(MockTextProvider::failing(), MockStorage::new(Vec::new())).await;

    let response = app.get_activities("outdoor stuff", "Chicago, IL").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn empty_parameters_are_rejected() {
    let app = TestApp::spawn(SUGGESTIONS).await;

    let response = app.get_activities("", "Chicago, IL").await;

    assert_eq!(response.status().as_u16(), 422);
    assert!(app.text_provider.prompts().is_empty());
}

#[tokio::test]
async fn missing_parameters_are_rejected() {
    let app = TestApp::spawn(SUGGESTIONS).await;

    let response = app.get("/get-activities?user_prompt=hiking").await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(app.text_provider.prompts().is_empty());
}
