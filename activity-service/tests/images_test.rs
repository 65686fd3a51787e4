mod common;

use activity_service::services::providers::mock::MockTextProvider;
use activity_service::services::storage::mock::MockStorage;
use activity_service::services::StorageObject;
use common::TestApp;
use serde_json::Value;

const MATCHES: &str = r#"[{"activity":"Kayaking","image":"kayaking.png"}]"#;

#[tokio::test]
async fn matches_are_passed_through() {
    let app = TestApp::spawn_with(
        MockTextProvider::with_reply(MATCHES),
        MockStorage::with_files(&["kayaking.png", "zoo.png"]),
    )
    .await;

    let response = app.get_images("Kayaking").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["activity_images"], MATCHES);
}

#[tokio::test]
async fn prompt_lists_bucket_filenames_and_skips_nameless_rows() {
    let app = TestApp::spawn_with(
        MockTextProvider::with_reply(MATCHES),
        MockStorage::new(vec![
            StorageObject::named("kayaking.png"),
            StorageObject::default(),
            StorageObject::named("zoo.png"),
        ]),
    )
    .await;

    app.get_images("Kayaking, Zoo trip").await;

    let prompts = app.text_provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("User list of activities: Kayaking, Zoo trip"));
    assert!(prompts[0].ends_with(r#"Available image files: ["kayaking.png","zoo.png"]"#));
}

#[tokio::test]
async fn bucket_is_listed_on_every_request() {
    let app = TestApp::spawn_with(
        MockTextProvider::with_reply(MATCHES),
        MockStorage::with_files(&["kayaking.png"]),
    )
    .await;

    app.get_images("Kayaking").await;
    app.get_images("Kayaking").await;

    assert_eq!(app.storage.list_calls(), 2);
}

#[tokio::test]
async fn fenced_reply_is_cleaned() {
    let app = TestApp::spawn_with(
        MockTextProvider::with_reply(format!("```\n{}\n```", MATCHES)),
        MockStorage::with_files(&["kayaking.png"]),
    )
    .await;

    let body: Value = app.get_images("Kayaking").await.json().await.unwrap();

    assert_eq!(body["activity_images"], MATCHES);
}

#[tokio::test]
async fn invalid_reply_is_reported_with_raw_text() {
    let app = TestApp::spawn_with(
        MockTextProvider::with_reply("kayaking.png"),
        MockStorage::with_files(&["kayaking.png"]),
    )
    .await;

    let response = app.get_images("Kayaking").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid JSON response from AI");
    assert_eq!(body["raw"], "kayaking.png");
}

#[tokio::test]
async fn storage_failure_is_a_server_error() {
    let app = TestApp::spawn_with(
        MockTextProvider::with_reply(MATCHES),
        MockStorage::with_files(&["kayaking.png"]).failing_list(),
    )
    .await;

    let response = app.get_images("Kayaking").await;

    assert_eq!(response.status().as_u16(), 500);
    assert!(app.text_provider.prompts().is_empty());
}

#[tokio::test]
async fn provider_failure_is_a_server_error() {
    let app = TestApp::spawn_with(
        MockTextProvider::failing(),
        MockStorage::with_files(&["kayaking.png"]),
    )
    .await;

    let response = app.get_images("Kayaking").await;

    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn missing_activities_is_rejected() {
    let app = TestApp::spawn(MATCHES).await;

    let response = app.get("/get-images").await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(app.storage.list_calls(), 0);
}
