#![allow(dead_code)]

use activity_service::config::ActivityConfig;
use activity_service::services::providers::mock::MockTextProvider;
use activity_service::services::storage::mock::MockStorage;
use activity_service::startup::{AppState, Application};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    pub text_provider: Arc<MockTextProvider>,
    pub storage: Arc<MockStorage>,
}

fn test_config() -> ActivityConfig {
    let lookup = |key: &str| match key {
        "GEMINI_API" => Some("test-gemini-key".to_string()),
        "SUPABASE_URL" => Some("http://127.0.0.1:54321".to_string()),
        "SUPABASE_KEY" => Some("test-supabase-key".to_string()),
        "HOST" => Some("127.0.0.1".to_string()),
        // Random port for testing
        "PORT" => Some("0".to_string()),
        _ => None,
    };

    ActivityConfig::from_lookup(&lookup)
        .expect("Failed to build test configuration")
}

impl TestApp {
    /// Spawn the service with a mock model that always answers `reply`.
    pub async fn spawn(reply: &str) -> Self {
        Self::spawn_with(MockTextProvider::with_reply(reply), MockStorage::new(Vec::new())).await
    }

    pub async fn spawn_with(text_provider: MockTextProvider, storage: MockStorage) -> Self {
        let text_provider = Arc::new(text_provider);
        let storage = Arc::new(storage);

        let state = AppState {
            text_provider: text_provider.clone(),
            storage: storage.clone(),
        };

        let app = Application::build_with_state(&test_config(), state)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            text_provider,
            storage,
        }
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path_and_query))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_activities(&self, user_prompt: &str, location: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/get-activities", self.address))
            .query(&[("user_prompt", user_prompt), ("location", location)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_images(&self, activities: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/get-images", self.address))
            .query(&[("activities", activities)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}
