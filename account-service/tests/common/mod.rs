use std::sync::Arc;

use account_service::domain::user::credential_service::CredentialService;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use credentials::HashAlgorithm;
use credentials::PasswordHasher;
use serde_json::json;
use serde_json::Value;
use tower_http::cors::CorsLayer;

pub const STRONG_PASSWORD: &str = "Secret1!pass";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Lowest bcrypt cost keeps the suite fast
        let hasher = PasswordHasher::with_algorithm(HashAlgorithm::Bcrypt, 4)
            .expect("Failed to build password hasher");
        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            CredentialService::new(hasher, 4),
        ));

        let router = create_router(user_service, CorsLayer::permissive());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user with a strong password and return the response body
    pub async fn register(&self, first_name: &str, email: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({
                "first_name": first_name,
                "last_name": "Muster",
                "email": email,
                "password": STRONG_PASSWORD,
                "password_confirmation": STRONG_PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}
