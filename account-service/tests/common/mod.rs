use std::sync::Arc;

use account_service::domain::user::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::Authenticator;
use auth::HashingConfig;
use auth::TokenConfig;
use auth::TokenSigner;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: InMemoryUserRepository,
    pub api_client: reqwest::Client,
    pub token_signer: TokenSigner,
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

        let repository = InMemoryUserRepository::new();

        // Cheap Argon2 parameters keep the suite fast
        let authenticator = Arc::new(
            Authenticator::from_config(
                TokenConfig::with_hours(TEST_SECRET, 24),
                HashingConfig::new(1024, 1, 1),
            )
            .expect("Failed to create authenticator"),
        );

        let account_service = Arc::new(AccountService::new(
            Arc::new(repository.clone()),
            Arc::clone(&authenticator),
        ));

        let router = create_router(account_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            token_signer: TokenSigner::new(TokenConfig::with_hours(TEST_SECRET, 24)),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Sign up a user and return the raw response
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/sign-up")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign in and return the raw response
    pub async fn sign_in(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/sign-in")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up a user and return the issued token
    pub async fn sign_up_token(&self, name: &str, email: &str, password: &str) -> String {
        let body: Value = self
            .sign_up(name, email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("token missing from response")
            .to_string()
    }
}
