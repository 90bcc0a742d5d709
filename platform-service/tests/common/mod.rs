use std::sync::Arc;

use auth::Authenticator;
use auth::SigningSecrets;
use auth::TokenIssuer;
use platform_service::domain::user::models::DisplayName;
use platform_service::domain::user::models::EmailAddress;
use platform_service::domain::user::models::Password;
use platform_service::domain::user::models::RegisterCommand;
use platform_service::domain::user::models::User;
use platform_service::domain::user::ports::UserServicePort;
use platform_service::domain::user::service::UserService;
use platform_service::inbound::http::cookies::CookieSettings;
use platform_service::inbound::http::router::create_router;
use platform_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const ACCESS_SECRET: &str = "integration_access_secret_32_bytes_min";
pub const REFRESH_SECRET: &str = "integration_refresh_secret_32_bytes_min";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub user_service: Arc<UserService<InMemoryUserRepository>>,
    pub issuer: TokenIssuer,
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

        let secrets = SigningSecrets::new(Some(ACCESS_SECRET), Some(REFRESH_SECRET))
            .expect("Test secrets are valid");
        let authenticator = Arc::new(Authenticator::new(&secrets));
        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
        ));

        let router = create_router(
            Arc::clone(&user_service),
            authenticator,
            CookieSettings::new(false),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            user_service,
            issuer: TokenIssuer::new(&secrets),
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

    /// GET without the shared cookie store.
    pub fn get_without_cookies(&self, path: &str) -> reqwest::RequestBuilder {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create reqwest client")
            .get(format!("{}{}", self.address, path))
    }

    /// Register an account through the API and return the response body.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "confirm_password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in through the API and return the response body.
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Seed an admin account directly through the service.
    pub async fn seed_admin(&self, email: &str, password: &str) -> User {
        let command = RegisterCommand::new(
            DisplayName::new("Admin".to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        );
        self.user_service
            .ensure_admin(command)
            .await
            .expect("Failed to seed admin")
    }
}
