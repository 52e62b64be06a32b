//! Test helpers for Web API integration tests.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use retromail::config::ProvisionConfig;
use retromail::web::handlers::AppState;
use retromail::web::middleware::{JwtState, ProviderClaims};
use retromail::web::router::{create_health_router, create_router};
use retromail::Database;

/// Secret shared between token minting and verification in tests.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<Database>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let shared_db = Arc::new(db);

    let app_state = Arc::new(AppState::new(
        shared_db.clone(),
        ProvisionConfig::default(),
    ));
    let jwt_state = Arc::new(JwtState::new(TEST_SECRET));

    let router = create_router(app_state, jwt_state, &[]).merge(create_health_router());

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, shared_db)
}

/// Mint a provider token for the given subject.
pub fn provider_token(subject: &str, email: Option<&str>, name: Option<&str>) -> String {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = ProviderClaims {
        sub: subject.to_string(),
        email: email.map(str::to_string),
        name: name.map(str::to_string),
        iat: now,
        exp: now + 3600,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}

/// Register an address for a token's subject and return the response body.
pub async fn register(server: &TestServer, token: &str, username: &str, domain: &str) -> Value {
    let response = server
        .post("/api/users")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&json!({
            "username": username,
            "domain": domain,
        }))
        .await;

    response.json::<Value>()
}
