//! Shared helpers: an in-process mock backend and client construction
//!
//! Tests bind an axum router to an ephemeral port and point the real
//! client at it, so the whole stack (reqwest, decoration, normalization,
//! session persistence) is exercised over real HTTP.
#![allow(dead_code)]

use axum::Router;
use crowdax::auth::AuthService;
use crowdax::{ApiClient, Config, SessionStore};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral port, returning the base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config
}

/// Client with an in-memory session store
pub fn client(base_url: &str) -> ApiClient {
    client_with_store(base_url, SessionStore::in_memory())
}

pub fn client_with_store(base_url: &str, store: SessionStore) -> ApiClient {
    ApiClient::new(&test_config(base_url), store).unwrap()
}

/// Auth service with an in-memory session store
pub fn service(base_url: &str) -> AuthService {
    AuthService::new(client(base_url))
}

pub fn service_with_store(base_url: &str, store: SessionStore) -> AuthService {
    AuthService::new(client_with_store(base_url, store))
}

/// Backend user in snake_case form
pub fn snake_user() -> Value {
    json!({
        "id": 1,
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "role": "entrepreneur",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z",
        "company_name": "Analytical Engines",
        "phone_number": "+1234567890"
    })
}

/// The same account as the backend sometimes serializes it: camelCase
pub fn camel_user() -> Value {
    json!({
        "id": 1,
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "role": "entrepreneur",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T00:00:00Z",
        "companyName": "Analytical Engines",
        "phone": "+1234567890"
    })
}

/// Wrap a user in the `{ status, data: { user, token } }` auth envelope
pub fn auth_envelope(user: Value, token: &str) -> Value {
    json!({
        "status": { "code": 200, "message": "Signed in successfully." },
        "data": { "user": user, "token": token }
    })
}

pub fn auth_envelope_with_refresh(user: Value, token: &str, refresh: &str) -> Value {
    json!({
        "status": { "code": 200, "message": "Signed in successfully." },
        "data": { "user": user, "token": token, "refresh_token": refresh }
    })
}
