//! Shared helpers for the client integration tests

#![allow(dead_code)]

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use tinyyummy_core::{StorageKey, TokenStore};
use tinyyummy_http::ApiClient;
use wiremock::MockServer;

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    exp: i64,
    iat: i64,
}

/// Signed JWT whose `exp` is `offset` away from now
pub fn token_expiring_in(subject: &str, offset: Duration) -> String {
    let now = Utc::now();
    encode(
        &Header::default(),
        &Claims {
            sub: subject,
            exp: (now + offset).timestamp(),
            iat: now.timestamp(),
        },
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .unwrap()
}

pub fn fresh_token(subject: &str) -> String {
    token_expiring_in(subject, Duration::minutes(15))
}

pub fn expired_token(subject: &str) -> String {
    token_expiring_in(subject, Duration::seconds(-1))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("tinyyummy_http=debug,tinyyummy_core=debug")
        .try_init();
}

/// Client against `server` with `token` stored in the chosen area
pub fn client_with_token(server: &MockServer, token: Option<&str>, durable: bool) -> ApiClient {
    init_tracing();
    let store = TokenStore::in_memory();
    if let Some(token) = token {
        store
            .write(StorageKey::AccessToken, token, durable)
            .unwrap();
    }
    ApiClient::builder()
        .base_url(server.uri())
        .store(store)
        .build()
        .unwrap()
}

/// Paths of the requests the server saw, in arrival order
pub async fn received_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| format!("{} {}", request.method, request.url.path()))
        .collect()
}
