//! Sign-in and sign-out flows

mod common;

use common::{client_with_token, expired_token, fresh_token, init_tracing, received_paths};
use serde_json::json;
use tinyyummy_core::{AdminGuard, Guard, Role, StorageArea, StorageKey, TokenStore, UserOnlyGuard};
use tinyyummy_http::services::AuthService;
use tinyyummy_http::types::{LoginRequest, RegisterRequest};
use tinyyummy_http::{ApiClient, ClientError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "a@b.com".into(),
        password: "x".into(),
    }
}

async fn mount_login(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "x"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": "T1", "role": role})),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_with_remember_me_uses_durable_area() {
    let server = MockServer::start().await;
    mount_login(&server, "user").await;

    let client = client_with_token(&server, None, false);
    let store = client.store().clone();
    let session = AuthService::new(client)
        .login(&credentials(), true)
        .await
        .unwrap();

    assert_eq!(session.role, Role::User);
    assert_eq!(
        store.read_area(StorageArea::Durable, StorageKey::AccessToken).as_deref(),
        Some("T1")
    );
    assert_eq!(store.read_area(StorageArea::Session, StorageKey::AccessToken), None);
    assert_eq!(store.read(StorageKey::UserEmail).as_deref(), Some("a@b.com"));
    assert_eq!(store.read(StorageKey::UserRole).as_deref(), Some("user"));
}

#[tokio::test]
async fn test_login_without_remember_me_uses_session_area() {
    let server = MockServer::start().await;
    mount_login(&server, "admin").await;

    let client = client_with_token(&server, None, false);
    let store = client.store().clone();
    AuthService::new(client)
        .login(&credentials(), false)
        .await
        .unwrap();

    assert_eq!(store.read_area(StorageArea::Durable, StorageKey::AccessToken), None);
    assert_eq!(
        store.read_area(StorageArea::Session, StorageKey::AccessToken).as_deref(),
        Some("T1")
    );
    assert!(AdminGuard.check_store(&store).allows());
    assert!(!UserOnlyGuard.check_store(&store).allows());
}

#[tokio::test]
async fn test_login_replaces_previous_session() {
    let server = MockServer::start().await;
    mount_login(&server, "user").await;

    // A stale admin session from an earlier "remember me" login
    let client = client_with_token(&server, Some(&expired_token("old-admin")), true);
    let store = client.store().clone();
    store.write(StorageKey::UserRole, "admin", true).unwrap();

    AuthService::new(client)
        .login(&credentials(), false)
        .await
        .unwrap();

    assert_eq!(store.access_token().as_deref(), Some("T1"));
    assert_eq!(store.read_area(StorageArea::Durable, StorageKey::UserRole), None);
    // Signing in never goes through the refresh path
    assert_eq!(received_paths(&server).await, ["POST /auth/login"]);
}

#[tokio::test]
async fn test_rejected_login_leaves_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let client = client_with_token(&server, None, false);
    let store = client.store().clone();
    let err = AuthService::new(client)
        .login(&credentials(), true)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AuthenticationFailed(_)));
    assert!(!store.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_google_auth_starts_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/google-auth"))
        .and(body_json(json!({"token": "google-id-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "G1",
            "role": "user",
            "name": "Mai",
            "email": "mai@gmail.com"
        })))
        .mount(&server)
        .await;

    let client = client_with_token(&server, None, false);
    let store = client.store().clone();
    let session = AuthService::new(client)
        .google_auth("google-id-token", true)
        .await
        .unwrap();

    assert_eq!(session.email, "mai@gmail.com");
    let snapshot = store.snapshot();
    assert_eq!(snapshot.access_token.as_deref(), Some("G1"));
    assert_eq!(snapshot.name.as_deref(), Some("Mai"));
}

#[tokio::test]
async fn test_registration_and_otp_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/send-otp"))
        .and(body_json(json!({"email": "new@b.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "sent"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/verify-otp"))
        .and(body_json(json!({"email": "new@b.com", "otp": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"verified": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "name": "New",
            "email": "new@b.com",
            "password": "secret",
            "otp": "123456"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "u-9"})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthService::new(client_with_token(&server, None, false));
    auth.send_otp("new@b.com").await.unwrap();
    let verified = auth.verify_otp("new@b.com", "123456").await.unwrap();
    assert_eq!(verified["verified"], json!(true));

    let created = auth
        .register(&RegisterRequest {
            name: "New".into(),
            email: "new@b.com".into(),
            password: "secret".into(),
            otp: Some("123456".into()),
        })
        .await
        .unwrap();
    assert_eq!(created["id"], json!("u-9"));
}

#[tokio::test]
async fn test_logout_clears_both_areas() {
    let server = MockServer::start().await;
    let token = fresh_token("user-1");
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, Some(&token), true);
    let store = client.store().clone();
    store.write(StorageKey::HasReviewed, "true", false).unwrap();

    AuthService::new(client).logout().await.unwrap();

    for key in StorageKey::ALL {
        assert_eq!(store.read(key), None);
    }
}

#[tokio::test]
async fn test_logout_survives_backend_failure() {
    init_tracing();
    // Nothing listens on this port, so the backend call fails outright
    let store = TokenStore::in_memory();
    store.write(StorageKey::AccessToken, "T1", true).unwrap();
    let client = ApiClient::builder()
        .base_url("http://127.0.0.1:9")
        .store(store.clone())
        .build()
        .unwrap();

    AuthService::new(client).logout().await.unwrap();
    assert_eq!(store.access_token(), None);
}
