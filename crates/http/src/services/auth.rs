//! Sign-in, registration and sign-out

use crate::client::{ApiClient, ClientError};
use crate::types::{
    AuthResponse, GoogleAuthRequest, LoginRequest, RegisterRequest, SendOtpRequest,
    VerifyOtpRequest,
};
use reqwest::Method;
use serde_json::Value;
use tinyyummy_core::Session;
use tracing::info;

/// Authentication API service
#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Sign in with email and password and persist the session
    pub async fn login(
        &self,
        credentials: &LoginRequest,
        remember_me: bool,
    ) -> Result<Session, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/auth/login")
            .json(credentials);
        let response: AuthResponse = self.client.execute_public(request).await?;
        self.start_session(response, &credentials.email, remember_me)
    }

    /// Sign in with a Google ID token and persist the session
    pub async fn google_auth(
        &self,
        id_token: impl Into<String>,
        remember_me: bool,
    ) -> Result<Session, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/auth/google-auth")
            .json(&GoogleAuthRequest {
                token: id_token.into(),
            });
        let response: AuthResponse = self.client.execute_public(request).await?;
        self.start_session(response, "", remember_me)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/auth/register")
            .json(request);
        self.client.execute_public(request).await
    }

    pub async fn send_otp(&self, email: impl Into<String>) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/auth/send-otp")
            .json(&SendOtpRequest {
                email: email.into(),
            });
        self.client.execute_public(request).await
    }

    pub async fn verify_otp(
        &self,
        email: impl Into<String>,
        otp: impl Into<String>,
    ) -> Result<Value, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/auth/verify-otp")
            .json(&VerifyOtpRequest {
                email: email.into(),
                otp: otp.into(),
            });
        self.client.execute_public(request).await
    }

    /// Sign out on the backend (best effort) and drop the local session
    pub async fn logout(&self) -> Result<(), ClientError> {
        let token = self.client.store().access_token();
        self.client.authenticator().logout(token.as_deref()).await;
        self.client.store().clear()?;
        info!("Signed out");
        Ok(())
    }

    fn start_session(
        &self,
        response: AuthResponse,
        fallback_email: &str,
        remember_me: bool,
    ) -> Result<Session, ClientError> {
        let session = response.into_session(fallback_email, remember_me);
        self.client.store().save_session(&session)?;
        info!(role = %session.role, remember_me, "Signed in");
        Ok(session)
    }
}
