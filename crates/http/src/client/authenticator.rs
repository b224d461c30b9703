//! Token refresh and logout calls

use super::ClientError;
use crate::types::RefreshResponse;
use reqwest::{Client, Method};
use tracing::{debug, warn};

/// Talks to the backend's token endpoints
///
/// The refresh credential is an httpOnly cookie held by the shared
/// [`reqwest::Client`] cookie store, so refresh sends no body.
#[derive(Clone, Debug)]
pub struct SessionAuthenticator {
    client: Client,
    base_url: String,
}

impl SessionAuthenticator {
    pub(crate) fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Whether a stored token needs refreshing before use
    pub fn is_expired(&self, token: &str) -> bool {
        tinyyummy_core::is_expired(token)
    }

    /// Exchange the refresh cookie for a new access token
    pub async fn refresh(&self) -> Result<String, ClientError> {
        let url = format!("{}/auth/refresh-token", self.base_url);
        let response = self.client.request(Method::POST, url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::from_status(status, message));
        }

        let body: RefreshResponse = response.json().await?;
        if body.access_token.is_empty() {
            return Err(ClientError::AuthenticationFailed(
                "refresh returned an empty access token".into(),
            ));
        }
        debug!("Access token refreshed");
        Ok(body.access_token)
    }

    /// Tell the backend to drop the refresh cookie
    ///
    /// Best effort: failures are logged and otherwise ignored. Clearing the
    /// local session is up to the caller.
    pub async fn logout(&self, access_token: Option<&str>) {
        let url = format!("{}/auth/logout", self.base_url);
        let mut request = self.client.request(Method::POST, url);
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => debug!("Backend logout succeeded"),
            Ok(response) => warn!(status = %response.status(), "Backend logout was rejected"),
            Err(e) => warn!("Backend logout failed: {e}"),
        }
    }
}
