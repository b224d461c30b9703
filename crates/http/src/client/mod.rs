//! TinyYummy API client
//!
//! [`ApiClient`] is the single entry point for backend calls. Before each
//! request it reads the access token from the [`TokenStore`]:
//!
//! - no token: the request goes out unauthenticated;
//! - valid token: it is attached as `Authorization: Bearer <token>`;
//! - expired token: it is refreshed first. Refreshes are single-flight, so
//!   concurrent requests that see the same expired token share one refresh.
//!
//! When a refresh fails the stored session is cleared, an
//! [`AuthEvent::SessionTerminated`] is published and the request fails with
//! [`ClientError::SessionExpired`]. Navigation is left to whoever listens for
//! the event (see [`SessionSupervisor`]).

pub mod authenticator;
pub mod config;
pub mod error;
pub mod supervisor;

pub use authenticator::SessionAuthenticator;
pub use config::ClientConfig;
pub use error::ClientError;
pub use supervisor::{AuthEvent, Navigator, SessionSupervisor};

use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tinyyummy_core::{StorageArea, StorageKey, TokenStore};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, warn};

const AUTH_EVENT_CAPACITY: usize = 16;

/// Authenticated client for the TinyYummy backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: TokenStore,
    authenticator: SessionAuthenticator,
    refresh_lock: Arc<Mutex<()>>,
    events: broadcast::Sender<AuthEvent>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with default settings over the given store
    pub fn new(base_url: impl Into<String>, store: TokenStore) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).store(store).build()
    }

    /// Create a client from configuration
    pub fn from_config(config: &ClientConfig, store: TokenStore) -> Result<Self, ClientError> {
        config.validate()?;
        let mut builder = Self::builder()
            .base_url(config.base_url.clone())
            .user_agent(config.user_agent.clone())
            .store(store);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn authenticator(&self) -> &SessionAuthenticator {
        &self.authenticator
    }

    /// Receive session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// Create a request builder for `path` under the base URL
    ///
    /// Authentication is added by [`Self::execute`], not here.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request with the stored session and decode the JSON body
    ///
    /// An empty body decodes as JSON `null`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let request = match self.valid_token().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        Self::decode(Self::send(request).await?).await
    }

    /// Execute a request without looking at the stored session
    ///
    /// Used for the sign-in endpoints, which must not trigger a refresh.
    pub async fn execute_public<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        Self::decode(Self::send(request).await?).await
    }

    async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let body = response.bytes().await?;
        if body.is_empty() {
            Ok(serde_json::from_value(serde_json::Value::Null)?)
        } else {
            Ok(serde_json::from_slice(&body)?)
        }
    }

    /// Stored token, refreshed if it has expired
    async fn valid_token(&self) -> Result<Option<String>, ClientError> {
        let Some(token) = self.store.access_token() else {
            return Ok(None);
        };
        if !self.authenticator.is_expired(&token) {
            return Ok(Some(token));
        }
        self.refresh_expired(&token).await.map(Some)
    }

    async fn refresh_expired(&self, stale: &str) -> Result<String, ClientError> {
        let _guard = self.refresh_lock.lock().await;

        // Whoever held the lock before us may already have settled this
        match self.store.access_token() {
            None => {
                return Err(ClientError::SessionExpired(
                    "session was cleared while waiting for refresh".into(),
                ));
            }
            Some(current) if current != stale && !self.authenticator.is_expired(&current) => {
                debug!("Using token refreshed by a concurrent request");
                return Ok(current);
            }
            Some(_) => {}
        }

        let area = self
            .store
            .area_of(StorageKey::AccessToken)
            .unwrap_or(StorageArea::Session);
        debug!(durable = area.is_durable(), "Access token expired, refreshing");

        match self.authenticator.refresh().await {
            Ok(token) => {
                self.store
                    .write(StorageKey::AccessToken, &token, area.is_durable())?;
                Ok(token)
            }
            Err(e) => {
                warn!("Token refresh failed: {e}");
                let reason = e.to_string();
                self.terminate_session(&reason);
                Err(ClientError::SessionExpired(reason))
            }
        }
    }

    fn terminate_session(&self, reason: &str) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear session storage: {e}");
        }
        // No subscriber is fine: nothing to redirect
        let _ = self.events.send(AuthEvent::SessionTerminated {
            reason: reason.to_string(),
        });
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    store: Option<TokenStore>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Session storage to read tokens from; defaults to an in-memory store
    pub fn store(mut self, store: TokenStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new().cookie_store(true);

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| ClientConfig::default().user_agent);
        client_builder = client_builder.user_agent(user_agent);

        let client = client_builder.build()?;
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);

        Ok(ApiClient {
            authenticator: SessionAuthenticator::new(client.clone(), base_url.clone()),
            client,
            base_url,
            store: self.store.unwrap_or_else(TokenStore::in_memory),
            refresh_lock: Arc::new(Mutex::new(())),
            events,
        })
    }
}
