//! Reaction to unrecoverable authentication failures
//!
//! The transport layer discards the stored session and reports that it ended.
//! A single [`SessionSupervisor`], owned by the application shell, turns those
//! reports into one delayed redirect to the login page.

use std::time::Duration;
use tinyyummy_core::{LOGIN_ROUTE, TokenStore};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Session lifecycle notifications published by [`super::ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Refresh failed; the stored session has been discarded
    SessionTerminated { reason: String },
}

/// Where the application sends the user
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, route: &str) {
        self(route);
    }
}

pub struct SessionSupervisor<N> {
    store: TokenStore,
    navigator: N,
    redirect_delay: Duration,
}

impl<N: Navigator + 'static> SessionSupervisor<N> {
    pub fn new(store: TokenStore, navigator: N, redirect_delay: Duration) -> Self {
        Self {
            store,
            navigator,
            redirect_delay,
        }
    }

    /// Handle events until every sender is gone
    pub async fn run(self, mut events: broadcast::Receiver<AuthEvent>) {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed auth events");
                    AuthEvent::SessionTerminated {
                        reason: "missed auth events".into(),
                    }
                }
                Err(RecvError::Closed) => break,
            };
            self.sign_out(event, &mut events).await;
        }
    }

    /// Run on the current tokio runtime
    pub fn spawn(self, events: broadcast::Receiver<AuthEvent>) -> JoinHandle<()> {
        tokio::spawn(self.run(events))
    }

    async fn sign_out(&self, event: AuthEvent, events: &mut broadcast::Receiver<AuthEvent>) {
        let AuthEvent::SessionTerminated { reason } = event;
        info!(%reason, "Session ended, redirecting to login");
        let token_at_failure = self.store.access_token();

        // Leave the failing request's error on screen for a moment
        tokio::time::sleep(self.redirect_delay).await;

        // Requests that failed in the same window share this redirect
        loop {
            match events.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        // A sign-in during the delay owns the store now
        if self.store.access_token() != token_at_failure {
            info!("New session started during sign-out, skipping redirect");
            return;
        }
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear session storage: {e}");
        }
        self.navigator.navigate(LOGIN_ROUTE);
    }
}
