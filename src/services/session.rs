// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer credential source for the tracker API.
//!
//! The OAuth flow itself lives outside this crate. A [`SessionProvider`] only
//! answers "what is the current access token, if any". Startup awaits
//! [`wait_for_credential`] once; later calls read the provider directly.

use crate::error::{Result, TrackerError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;

/// Supplies the bearer token for API calls.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current access token, `None` when signed out or not ready yet.
    async fn access_token(&self) -> Option<String>;
}

/// In-memory session whose token is set by the host after sign-in.
#[derive(Default)]
pub struct StaticSession {
    token: RwLock<Option<String>>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token.filter(|t| !t.is_empty())),
        }
    }

    /// Session seeded from `TRACKER_ACCESS_TOKEN` (via [`crate::config::Config`]).
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.access_token.clone())
    }

    pub async fn sign_in(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        tracing::info!("Session credential set");
    }

    pub async fn sign_out(&self) {
        *self.token.write().await = None;
        tracing::info!("Session credential cleared");
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn access_token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

/// Poll the provider until it yields a token or the attempt budget runs out.
///
/// Returns [`TrackerError::AuthUnavailable`] when no credential showed up; the
/// host should treat that as "go to the sign-in screen".
pub async fn wait_for_credential(
    provider: &dyn SessionProvider,
    poll_interval: Duration,
    max_attempts: u32,
) -> Result<String> {
    let attempts = max_attempts.max(1);
    for attempt in 1..=attempts {
        if let Some(token) = provider.access_token().await {
            tracing::debug!(attempt, "Session credential ready");
            return Ok(token);
        }
        if attempt < attempts {
            tokio::time::sleep(poll_interval).await;
        }
    }
    tracing::warn!(attempts, "No session credential after readiness budget");
    Err(TrackerError::AuthUnavailable)
}
