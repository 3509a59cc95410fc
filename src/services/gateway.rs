// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend boundary for daily logs and stats.
//!
//! [`SyncGateway`] is the narrow contract the store and editing sessions depend
//! on. [`HttpGateway`] implements it over the tracker REST API:
//! - `GET    {base}/logs?start_date=&end_date=` -> `{"logs": [...]}`
//! - `POST   {base}/logs`                       -> `{"log": {...}}`
//! - `DELETE {base}/logs/{date}`
//! - `GET    {base}/stats`                      -> stats object
//!
//! Every request carries `Authorization: Bearer <token>` from the session provider.

use crate::config::Config;
use crate::date_key::DateKey;
use crate::error::{Result, TrackerError};
use crate::models::{DailyLog, Stats};
use crate::services::session::{wait_for_credential, SessionProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Contract for the remote source of truth.
#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// Logs within `[start, end]`; a missing bound is unbounded.
    async fn fetch_range(
        &self,
        start: Option<DateKey>,
        end: Option<DateKey>,
    ) -> Result<Vec<DailyLog>>;

    /// Create or replace the log for its date. Returns the stored record.
    async fn upsert(&self, entry: &DailyLog) -> Result<DailyLog>;

    /// Delete the log for a date.
    async fn remove(&self, date: DateKey) -> Result<()>;

    async fn fetch_stats(&self) -> Result<Stats>;
}

#[derive(Debug, Deserialize)]
struct LogsResponse {
    #[serde(default)]
    logs: Vec<DailyLog>,
}

#[derive(Debug, Deserialize)]
struct LogResponse {
    log: Option<DailyLog>,
}

/// Tracker REST API client.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionProvider>,
    connected: AtomicBool,
}

impl HttpGateway {
    /// Wait for the session credential, then return a ready gateway.
    ///
    /// Fails with [`TrackerError::AuthUnavailable`] if the session never yields a
    /// token within the configured readiness budget.
    pub async fn connect(config: &Config, session: Arc<dyn SessionProvider>) -> Result<Self> {
        wait_for_credential(
            session.as_ref(),
            config.auth_poll_interval,
            config.auth_max_attempts,
        )
        .await?;

        tracing::info!(base_url = %config.api_base_url, "Tracker gateway connected");

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            connected: AtomicBool::new(true),
        })
    }

    /// Tear down the gateway. Later calls fail with `AuthUnavailable`.
    pub fn disconnect(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            tracing::info!("Tracker gateway disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn bearer(&self) -> Result<String> {
        if !self.is_connected() {
            return Err(TrackerError::AuthUnavailable);
        }
        self.session
            .access_token()
            .await
            .ok_or(TrackerError::AuthUnavailable)
    }

    /// Check response status and return error if not successful.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 401 {
            tracing::warn!("Tracker API rejected credential (401)");
            return Err(TrackerError::Unauthenticated(body));
        }

        Err(TrackerError::Collaborator {
            status: status.as_u16(),
            body,
        })
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T> {
        Self::check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| TrackerError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl SyncGateway for HttpGateway {
    #[tracing::instrument(skip(self))]
    async fn fetch_range(
        &self,
        start: Option<DateKey>,
        end: Option<DateKey>,
    ) -> Result<Vec<DailyLog>> {
        let token = self.bearer().await?;
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start {
            query.push(("start_date", start.format()));
        }
        if let Some(end) = end {
            query.push(("end_date", end.format()));
        }

        let response = self
            .http
            .get(format!("{}/logs", self.base_url))
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        let body: LogsResponse = Self::check_response_json(response).await?;
        tracing::debug!(count = body.logs.len(), "Fetched daily logs");
        Ok(body.logs)
    }

    #[tracing::instrument(skip(self, entry), fields(date = %entry.date))]
    async fn upsert(&self, entry: &DailyLog) -> Result<DailyLog> {
        let token = self.bearer().await?;
        let response = self
            .http
            .post(format!("{}/logs", self.base_url))
            .bearer_auth(token)
            .json(entry)
            .send()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        let body: LogResponse = Self::check_response_json(response).await?;
        body.log
            .ok_or_else(|| TrackerError::InvalidResponse("upsert returned no log".to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, date: DateKey) -> Result<()> {
        let token = self.bearer().await?;
        let response = self
            .http
            .delete(format!("{}/logs/{}", self.base_url, date))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        Self::check_response(response).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_stats(&self) -> Result<Stats> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/stats", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| TrackerError::Transport(e.to_string()))?;

        Self::check_response_json(response).await
    }
}
