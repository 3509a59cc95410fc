// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use gym_tracker::config::Config;
use gym_tracker::date_key::DateKey;
use gym_tracker::error::{Result, TrackerError};
use gym_tracker::models::{DailyLog, Stats};
use gym_tracker::services::SyncGateway;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Server-side rewrite applied to every upserted record.
pub type Normalizer = Box<dyn Fn(&DailyLog) -> DailyLog + Send + Sync>;

pub const TEST_TOKEN: &str = "test-token";

#[allow(dead_code)]
pub fn key(s: &str) -> DateKey {
    DateKey::parse(s).expect("valid test date")
}

/// In-memory backend that records every write it receives.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingGateway {
    pub server: Mutex<BTreeMap<DateKey, DailyLog>>,
    pub upserts: Mutex<Vec<DailyLog>>,
    pub removes: Mutex<Vec<DateKey>>,
    pub stats: Mutex<Stats>,
    pub stats_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fail_writes: AtomicBool,
    pub fail_stats: AtomicBool,
    pub fail_fetch: AtomicBool,
    /// Simulated latency for upserts
    pub upsert_delay: Mutex<Option<Duration>>,
    /// Simulated latency for stats
    pub stats_delay: Mutex<Option<Duration>>,
    /// When each upsert request arrived
    pub upsert_times: Mutex<Vec<Instant>>,
    normalizer: Mutex<Option<Normalizer>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Backend pre-populated with `logs`.
    pub fn with_logs(logs: Vec<DailyLog>) -> Arc<Self> {
        let gateway = Self::default();
        {
            let mut server = gateway.server.lock();
            for log in logs {
                server.insert(log.date, log);
            }
        }
        Arc::new(gateway)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_upsert_delay(&self, delay: Duration) {
        *self.upsert_delay.lock() = Some(delay);
    }

    pub fn set_stats_delay(&self, delay: Duration) {
        *self.stats_delay.lock() = Some(delay);
    }

    /// Answer upserts with `normalize(request)` instead of an echo.
    pub fn set_normalizer(
        &self,
        normalize: impl Fn(&DailyLog) -> DailyLog + Send + Sync + 'static,
    ) {
        *self.normalizer.lock() = Some(Box::new(normalize));
    }

    pub fn upserted_notes(&self) -> Vec<String> {
        self.upserts.lock().iter().map(|l| l.notes.clone()).collect()
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.lock().len()
    }

    fn boom() -> TrackerError {
        TrackerError::Collaborator {
            status: 500,
            body: "boom".to_string(),
        }
    }
}

#[async_trait]
impl SyncGateway for RecordingGateway {
    async fn fetch_range(
        &self,
        start: Option<DateKey>,
        end: Option<DateKey>,
    ) -> Result<Vec<DailyLog>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::boom());
        }
        Ok(self
            .server
            .lock()
            .values()
            .filter(|log| start.is_none_or(|s| log.date >= s))
            .filter(|log| end.is_none_or(|e| log.date <= e))
            .cloned()
            .collect())
    }

    async fn upsert(&self, entry: &DailyLog) -> Result<DailyLog> {
        self.upserts.lock().push(entry.clone());
        self.upsert_times.lock().push(Instant::now());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.upsert_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::boom());
        }
        let stored = match self.normalizer.lock().as_ref() {
            Some(normalize) => normalize(entry),
            None => entry.clone(),
        };
        self.server.lock().insert(stored.date, stored.clone());
        Ok(stored)
    }

    async fn remove(&self, date: DateKey) -> Result<()> {
        self.removes.lock().push(date);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::boom());
        }
        self.server.lock().remove(&date);
        Ok(())
    }

    async fn fetch_stats(&self) -> Result<Stats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.stats_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(Self::boom());
        }
        Ok(self.stats.lock().clone())
    }
}

/// State behind the fake tracker REST API.
#[derive(Default)]
pub struct FakeApi {
    pub logs: Mutex<BTreeMap<String, Value>>,
    pub stats: Mutex<Value>,
    /// When set, every request answers with this status
    pub force_status: Mutex<Option<StatusCode>>,
    pub last_query: Mutex<HashMap<String, String>>,
}

type ApiState = Arc<FakeApi>;

fn authorize(api: &FakeApi, headers: &HeaderMap) -> std::result::Result<(), Response> {
    let expected = format!("Bearer {TEST_TOKEN}");
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return Err((StatusCode::UNAUTHORIZED, "invalid token").into_response());
    }
    if let Some(status) = *api.force_status.lock() {
        return Err((status, "forced failure").into_response());
    }
    Ok(())
}

async fn list_logs(
    State(api): State<ApiState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&api, &headers) {
        return resp;
    }
    let start = query.get("start_date").cloned();
    let end = query.get("end_date").cloned();
    *api.last_query.lock() = query;

    let logs: Vec<Value> = api
        .logs
        .lock()
        .iter()
        .filter(|(date, _)| start.as_ref().is_none_or(|s| *date >= s))
        .filter(|(date, _)| end.as_ref().is_none_or(|e| *date <= e))
        .map(|(_, log)| log.clone())
        .collect();
    Json(json!({ "logs": logs })).into_response()
}

async fn upsert_log(
    State(api): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&api, &headers) {
        return resp;
    }
    let Some(date) = body.get("date").and_then(Value::as_str).map(str::to_string) else {
        return (StatusCode::BAD_REQUEST, "missing date").into_response();
    };
    api.logs.lock().insert(date, body.clone());
    Json(json!({ "log": body })).into_response()
}

async fn delete_log(
    State(api): State<ApiState>,
    headers: HeaderMap,
    Path(date): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&api, &headers) {
        return resp;
    }
    match api.logs.lock().remove(&date) {
        Some(_) => Json(json!({ "message": "Log deleted" })).into_response(),
        None => (StatusCode::NOT_FOUND, "Log not found").into_response(),
    }
}

async fn get_stats(State(api): State<ApiState>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&api, &headers) {
        return resp;
    }
    Json(api.stats.lock().clone()).into_response()
}

/// Serve the fake API on an ephemeral port. Returns `(base_url, state)`.
#[allow(dead_code)]
pub async fn spawn_fake_api() -> (String, Arc<FakeApi>) {
    let api = Arc::new(FakeApi {
        stats: Mutex::new(json!({
            "workout_streak": 0,
            "nutrition_streak": 0,
            "total_workouts": 0,
            "total_nutrition": 0,
            "total_days": 0
        })),
        ..Default::default()
    });

    let app = Router::new()
        .route("/api/logs", get(list_logs).post(upsert_log))
        .route("/api/logs/{date}", delete(delete_log))
        .route("/api/stats", get(get_stats))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake api");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (format!("http://{addr}/api"), api)
}

/// Config pointing at `base_url` with a fast readiness budget.
#[allow(dead_code)]
pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        access_token: Some(TEST_TOKEN.to_string()),
        auth_poll_interval: Duration::from_millis(10),
        auth_max_attempts: 3,
        ..Config::default()
    }
}
