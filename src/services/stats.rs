// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Last-known server statistics.

use crate::models::Stats;
use crate::services::gateway::SyncGateway;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Default)]
struct BoardState {
    stats: Stats,
    loaded: bool,
    last_error: Option<String>,
}

/// Shared holder for the stats snapshot.
///
/// Starts at all zeros. A failed refresh keeps the previous snapshot and only
/// records the error, so stats problems never block the rest of the UI.
#[derive(Clone, Default)]
pub struct StatsBoard {
    inner: Arc<RwLock<BoardState>>,
}

impl StatsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch fresh stats. Returns `true` if the snapshot was replaced.
    pub async fn refresh(&self, gateway: &dyn SyncGateway) -> bool {
        match gateway.fetch_stats().await {
            Ok(stats) => {
                tracing::debug!(
                    workout_streak = stats.workout_streak,
                    nutrition_streak = stats.nutrition_streak,
                    "Stats refreshed"
                );
                let mut state = self.inner.write();
                state.stats = stats;
                state.loaded = true;
                state.last_error = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to refresh stats, keeping last snapshot");
                self.inner.write().last_error = Some(e.to_string());
                false
            }
        }
    }

    pub fn snapshot(&self) -> Stats {
        self.inner.read().stats.clone()
    }

    /// True once any refresh has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.inner.read().loaded
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.read().last_error.clone()
    }
}
