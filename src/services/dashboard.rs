// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard screen state: calendar, stats, history and day sessions.

use crate::date_key::DateKey;
use crate::error::Result;
use crate::models::{DailyLog, DayStatus, Stats};
use crate::services::calendar::{CalendarCell, CalendarCursor, Direction, ViewMode};
use crate::services::day_session::DayEditSession;
use crate::store::LogStore;
use crate::Tracker;
use serde::Serialize;
use std::sync::Arc;

/// One row of the recent-days list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem {
    /// `Hoy`, `Ayer` or a short date
    pub label: String,
    pub status: DayStatus,
    pub log: DailyLog,
}

/// Owns the calendar cursor and hands out day sessions wired to shared state.
pub struct Dashboard {
    tracker: Arc<Tracker>,
    calendar: CalendarCursor,
}

impl Dashboard {
    pub fn new(tracker: Arc<Tracker>, calendar: CalendarCursor) -> Self {
        Self { tracker, calendar }
    }

    pub fn tracker(&self) -> &Arc<Tracker> {
        &self.tracker
    }

    pub fn store(&self) -> &LogStore {
        &self.tracker.store
    }

    pub fn calendar(&self) -> &CalendarCursor {
        &self.calendar
    }

    /// Fetch every log and the stats concurrently.
    ///
    /// A stats failure only leaves the previous snapshot in place; a logs
    /// failure is returned. Returns the number of logs ingested.
    pub async fn load(&self) -> Result<usize> {
        self.load_between(None, None).await
    }

    /// Like [`Dashboard::load`] but only for `[start, end]`.
    pub async fn load_range(&self, start: DateKey, end: DateKey) -> Result<usize> {
        self.load_between(Some(start), Some(end)).await
    }

    /// Fetch whatever the calendar is currently showing.
    pub async fn load_visible(&self) -> Result<usize> {
        let (start, end) = self.calendar.visible_bounds();
        self.load_range(start, end).await
    }

    async fn load_between(&self, start: Option<DateKey>, end: Option<DateKey>) -> Result<usize> {
        let gateway = self.tracker.gateway.as_ref();
        let (logs, _) = tokio::join!(
            gateway.fetch_range(start, end),
            self.tracker.stats.refresh(gateway)
        );
        let logs = logs?;
        let count = self.tracker.store.ingest(logs);
        tracing::info!(count, total = self.tracker.store.len(), "Dashboard loaded");
        Ok(count)
    }

    pub fn stats(&self) -> Stats {
        self.tracker.stats.snapshot()
    }

    /// Re-fetch stats; failures keep the last snapshot.
    pub async fn refresh_stats(&self) -> bool {
        self.tracker.stats.refresh(self.tracker.gateway.as_ref()).await
    }

    pub fn cells(&self, today: DateKey) -> Vec<CalendarCell> {
        self.calendar.cells(&self.tracker.store, today)
    }

    pub fn navigate(&mut self, direction: Direction) {
        self.calendar.navigate(direction);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.calendar.set_view_mode(mode);
    }

    /// Open an editing session seeded from the store.
    pub fn open_day(&self, date: DateKey) -> DayEditSession {
        DayEditSession::open(
            self.calendar.select(date),
            self.tracker.store.get(&date),
            self.tracker.gateway.clone(),
            self.tracker.store.clone(),
            self.tracker.config.autosave_debounce,
        )
        .with_stats(self.tracker.stats.clone())
    }

    /// Fetch today's log and open a session on it.
    pub async fn today_session(&self, today: DateKey) -> Result<DayEditSession> {
        let logs = self
            .tracker
            .gateway
            .fetch_range(Some(today), Some(today))
            .await?;
        self.tracker.store.ingest(logs);
        Ok(self.open_day(today))
    }

    /// Close a session, saving an armed notes autosave first if configured to.
    pub async fn close_day(&self, session: &mut DayEditSession) -> Result<()> {
        let flushed = if self.tracker.config.flush_on_close {
            session.flush().await
        } else {
            Ok(None)
        };
        session.close();
        flushed.map(|_| ())
    }

    /// Recent days, newest first, excluding `today`.
    pub fn history(&self, today: DateKey) -> Vec<HistoryItem> {
        self.tracker
            .store
            .recent(self.tracker.config.history_limit, Some(&today))
            .into_iter()
            .map(|log| HistoryItem {
                label: log.date.label_relative_to(today),
                status: log.status(),
                log,
            })
            .collect()
    }
}
