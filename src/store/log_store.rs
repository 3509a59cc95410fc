// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory collection of daily logs keyed by date.
//!
//! The store only ever holds server-confirmed records: bulk fetches are merged
//! in with [`LogStore::ingest`], and editing sessions write through
//! [`LogStore::upsert`] / [`LogStore::remove`] after the backend accepted the
//! change. Cloning a `LogStore` yields another handle onto the same map, so a
//! session can keep writing after its owner moved on.

use crate::date_key::DateKey;
use crate::models::{DailyLog, DayStatus};
use dashmap::DashMap;
use std::sync::Arc;

/// Shared keyed collection of [`DailyLog`] entries (at most one per date).
#[derive(Clone, Default)]
pub struct LogStore {
    entries: Arc<DashMap<DateKey, DailyLog>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fetched batch, last write wins per date.
    ///
    /// Dates outside the batch are left alone, so a partial-range fetch never
    /// evicts entries that were already known.
    pub fn ingest<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = DailyLog>,
    {
        let mut count = 0;
        for entry in entries {
            self.entries.insert(entry.date, entry);
            count += 1;
        }
        tracing::debug!(count, total = self.entries.len(), "Ingested daily logs");
        count
    }

    /// Insert or replace the entry at its date.
    pub fn upsert(&self, entry: DailyLog) {
        tracing::debug!(date = %entry.date, status = ?entry.status(), "Upserting daily log");
        self.entries.insert(entry.date, entry);
    }

    /// Remove the entry for a date. Absent keys are a no-op.
    pub fn remove(&self, date: &DateKey) -> Option<DailyLog> {
        let removed = self.entries.remove(date).map(|(_, entry)| entry);
        if removed.is_some() {
            tracing::debug!(date = %date, "Removed daily log");
        }
        removed
    }

    pub fn get(&self, date: &DateKey) -> Option<DailyLog> {
        self.entries.get(date).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, date: &DateKey) -> bool {
        self.entries.contains_key(date)
    }

    /// Entries with `start <= date <= end`, ascending by date.
    pub fn range(&self, start: &DateKey, end: &DateKey) -> Vec<DailyLog> {
        let mut logs: Vec<DailyLog> = self
            .entries
            .iter()
            .filter(|entry| entry.key() >= start && entry.key() <= end)
            .map(|entry| entry.value().clone())
            .collect();
        logs.sort_by_key(|log| log.date);
        logs
    }

    /// Most recent entries first, skipping `excluding` (usually today).
    pub fn recent(&self, limit: usize, excluding: Option<&DateKey>) -> Vec<DailyLog> {
        let mut logs: Vec<DailyLog> = self
            .entries
            .iter()
            .filter(|entry| Some(entry.key()) != excluding)
            .map(|entry| entry.value().clone())
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs.truncate(limit);
        logs
    }

    /// Calendar status for a date.
    pub fn status(&self, date: &DateKey) -> DayStatus {
        self.entries
            .get(date)
            .map_or(DayStatus::None, |entry| entry.status())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
