// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gym-Tracker: daily workout and nutrition habit tracking
//!
//! This crate is the client-side engine of the tracker: a date-keyed cache of
//! daily logs, calendar navigation, per-day editing sessions with debounced
//! autosave, and the gateway to the tracker REST API that owns the data.

pub mod config;
pub mod date_key;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use config::Config;
use services::{StatsBoard, SyncGateway};
use std::sync::Arc;
use store::LogStore;

/// Shared tracker state.
pub struct Tracker {
    pub config: Config,
    pub gateway: Arc<dyn SyncGateway>,
    pub store: LogStore,
    pub stats: StatsBoard,
}

impl Tracker {
    /// Fresh state with an empty store and zeroed stats.
    pub fn new(config: Config, gateway: Arc<dyn SyncGateway>) -> Self {
        Self {
            config,
            gateway,
            store: LogStore::new(),
            stats: StatsBoard::new(),
        }
    }
}
