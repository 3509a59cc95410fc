// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - sync, navigation and editing logic.

pub mod calendar;
pub mod dashboard;
pub mod day_session;
pub mod gateway;
pub mod session;
pub mod stats;

pub use calendar::{CalendarCell, CalendarCursor, Direction, ViewMode, WEEKDAY_HEADERS};
pub use dashboard::{Dashboard, HistoryItem};
pub use day_session::{DayEditSession, DeleteOutcome, SessionStatus};
pub use gateway::{HttpGateway, SyncGateway};
pub use session::{wait_for_credential, SessionProvider, StaticSession};
pub use stats::StatsBoard;
