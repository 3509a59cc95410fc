// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models shared with the tracker API and the host UI.

pub mod daily_log;
pub mod stats;

pub use daily_log::{DailyLog, DayStatus, Exercise, ExerciseInput, ValidationRejected};
pub use stats::Stats;
