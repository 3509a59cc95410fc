//! Aggregate streak/total statistics.
//!
//! These are computed by the backend and only mirrored here; nothing in this
//! crate derives them from local logs.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Server-computed statistics snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Stats {
    /// Consecutive days with the workout done, counting back from today
    #[serde(default)]
    pub workout_streak: u32,
    /// Consecutive days with the nutrition plan done
    #[serde(default)]
    pub nutrition_streak: u32,
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub total_nutrition: u32,
    /// Days with any log at all
    #[serde(default)]
    pub total_days: u32,
}

impl Stats {
    /// Tiles in display order: (label, value).
    pub fn tiles(&self) -> [(&'static str, u32); 4] {
        [
            ("Racha Rutina", self.workout_streak),
            ("Racha Dieta", self.nutrition_streak),
            ("Total Rutinas", self.total_workouts),
            ("Total Dietas", self.total_nutrition),
        ]
    }
}
