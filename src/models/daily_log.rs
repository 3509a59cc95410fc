// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily log record and its exercise entries.

use crate::date_key::DateKey;
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One record per calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyLog {
    /// Identity key (never changes once created)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateKey,
    #[serde(default)]
    pub workout_completed: bool,
    #[serde(default)]
    pub nutrition_completed: bool,
    /// Free text; the API may send `null`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    /// Insertion order is display order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub exercises: Vec<Exercise>,
}

impl DailyLog {
    /// Empty log for a date with nothing recorded yet.
    pub fn empty(date: DateKey) -> Self {
        Self {
            date,
            workout_completed: false,
            nutrition_completed: false,
            notes: String::new(),
            exercises: Vec::new(),
        }
    }

    pub fn status(&self) -> DayStatus {
        match (self.workout_completed, self.nutrition_completed) {
            (true, true) => DayStatus::Complete,
            (true, false) | (false, true) => DayStatus::Partial,
            (false, false) => DayStatus::None,
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Calendar classification of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DayStatus {
    None,
    Partial,
    Complete,
}

impl DayStatus {
    /// Status for a date given its log, if any.
    pub fn of(log: Option<&DailyLog>) -> Self {
        log.map_or(DayStatus::None, DailyLog::status)
    }

    /// Legend text shown under the calendar.
    pub fn legend(&self) -> &'static str {
        match self {
            DayStatus::Complete => "Completo",
            DayStatus::Partial => "Parcial",
            DayStatus::None => "Sin datos",
        }
    }
}

/// A logged exercise. Identified only by its position in the parent log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    /// Kilograms
    #[serde(default)]
    pub weight: f64,
}

impl Exercise {
    /// `3x10 @ 40.5kg`
    pub fn summary(&self) -> String {
        format!("{}x{} @ {}kg", self.sets, self.reps, self.weight)
    }
}

/// Raw exercise form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseInput {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub weight: String,
}

/// Input rejected before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationRejected {
    #[error("Exercise name is empty")]
    EmptyExerciseName,
}

impl ExerciseInput {
    pub fn new(
        name: impl Into<String>,
        sets: impl Into<String>,
        reps: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sets: sets.into(),
            reps: reps.into(),
            weight: weight.into(),
        }
    }

    /// Trim the name and parse the numeric fields leniently (0 when unparseable).
    pub fn validate(&self) -> Result<Exercise, ValidationRejected> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationRejected::EmptyExerciseName);
        }
        Ok(Exercise {
            name: name.to_string(),
            sets: parse_count(&self.sets),
            reps: parse_count(&self.reps),
            weight: parse_weight(&self.weight),
        })
    }
}

/// Leading decimal digits of the field, so `"10 reps"` reads as 10.
fn parse_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let digits: &str = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().unwrap_or(0)
}

fn parse_weight(raw: &str) -> f64 {
    let trimmed = raw.trim().replace(',', ".");
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}
