// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month/week calendar navigation.
//!
//! The cursor only holds a focus date and a view mode. Everything it renders is
//! derived from that state plus the current [`LogStore`] contents, and nothing
//! here writes to the store.

use crate::date_key::DateKey;
use crate::models::DayStatus;
use crate::store::LogStore;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Column headers for a Monday-first grid.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Lun", "Mar", "Mie", "Jue", "Vie", "Sab", "Dom"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn sign(self) -> i32 {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// Everything the UI needs to draw one calendar cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarCell {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateKey,
    pub status: DayStatus,
    pub is_today: bool,
    /// False for leading/trailing days from adjacent months in month view
    pub is_current_period: bool,
    /// Badges for week view
    pub workout_completed: bool,
    pub nutrition_completed: bool,
}

/// Calendar navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCursor {
    focus: DateKey,
    mode: ViewMode,
    /// Day of month to return to after month steps clamp (31 -> 29 -> 31)
    anchor_day: u32,
}

impl CalendarCursor {
    pub fn new(focus: DateKey, mode: ViewMode) -> Self {
        Self {
            focus,
            mode,
            anchor_day: focus.day(),
        }
    }

    /// Month view focused on today.
    pub fn today() -> Self {
        Self::new(DateKey::today(), ViewMode::Month)
    }

    pub fn focus_date(&self) -> DateKey {
        self.focus
    }

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    /// First and last visible dates (inclusive).
    pub fn visible_bounds(&self) -> (DateKey, DateKey) {
        match self.mode {
            ViewMode::Month => (
                self.focus.start_of_month().start_of_week(),
                self.focus.end_of_month().end_of_week(),
            ),
            ViewMode::Week => (self.focus.start_of_week(), self.focus.end_of_week()),
        }
    }

    /// Every visible date in order. Month view always has whole weeks.
    pub fn visible_range(&self) -> Vec<DateKey> {
        let (start, end) = self.visible_bounds();
        let mut days = Vec::with_capacity(42);
        let mut day = start;
        while day <= end {
            days.push(day);
            day = day.add_days(1);
        }
        days
    }

    pub fn status_for(&self, store: &LogStore, date: &DateKey) -> DayStatus {
        store.status(date)
    }

    /// Render data for every visible date.
    pub fn cells(&self, store: &LogStore, today: DateKey) -> Vec<CalendarCell> {
        self.visible_range()
            .into_iter()
            .map(|date| {
                let log = store.get(&date);
                CalendarCell {
                    date,
                    status: DayStatus::of(log.as_ref()),
                    is_today: date == today,
                    is_current_period: match self.mode {
                        ViewMode::Month => date.is_same_month(&self.focus),
                        ViewMode::Week => true,
                    },
                    workout_completed: log.as_ref().is_some_and(|l| l.workout_completed),
                    nutrition_completed: log.as_ref().is_some_and(|l| l.nutrition_completed),
                }
            })
            .collect()
    }

    /// Move one month (month view) or seven days (week view).
    pub fn navigate(&mut self, direction: Direction) {
        match self.mode {
            ViewMode::Month => {
                let target = self.focus.start_of_month().add_months(direction.sign());
                self.focus = target.with_day_clamped(self.anchor_day);
            }
            ViewMode::Week => {
                self.focus = self.focus.add_days(7 * i64::from(direction.sign()));
                self.anchor_day = self.focus.day();
            }
        }
        tracing::debug!(focus = %self.focus, mode = ?self.mode, "Calendar navigated");
    }

    /// Switch view without moving the focus date.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Jump straight to a date.
    pub fn set_focus(&mut self, focus: DateKey) {
        self.focus = focus;
        self.anchor_day = focus.day();
    }

    /// Hand a picked date to the host so it can open a day session.
    pub fn select(&self, date: DateKey) -> DateKey {
        date
    }

    /// Period heading, e.g. `marzo 2024` or `Semana del 11 mar`.
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Month => self.focus.format_localized("%B %Y"),
            ViewMode::Week => self
                .focus
                .start_of_week()
                .format_localized("Semana del %-d %b"),
        }
    }

    pub fn weekday_headers(&self) -> [&'static str; 7] {
        WEEKDAY_HEADERS
    }
}
