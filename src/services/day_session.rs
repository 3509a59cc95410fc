// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Editing session for a single day.
//!
//! A session works on a private draft copy of the day's log. Checkbox toggles
//! save immediately; notes edits arm a debounce timer and only the timer firing
//! saves. Saves go through the gateway first and only the server-confirmed
//! record is written to the [`LogStore`].
//!
//! Ordering rules:
//! - at most one upsert per session is in flight; a later save waits for it and
//!   then sends the newest draft
//! - an explicit save cancels an armed (not yet fired) autosave
//! - a confirmed record replaces the draft only if the draft has not been edited
//!   since that save was sent
//! - closing cancels the autosave timer but never an in-flight request, which
//!   still lands in the store

use crate::date_key::DateKey;
use crate::error::{Result, TrackerError};
use crate::models::{DailyLog, Exercise, ExerciseInput};
use crate::services::gateway::SyncGateway;
use crate::services::stats::StatsBoard;
use crate::store::LogStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Editing,
    Saving,
    Deleting,
    /// Last save failed; the user can retry or close
    Error(String),
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation prompt
    Cancelled,
}

struct SessionState {
    draft: DailyLog,
    status: SessionStatus,
    /// Bumped on every draft mutation
    revision: u64,
    /// Newest revision the backend has acknowledged
    confirmed_revision: u64,
    last_error: Option<String>,
    closed: bool,
}

struct Shared {
    state: Mutex<SessionState>,
    /// Serializes upserts/deletes for this session
    save_lock: tokio::sync::Mutex<()>,
}

/// Everything needed to run a save, cloneable into the autosave task.
#[derive(Clone)]
struct Saver {
    date: DateKey,
    shared: Arc<Shared>,
    gateway: Arc<dyn SyncGateway>,
    store: LogStore,
    stats: Option<StatsBoard>,
}

impl Saver {
    /// Send the newest draft and reconcile with the server's answer.
    async fn save(&self) -> Result<DailyLog> {
        let confirmed = {
            let _guard = self.shared.save_lock.lock().await;
            self.save_locked().await?
        };
        self.refresh_stats().await;
        Ok(confirmed)
    }

    /// Like [`Saver::save`], but skips the round-trip when nothing changed
    /// since the last confirmation.
    async fn save_if_dirty(&self) -> Result<Option<DailyLog>> {
        let confirmed = {
            let _guard = self.shared.save_lock.lock().await;
            {
                let state = self.shared.state.lock();
                if state.confirmed_revision >= state.revision {
                    tracing::debug!(date = %self.date, "Draft already saved, skipping save");
                    return Ok(None);
                }
            }
            self.save_locked().await?
        };
        self.refresh_stats().await;
        Ok(Some(confirmed))
    }

    /// Called with `save_lock` released.
    async fn refresh_stats(&self) {
        if let Some(stats) = &self.stats {
            stats.refresh(self.gateway.as_ref()).await;
        }
    }

    async fn save_locked(&self) -> Result<DailyLog> {
        let (draft, revision) = {
            let mut state = self.shared.state.lock();
            if state.closed {
                return Err(TrackerError::SessionClosed);
            }
            state.status = SessionStatus::Saving;
            (state.draft.clone(), state.revision)
        };

        tracing::debug!(date = %self.date, revision, "Saving daily log");

        match self.gateway.upsert(&draft).await {
            Ok(confirmed) => {
                self.store.upsert(confirmed.clone());
                {
                    let mut state = self.shared.state.lock();
                    state.confirmed_revision = state.confirmed_revision.max(revision);
                    if state.revision == revision {
                        state.draft = confirmed.clone();
                    }
                    state.last_error = None;
                    if !state.closed {
                        state.status = SessionStatus::Editing;
                    }
                }
                tracing::info!(
                    date = %self.date,
                    status = ?confirmed.status(),
                    "Daily log saved"
                );
                Ok(confirmed)
            }
            Err(err) => {
                tracing::warn!(date = %self.date, error = %err, "Daily log save failed");
                let mut state = self.shared.state.lock();
                state.last_error = Some(err.to_string());
                if !state.closed {
                    state.status = SessionStatus::Error(err.to_string());
                }
                Err(err)
            }
        }
    }
}

/// Armed debounce timer. Dropping the sender cancels it.
struct ScheduledSave {
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Transient editing state for one selected date.
pub struct DayEditSession {
    date: DateKey,
    saver: Saver,
    debounce: Duration,
    autosave: Option<ScheduledSave>,
}

impl DayEditSession {
    /// Start editing `date`, seeding the draft from `existing` or an empty log.
    ///
    /// An `existing` log for a different date is ignored.
    pub fn open(
        date: DateKey,
        existing: Option<DailyLog>,
        gateway: Arc<dyn SyncGateway>,
        store: LogStore,
        autosave_debounce: Duration,
    ) -> Self {
        let draft = existing
            .filter(|log| log.date == date)
            .unwrap_or_else(|| DailyLog::empty(date));

        tracing::debug!(date = %date, "Day session opened");

        Self {
            date,
            saver: Saver {
                date,
                shared: Arc::new(Shared {
                    state: Mutex::new(SessionState {
                        draft,
                        status: SessionStatus::Editing,
                        revision: 0,
                        confirmed_revision: 0,
                        last_error: None,
                        closed: false,
                    }),
                    save_lock: tokio::sync::Mutex::new(()),
                }),
                gateway,
                store,
                stats: None,
            },
            debounce: autosave_debounce,
            autosave: None,
        }
    }

    /// Refresh `stats` after every confirmed save or delete.
    pub fn with_stats(mut self, stats: StatsBoard) -> Self {
        self.saver.stats = Some(stats);
        self
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    /// Copy of the current draft.
    pub fn draft(&self) -> DailyLog {
        self.saver.shared.state.lock().draft.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.saver.shared.state.lock().status.clone()
    }

    /// True while a save or delete is running (disable the buttons).
    pub fn is_busy(&self) -> bool {
        matches!(
            self.status(),
            SessionStatus::Saving | SessionStatus::Deleting
        )
    }

    pub fn is_closed(&self) -> bool {
        self.saver.shared.state.lock().closed
    }

    /// True when the draft has edits the backend has not acknowledged.
    pub fn is_dirty(&self) -> bool {
        let state = self.saver.shared.state.lock();
        state.revision > state.confirmed_revision
    }

    /// Failure message to show until dismissed or a save succeeds.
    pub fn last_error(&self) -> Option<String> {
        self.saver.shared.state.lock().last_error.clone()
    }

    pub fn dismiss_error(&self) {
        let mut state = self.saver.shared.state.lock();
        state.last_error = None;
        if matches!(state.status, SessionStatus::Error(_)) {
            state.status = SessionStatus::Editing;
        }
    }

    /// True while a notes autosave is armed or running.
    pub fn has_pending_autosave(&self) -> bool {
        self.autosave
            .as_ref()
            .is_some_and(|scheduled| !scheduled.handle.is_finished())
    }

    /// Modal heading, e.g. `domingo 10 de marzo`.
    pub fn heading(&self) -> String {
        self.date.format_localized("%A %-d de %B")
    }

    /// Apply a draft edit. Returns `false` if the session is closed.
    fn mutate(&self, edit: impl FnOnce(&mut DailyLog)) -> bool {
        let mut state = self.saver.shared.state.lock();
        if state.closed {
            tracing::warn!(date = %self.date, "Ignoring edit on closed day session");
            return false;
        }
        edit(&mut state.draft);
        state.revision += 1;
        if matches!(state.status, SessionStatus::Error(_)) {
            state.status = SessionStatus::Editing;
        }
        true
    }

    /// Set the workout flag and save right away.
    pub async fn toggle_workout(&mut self, completed: bool) -> Result<DailyLog> {
        if !self.mutate(|draft| draft.workout_completed = completed) {
            return Err(TrackerError::SessionClosed);
        }
        self.save().await
    }

    /// Set the nutrition flag and save right away.
    pub async fn toggle_nutrition(&mut self, completed: bool) -> Result<DailyLog> {
        if !self.mutate(|draft| draft.nutrition_completed = completed) {
            return Err(TrackerError::SessionClosed);
        }
        self.save().await
    }

    /// Replace the notes and (re)arm the autosave timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        if self.mutate(|draft| draft.notes = notes) {
            self.arm_autosave();
        }
    }

    /// Append an exercise. Blank names are ignored and `false` is returned.
    pub fn add_exercise(&mut self, input: &ExerciseInput) -> bool {
        let exercise = match input.validate() {
            Ok(exercise) => exercise,
            Err(rejected) => {
                tracing::debug!(date = %self.date, reason = %rejected, "Exercise not added");
                return false;
            }
        };
        self.mutate(|draft| draft.exercises.push(exercise))
    }

    /// Remove the exercise at `index`. Out-of-range indexes are a no-op.
    pub fn remove_exercise(&mut self, index: usize) -> Option<Exercise> {
        if index >= self.saver.shared.state.lock().draft.exercises.len() {
            return None;
        }
        let mut removed = None;
        self.mutate(|draft| {
            if index < draft.exercises.len() {
                removed = Some(draft.exercises.remove(index));
            }
        });
        removed
    }

    /// Save the draft now, cancelling any armed autosave.
    ///
    /// Waits for an in-flight save of this session first.
    pub async fn save(&mut self) -> Result<DailyLog> {
        self.cancel_autosave();
        self.saver.save().await
    }

    /// Save any unacknowledged edits now, cancelling an armed autosave.
    ///
    /// An autosave that already fired and is queued behind an in-flight save
    /// is covered too: this waits for the queue and only sends if the draft is
    /// still ahead of the last confirmation.
    pub async fn flush(&mut self) -> Result<Option<DailyLog>> {
        let armed = self.cancel_autosave();
        if armed || self.is_dirty() {
            self.saver.save_if_dirty().await
        } else {
            Ok(None)
        }
    }

    /// Delete the day after `confirm` approves, then close the session.
    ///
    /// On failure the session stays open in `Editing` with the error recorded.
    pub async fn delete<F>(&mut self, confirm: F) -> Result<DeleteOutcome>
    where
        F: FnOnce(&DateKey) -> bool,
    {
        if self.is_closed() {
            return Err(TrackerError::SessionClosed);
        }
        if !confirm(&self.date) {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.cancel_autosave();
        let shared = self.saver.shared.clone();
        let guard = shared.save_lock.lock().await;
        shared.state.lock().status = SessionStatus::Deleting;

        match self.saver.gateway.remove(self.date).await {
            Ok(()) => {
                self.saver.store.remove(&self.date);
                tracing::info!(date = %self.date, "Daily log deleted");
                drop(guard);
                self.close();
                self.saver.refresh_stats().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => {
                tracing::warn!(date = %self.date, error = %err, "Daily log delete failed");
                let mut state = shared.state.lock();
                state.last_error = Some(err.to_string());
                state.status = SessionStatus::Editing;
                Err(err)
            }
        }
    }

    /// Discard the draft and cancel any armed autosave.
    pub fn close(&mut self) {
        let dropped = self.cancel_autosave();
        let mut state = self.saver.shared.state.lock();
        if !state.closed {
            tracing::debug!(
                date = %self.date,
                dropped_autosave = dropped,
                "Day session closed"
            );
        }
        state.closed = true;
        state.status = SessionStatus::Idle;
    }

    fn arm_autosave(&mut self) {
        self.cancel_autosave();

        let (cancel, cancelled) = oneshot::channel::<()>();
        let saver = self.saver.clone();
        let delay = self.debounce;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancelled => return,
            }
            if let Err(err) = saver.save_if_dirty().await {
                tracing::warn!(date = %saver.date, error = %err, "Autosave failed");
            }
        });

        self.autosave = Some(ScheduledSave { cancel, handle });
    }

    /// Cancel the armed timer. Returns `true` if it had not fired yet.
    fn cancel_autosave(&mut self) -> bool {
        match self.autosave.take() {
            Some(scheduled) => scheduled.cancel.send(()).is_ok(),
            None => false,
        }
    }
}

impl Drop for DayEditSession {
    fn drop(&mut self) {
        self.cancel_autosave();
    }
}
