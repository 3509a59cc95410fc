// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types shared by the gateway, the store and editing sessions.

use crate::date_key::ParseError;

/// Tracker error type surfaced to the host UI.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("No session credential available")]
    AuthUnavailable,

    #[error("Authentication rejected: {0}")]
    Unauthenticated(String),

    #[error("Tracker API error: HTTP {status}: {body}")]
    Collaborator { status: u16, body: String },

    #[error("Tracker API request failed: {0}")]
    Transport(String),

    #[error("Unexpected tracker API response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Day session is closed")]
    SessionClosed,
}

impl TrackerError {
    /// True when the host should send the user back to the sign-in screen.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            TrackerError::AuthUnavailable | TrackerError::Unauthenticated(_)
        )
    }

    /// True for failures reported by (or while talking to) the backend.
    ///
    /// These are shown to the user as a dismissible message; local state is untouched.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            TrackerError::Collaborator { .. }
                | TrackerError::Transport(_)
                | TrackerError::InvalidResponse(_)
        )
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
