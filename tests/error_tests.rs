// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use gym_tracker::date_key::DateKey;
use gym_tracker::error::TrackerError;

#[test]
fn test_is_unauthenticated_matches() {
    assert!(TrackerError::AuthUnavailable.is_unauthenticated());
    assert!(TrackerError::Unauthenticated("expired".to_string()).is_unauthenticated());
}

#[test]
fn test_is_unauthenticated_no_match() {
    let err = TrackerError::Collaborator {
        status: 500,
        body: "Internal Server Error".to_string(),
    };
    assert!(!err.is_unauthenticated());
    assert!(!TrackerError::SessionClosed.is_unauthenticated());
}

#[test]
fn test_collaborator_failures() {
    let err = TrackerError::Collaborator {
        status: 503,
        body: "unavailable".to_string(),
    };
    assert!(err.is_collaborator_failure());
    assert_eq!(err.to_string(), "Tracker API error: HTTP 503: unavailable");

    assert!(TrackerError::Transport("connection refused".to_string()).is_collaborator_failure());
    assert!(TrackerError::InvalidResponse("bad json".to_string()).is_collaborator_failure());
    assert!(!TrackerError::AuthUnavailable.is_collaborator_failure());
}

#[test]
fn test_parse_error_converts() {
    let err: TrackerError = DateKey::parse("10/03/2024").unwrap_err().into();
    assert!(matches!(err, TrackerError::Parse(_)));
    assert!(err.to_string().contains("10/03/2024"));
}
