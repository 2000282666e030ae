// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error taxonomy (see spec §7).
//!
//! Every crate's own error enum converts into (or is built from) these
//! kinds so the CLI boundary can map a single taxonomy to exit codes
//! without knowing which crate raised it.

use thiserror::Error;

/// Cross-cutting error kind, independent of which component raised it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("ambiguous: {0:?}")]
    Ambiguous(Vec<String>),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not terminal: {0}")]
    NotTerminal(String),

    #[error("already running: {0}")]
    AlreadyRunning(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("backend failure: {0}")]
    BackendFailure(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("cancelled")]
    Cancelled,

    #[error("benign protocol frame")]
    BenignProtocolFrame,
}

/// Process exit code per spec §6/§7: 0 success, 1 generic, 2 usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    Generic = 1,
    Usage = 2,
}

impl CoreError {
    /// Exit code this error kind maps to at the CLI boundary.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CoreError::InvalidInput(_) => ExitCode::Usage,
            CoreError::Cancelled | CoreError::BenignProtocolFrame => ExitCode::Ok,
            _ => ExitCode::Generic,
        }
    }

    /// Whether this error kind is swallowed rather than surfaced (§7: benign
    /// protocol frames and propagated cancellation are not user-facing).
    pub fn is_silent(&self) -> bool {
        matches!(self, CoreError::BenignProtocolFrame | CoreError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_exits_with_usage_code() {
        assert_eq!(CoreError::InvalidInput("x".into()).exit_code(), ExitCode::Usage);
    }

    #[test]
    fn generic_errors_exit_one() {
        assert_eq!(CoreError::NotFound("x".into()).exit_code(), ExitCode::Generic);
        assert_eq!(CoreError::Ambiguous(vec!["a".into()]).exit_code(), ExitCode::Generic);
    }

    #[test]
    fn benign_frame_and_cancellation_are_silent() {
        assert!(CoreError::BenignProtocolFrame.is_silent());
        assert!(CoreError::Cancelled.is_silent());
        assert!(!CoreError::NotFound("x".into()).is_silent());
    }
}
