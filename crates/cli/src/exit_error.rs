// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use uk_core::CoreError;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<CoreError> for ExitError {
    fn from(e: CoreError) -> Self {
        Self::new(e.exit_code() as i32, e.to_string())
    }
}

impl From<uk_controller::ControllerError> for ExitError {
    fn from(e: uk_controller::ControllerError) -> Self {
        CoreError::from(e).into()
    }
}

impl From<uk_runner::RunnerError> for ExitError {
    fn from(e: uk_runner::RunnerError) -> Self {
        CoreError::from(e).into()
    }
}

impl From<uk_packager::PackagerError> for ExitError {
    fn from(e: uk_packager::PackagerError) -> Self {
        CoreError::from(e).into()
    }
}

impl From<uk_supervisor::SupervisorError> for ExitError {
    fn from(e: uk_supervisor::SupervisorError) -> Self {
        CoreError::from(e).into()
    }
}

impl From<uk_progress::ProgressError> for ExitError {
    fn from(e: uk_progress::ProgressError) -> Self {
        CoreError::from(e).into()
    }
}

impl From<std::io::Error> for ExitError {
    fn from(e: std::io::Error) -> Self {
        Self::new(1, e.to_string())
    }
}

impl From<anyhow::Error> for ExitError {
    fn from(e: anyhow::Error) -> Self {
        Self::new(1, e.to_string())
    }
}
