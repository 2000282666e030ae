// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use uk_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("could not determine a runtime directory")]
    NoRuntimeDir,

    #[error(transparent)]
    Store(#[from] uk_store::StoreError),

    #[error(transparent)]
    Platform(#[from] uk_platform::PlatformError),

    #[error(transparent)]
    Shell(#[from] uk_shell::ShellError),

    #[error("invalid machine spec: {0}")]
    InvalidSpec(#[from] CoreError),

    #[error("machine {0} is not running")]
    NotRunning(String),

    #[error("machine {0} is not in a terminal state")]
    NotTerminal(String),

    #[error("machine {0} is already running")]
    AlreadyRunning(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ControllerError> for CoreError {
    fn from(e: ControllerError) -> Self {
        match e {
            ControllerError::Store(e) => e.into(),
            ControllerError::Platform(e) => e.into(),
            ControllerError::InvalidSpec(e) => e,
            ControllerError::NotRunning(id) => CoreError::NotTerminal(id),
            ControllerError::NotTerminal(id) => CoreError::NotTerminal(id),
            ControllerError::AlreadyRunning(id) => CoreError::AlreadyRunning(id),
            other => CoreError::BackendFailure(other.to_string()),
        }
    }
}
