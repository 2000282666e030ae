// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use uk_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Store(#[from] uk_store::StoreError),

    #[error(transparent)]
    Controller(#[from] uk_controller::ControllerError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SupervisorError> for CoreError {
    fn from(e: SupervisorError) -> Self {
        match e {
            SupervisorError::Store(e) => e.into(),
            SupervisorError::Controller(e) => e.into(),
            SupervisorError::Io(e) => CoreError::BackendFailure(e.to_string()),
        }
    }
}
