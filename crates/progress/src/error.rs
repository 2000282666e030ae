// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use uk_core::CoreError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProgressError {
    #[error("unit timed out")]
    Timeout,

    #[error("cancelled")]
    Cancelled,

    #[error("unit failed: {0}")]
    Failed(String),
}

impl From<ProgressError> for CoreError {
    fn from(e: ProgressError) -> Self {
        match e {
            ProgressError::Timeout => CoreError::Timeout("progress unit".into()),
            ProgressError::Cancelled => CoreError::Cancelled,
            ProgressError::Failed(reason) => CoreError::BackendFailure(reason),
        }
    }
}
