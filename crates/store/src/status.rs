// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime status tracked alongside a [`MachineSpec`] in the store.

use serde::{Deserialize, Serialize};
use uk_core::{MachineSpec, MachineState};

/// Mutable runtime facts about a machine, as last observed by the
/// controller or event supervisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineStatus {
    pub state: MachineState,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub started_at_ms: Option<u64>,
    #[serde(default)]
    pub exited_at_ms: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Default for MachineStatus {
    fn default() -> Self {
        Self {
            state: MachineState::Unknown,
            pid: None,
            exit_code: None,
            started_at_ms: None,
            exited_at_ms: None,
            message: None,
        }
    }
}

impl MachineStatus {
    pub fn pending() -> Self {
        Self { state: MachineState::Pending, ..Self::default() }
    }
}

/// A spec paired with its current status: one record in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMachine {
    pub spec: MachineSpec,
    pub status: MachineStatus,
}

impl StoredMachine {
    /// `true` if `query` matches this record's full id, a unique short-id
    /// prefix, or its name (spec §4.2 reference resolution).
    pub fn matches_ref(&self, query: &str) -> bool {
        self.spec.id.as_str() == query
            || self.spec.id.as_str().starts_with(query)
            || self.spec.name.as_ref() == query
    }
}
