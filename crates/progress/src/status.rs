// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-unit status machine and parent-derived display status (spec §4.7).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// A single unit's own status, independent of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStatus {
    Pending,
    Running,
    Success,
    Failed,
}

impl UnitStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, UnitStatus::Success | UnitStatus::Failed)
    }
}

/// What a hierarchical view renders for a parent, folding its own status
/// together with its children's (spec §4.7: `RunningChild`, `FailedChild`,
/// `RunningButAChildHasFailed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Pending,
    Running,
    RunningChild,
    FailedChild,
    RunningButAChildHasFailed,
    Success,
    Failed,
}

/// Fold a unit's own status with its children's display statuses.
pub fn derive_display_status(own: UnitStatus, children: &[DisplayStatus]) -> DisplayStatus {
    if children.is_empty() {
        return match own {
            UnitStatus::Pending => DisplayStatus::Pending,
            UnitStatus::Running => DisplayStatus::Running,
            UnitStatus::Success => DisplayStatus::Success,
            UnitStatus::Failed => DisplayStatus::Failed,
        };
    }

    let any_failed = children
        .iter()
        .any(|c| matches!(c, DisplayStatus::Failed | DisplayStatus::FailedChild));
    let any_running = children.iter().any(|c| {
        matches!(c, DisplayStatus::Running | DisplayStatus::RunningChild | DisplayStatus::RunningButAChildHasFailed)
    });

    match own {
        UnitStatus::Failed => DisplayStatus::Failed,
        UnitStatus::Success if any_failed => DisplayStatus::FailedChild,
        UnitStatus::Success => DisplayStatus::Success,
        _ if any_running && any_failed => DisplayStatus::RunningButAChildHasFailed,
        _ if any_running => DisplayStatus::RunningChild,
        _ if any_failed => DisplayStatus::FailedChild,
        UnitStatus::Running => DisplayStatus::Running,
        UnitStatus::Pending => DisplayStatus::Pending,
    }
}

/// Shared live status board, read by a progress reporter while the engine
/// is still running.
#[derive(Clone, Default)]
pub struct StatusBoard {
    inner: Arc<Mutex<HashMap<String, UnitStatus>>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, unit: &str, status: UnitStatus) {
        self.inner.lock().insert(unit.to_string(), status);
    }

    pub fn get(&self, unit: &str) -> Option<UnitStatus> {
        self.inner.lock().get(unit).copied()
    }

    pub fn snapshot(&self) -> HashMap<String, UnitStatus> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_status_passes_through() {
        assert_eq!(derive_display_status(UnitStatus::Running, &[]), DisplayStatus::Running);
    }

    #[test]
    fn running_parent_with_failed_child_is_running_but_a_child_has_failed() {
        let derived = derive_display_status(UnitStatus::Running, &[DisplayStatus::Failed]);
        assert_eq!(derived, DisplayStatus::RunningButAChildHasFailed);
    }

    #[test]
    fn successful_parent_with_failed_child_is_failed_child() {
        let derived = derive_display_status(UnitStatus::Success, &[DisplayStatus::Failed]);
        assert_eq!(derived, DisplayStatus::FailedChild);
    }

    #[test]
    fn status_board_round_trips() {
        let board = StatusBoard::new();
        board.set("a", UnitStatus::Running);
        assert_eq!(board.get("a"), Some(UnitStatus::Running));
        assert_eq!(board.get("missing"), None);
    }
}
