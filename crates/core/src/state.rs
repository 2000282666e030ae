// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Machine lifecycle state (spec §3): a total order with constrained
//! transitions.

use serde::{Deserialize, Serialize};

use crate::simple_display;

/// Total-ordered lifecycle state of a machine.
///
/// Ordering (`Unknown < Pending < Running < Paused < Exited < Dead <
/// Failed`) exists for serialization/sorting convenience; the only
/// semantically meaningful relation is [`MachineState::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineState {
    Unknown,
    Pending,
    Running,
    Paused,
    Exited,
    Dead,
    Failed,
}

simple_display! {
    MachineState {
        Unknown => "unknown",
        Pending => "pending",
        Running => "running",
        Paused => "paused",
        Exited => "exited",
        Dead => "dead",
        Failed => "failed",
    }
}

impl MachineState {
    /// Terminal states admit no further transitions (other than idempotent
    /// re-observation of the same state).
    pub fn is_terminal(self) -> bool {
        matches!(self, MachineState::Exited | MachineState::Dead | MachineState::Failed)
    }

    /// Validates a transition against spec §3:
    /// ```text
    /// Pending → Running → (Paused ⇄ Running) → Exited
    /// any state → Failed | Dead
    /// Exited, Dead, Failed are terminal.
    /// ```
    pub fn can_transition_to(self, next: MachineState) -> bool {
        if self.is_terminal() {
            return false;
        }
        if matches!(next, MachineState::Failed | MachineState::Dead) {
            return true;
        }
        match (self, next) {
            (MachineState::Unknown, MachineState::Pending) => true,
            (MachineState::Pending, MachineState::Running) => true,
            (MachineState::Running, MachineState::Paused) => true,
            (MachineState::Running, MachineState::Exited) => true,
            (MachineState::Paused, MachineState::Running) => true,
            (MachineState::Paused, MachineState::Exited) => true,
            _ => false,
        }
    }
}

impl Default for MachineState {
    fn default() -> Self {
        MachineState::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_to_running_allowed() {
        assert!(MachineState::Pending.can_transition_to(MachineState::Running));
    }

    #[test]
    fn running_can_pause_and_resume() {
        assert!(MachineState::Running.can_transition_to(MachineState::Paused));
        assert!(MachineState::Paused.can_transition_to(MachineState::Running));
    }

    #[test]
    fn any_state_can_fail_or_die() {
        for s in
            [MachineState::Unknown, MachineState::Pending, MachineState::Running, MachineState::Paused]
        {
            assert!(s.can_transition_to(MachineState::Failed));
            assert!(s.can_transition_to(MachineState::Dead));
        }
    }

    #[test]
    fn terminal_states_reject_everything() {
        for s in [MachineState::Exited, MachineState::Dead, MachineState::Failed] {
            for next in [MachineState::Pending, MachineState::Running, MachineState::Paused] {
                assert!(!s.can_transition_to(next), "{s} -> {next} should be rejected");
            }
        }
    }

    #[test]
    fn pending_cannot_skip_to_exited() {
        assert!(!MachineState::Pending.can_transition_to(MachineState::Exited));
    }

    #[test]
    fn total_order_matches_spec_listing() {
        let ordered = [
            MachineState::Unknown,
            MachineState::Pending,
            MachineState::Running,
            MachineState::Paused,
            MachineState::Exited,
            MachineState::Dead,
            MachineState::Failed,
        ];
        for w in ordered.windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}
