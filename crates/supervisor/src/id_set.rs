// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The "observations" id-set (spec §4.4, §5): enforces at-most-one
//! observer task per machine. Add/remove take the write lock;
//! membership tests take the read lock.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use uk_core::MachineId;

#[derive(Clone, Default)]
pub struct ObservationSet {
    inner: Arc<RwLock<HashSet<MachineId>>>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &MachineId) -> bool {
        self.inner.read().contains(id)
    }

    /// Claim `id` for a new observer. Returns `false` (no-op) if an
    /// observer already owns it.
    pub fn try_insert(&self, id: MachineId) -> bool {
        self.inner.write().insert(id)
    }

    pub fn remove(&self, id: &MachineId) {
        self.inner.write().remove(id);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_insert_rejects_duplicate() {
        let set = ObservationSet::new();
        let id = MachineId::new();
        assert!(set.try_insert(id));
        assert!(!set.try_insert(id));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_frees_the_slot() {
        let set = ObservationSet::new();
        let id = MachineId::new();
        set.try_insert(id);
        set.remove(&id);
        assert!(!set.contains(&id));
        assert!(set.try_insert(id));
    }
}
