// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The machine store: a WAL-backed, lock-serialized key/value layer keyed
//! by [`MachineId`], exposing Create/Get/Update/GuaranteedUpdate/Delete/
//! List/Watch (spec §4.1).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::broadcast;
use uk_core::{MachineId, MachineSpec};

use crate::error::StoreError;
use crate::lock::StoreLock;
use crate::status::{MachineStatus, StoredMachine};
use crate::wal::{StoreEvent, Wal};

/// Default bound on how long `Store::open` waits for the advisory lock
/// before giving up with `StoreUnavailable`.
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(5);
const WATCH_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct WatchEvent {
    pub id: MachineId,
    /// `None` means the record was deleted.
    pub machine: Option<StoredMachine>,
}

pub struct Store {
    _lock: StoreLock,
    #[allow(dead_code)]
    dir: PathBuf,
    wal: Wal,
    state: HashMap<MachineId, StoredMachine>,
    watch_tx: broadcast::Sender<WatchEvent>,
}

impl Store {
    /// Open (creating if necessary) the store keyspace under
    /// `runtime_dir/machines`, taking an exclusive advisory lock on
    /// `runtime_dir/machines.lock`.
    pub fn open(runtime_dir: &Path, open_timeout: Duration) -> Result<Self, StoreError> {
        let dir = runtime_dir.join("machines");
        std::fs::create_dir_all(&dir)?;
        let lock_path = runtime_dir.join("machines.lock");
        let lock = StoreLock::acquire(&lock_path, open_timeout)?;

        let wal_path = dir.join("shard-0.wal");
        let wal = Wal::open(&wal_path, 0)?;
        let mut state = HashMap::new();
        wal.replay_into(&mut state);

        let (watch_tx, _rx) = broadcast::channel(WATCH_CHANNEL_CAPACITY);
        Ok(Self { _lock: lock, dir, wal, state, watch_tx })
    }

    fn notify(&self, id: MachineId, machine: Option<StoredMachine>) {
        let _ = self.watch_tx.send(WatchEvent { id, machine });
    }

    pub fn create(&mut self, spec: MachineSpec, status: MachineStatus) -> Result<(), StoreError> {
        if self.state.contains_key(&spec.id) {
            return Err(StoreError::AlreadyExists(spec.id.to_string()));
        }
        if self.state.values().any(|m| m.spec.name == spec.name) {
            return Err(StoreError::AlreadyExists(spec.name.to_string()));
        }
        let id = spec.id;
        let machine = StoredMachine { spec, status };
        self.wal.append(StoreEvent::Put { id, machine: machine.clone() })?;
        self.wal.flush()?;
        self.state.insert(id, machine.clone());
        self.notify(id, Some(machine));
        Ok(())
    }

    /// Resolve a full id, unique short-id prefix, or name to a full
    /// [`MachineId`] (spec §4.2 reference resolution).
    pub fn resolve(&self, query: &str) -> Result<MachineId, StoreError> {
        if let Some(m) = self.state.values().find(|m| m.spec.id.as_str() == query) {
            return Ok(m.spec.id);
        }
        let matches: Vec<&StoredMachine> =
            self.state.values().filter(|m| m.matches_ref(query)).collect();
        match matches.len() {
            0 => Err(StoreError::NotFound(query.to_string())),
            1 => Ok(matches[0].spec.id),
            _ => Err(StoreError::Ambiguous(
                matches.iter().map(|m| m.spec.id.to_string()).collect(),
            )),
        }
    }

    pub fn get(&self, query: &str) -> Result<StoredMachine, StoreError> {
        let id = self.resolve(query)?;
        self.get_by_id(&id)
    }

    pub fn get_by_id(&self, id: &MachineId) -> Result<StoredMachine, StoreError> {
        self.state.get(id).cloned().ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Mutate an existing record. `NotFound` if `id` is absent.
    pub fn update<F>(&mut self, id: &MachineId, f: F) -> Result<StoredMachine, StoreError>
    where
        F: FnOnce(&mut StoredMachine),
    {
        let mut machine =
            self.state.get(id).cloned().ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        f(&mut machine);
        self.wal.append(StoreEvent::Put { id: *id, machine: machine.clone() })?;
        self.wal.flush()?;
        self.state.insert(*id, machine.clone());
        self.notify(*id, Some(machine.clone()));
        Ok(machine)
    }

    /// Mutate a record, creating it from `default` first if absent.
    /// Used by observers that must record a transition even if they
    /// raced the initial `create` (spec §5 idempotent-observation note).
    pub fn guaranteed_update<D, F>(
        &mut self,
        id: &MachineId,
        default: D,
        f: F,
    ) -> Result<StoredMachine, StoreError>
    where
        D: FnOnce() -> StoredMachine,
        F: FnOnce(&mut StoredMachine),
    {
        let mut machine = self.state.get(id).cloned().unwrap_or_else(default);
        f(&mut machine);
        self.wal.append(StoreEvent::Put { id: *id, machine: machine.clone() })?;
        self.wal.flush()?;
        self.state.insert(*id, machine.clone());
        self.notify(*id, Some(machine.clone()));
        Ok(machine)
    }

    /// Remove a record. Idempotent deletes of an absent id succeed
    /// silently when `idempotent` is set (spec §8: `rm` on an already-gone
    /// machine is not an error under `--force`).
    pub fn delete(&mut self, id: &MachineId, idempotent: bool) -> Result<(), StoreError> {
        if !self.state.contains_key(id) {
            return if idempotent { Ok(()) } else { Err(StoreError::NotFound(id.to_string())) };
        }
        self.wal.append(StoreEvent::Delete { id: *id })?;
        self.wal.flush()?;
        self.state.remove(id);
        self.notify(*id, None);
        Ok(())
    }

    /// List all records, optionally restricted to those whose name starts
    /// with `prefix`, ordered by creation time then id for stable output.
    pub fn list(&self, prefix: Option<&str>) -> Vec<StoredMachine> {
        let mut out: Vec<StoredMachine> = self
            .state
            .values()
            .filter(|m| match prefix {
                Some(p) => m.spec.name.as_ref().starts_with(p),
                None => true,
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| {
            a.spec.created_at_ms.cmp(&b.spec.created_at_ms).then_with(|| a.spec.id.cmp(&b.spec.id))
        });
        out
    }

    pub fn watch(&self) -> broadcast::Receiver<WatchEvent> {
        self.watch_tx.subscribe()
    }

    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.wal.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uk_core::MachineState;

    fn spec_named(name: &str) -> MachineSpec {
        let mut s = MachineSpec::builder().build();
        s.name = name.try_into().unwrap();
        s
    }

    #[test]
    fn create_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path(), Duration::from_secs(1)).unwrap();
        let spec = spec_named("alpha");
        let id = spec.id;
        store.create(spec, MachineStatus::pending()).unwrap();
        let got = store.get(id.as_str()).unwrap();
        assert_eq!(got.spec.name.as_ref(), "alpha");
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path(), Duration::from_secs(1)).unwrap();
        let spec = spec_named("alpha");
        store.create(spec.clone(), MachineStatus::pending()).unwrap();
        assert!(store.create(spec, MachineStatus::pending()).is_err());
    }

    #[test]
    fn resolve_by_short_id_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path(), Duration::from_secs(1)).unwrap();
        let spec = spec_named("alpha");
        let id = spec.id;
        store.create(spec, MachineStatus::pending()).unwrap();
        let resolved = store.resolve(id.short()).unwrap();
        assert_eq!(resolved, id);
    }

    #[test]
    fn resolve_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path(), Duration::from_secs(1)).unwrap();
        let spec = spec_named("bravo");
        let id = spec.id;
        store.create(spec, MachineStatus::pending()).unwrap();
        assert_eq!(store.resolve("bravo").unwrap(), id);
    }

    #[test]
    fn delete_idempotent_on_missing_with_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path(), Duration::from_secs(1)).unwrap();
        let missing = MachineId::new();
        assert!(store.delete(&missing, true).is_ok());
        assert!(store.delete(&missing, false).is_err());
    }

    #[test]
    fn update_mutates_and_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let spec = spec_named("gamma");
        let id = spec.id;
        {
            let mut store = Store::open(dir.path(), Duration::from_secs(1)).unwrap();
            store.create(spec, MachineStatus::pending()).unwrap();
            store
                .update(&id, |m| {
                    m.status.state = MachineState::Running;
                    m.status.pid = Some(1234);
                })
                .unwrap();
            store.flush().unwrap();
        }
        let store = Store::open(dir.path(), Duration::from_secs(1)).unwrap();
        let got = store.get_by_id(&id).unwrap();
        assert_eq!(got.status.state, MachineState::Running);
        assert_eq!(got.status.pid, Some(1234));
    }

    #[test]
    fn list_filters_by_name_prefix_and_is_stably_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = Store::open(dir.path(), Duration::from_secs(1)).unwrap();
        store.create(spec_named("web-1"), MachineStatus::pending()).unwrap();
        store.create(spec_named("web-2"), MachineStatus::pending()).unwrap();
        store.create(spec_named("db-1"), MachineStatus::pending()).unwrap();
        let web = store.list(Some("web-"));
        assert_eq!(web.len(), 2);
    }

    #[test]
    fn second_open_times_out_while_first_handle_alive() {
        let dir = tempfile::tempdir().unwrap();
        let _first = Store::open(dir.path(), Duration::from_millis(50)).unwrap();
        let second = Store::open(dir.path(), Duration::from_millis(80));
        assert!(second.is_err());
    }

    #[test]
    fn second_open_succeeds_after_first_dropped() {
        let dir = tempfile::tempdir().unwrap();
        {
            let _first = Store::open(dir.path(), Duration::from_millis(50)).unwrap();
        }
        let second = Store::open(dir.path(), Duration::from_millis(50));
        assert!(second.is_ok());
    }
}
