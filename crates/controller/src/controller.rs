// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Machine Lifecycle Controller (spec §4.2): Create/Start/Stop/
//! Destroy/List/Logs, built directly on [`uk_store::Store`] and a
//! [`PlatformController`] registry. No daemon process holds state; every
//! call opens and releases its own store handle.

use std::path::PathBuf;
use std::time::Duration;

use uk_core::{MachineSpec, MachineState};
use uk_platform::{controller_for, PlatformController};
use uk_store::{MachineStatus, Store, StoredMachine};

use crate::error::ControllerError;
use crate::state_dir;

pub struct Controller {
    runtime_dir: PathBuf,
    open_timeout: Duration,
    platforms: Vec<Box<dyn PlatformController>>,
}

impl Controller {
    pub fn new(runtime_dir: PathBuf, platforms: Vec<Box<dyn PlatformController>>) -> Self {
        Self { runtime_dir, open_timeout: uk_store::DEFAULT_OPEN_TIMEOUT, platforms }
    }

    pub fn with_open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    fn open_store(&self) -> Result<Store, ControllerError> {
        Ok(Store::open(&self.runtime_dir, self.open_timeout)?)
    }

    fn platform_for(&self, spec: &MachineSpec) -> Result<&dyn PlatformController, ControllerError> {
        Ok(controller_for(&self.platforms, spec.platform)?)
    }

    /// Register a new machine: validates the spec, lays out its state
    /// directory, and records it `Pending` in the store. Does not start it.
    pub fn create(&self, spec: MachineSpec) -> Result<MachineSpec, ControllerError> {
        spec.validate()?;
        state_dir::create(&spec.state_dir, &spec)?;
        let mut store = self.open_store()?;
        if let Err(e) = store.create(spec.clone(), MachineStatus::pending()) {
            // Roll back the directory we just created so retrying `create`
            // with a different id doesn't leave an orphan behind.
            let _ = state_dir::remove(&spec.state_dir);
            return Err(e.into());
        }
        Ok(spec)
    }

    /// Launch a `Pending` machine. Fails with `AlreadyRunning` unless the
    /// machine is currently `Pending`.
    pub async fn start(&self, query: &str) -> Result<StoredMachine, ControllerError> {
        let mut store = self.open_store()?;
        let machine = store.get(query)?;
        if machine.status.state != MachineState::Pending {
            return Err(ControllerError::AlreadyRunning(machine.spec.id.to_string()));
        }
        let platform = self.platform_for(&machine.spec)?;
        let pid = platform.launch(&machine.spec).await?;
        let id = machine.spec.id;
        let updated = store.update(&id, |m| {
            m.status.state = MachineState::Running;
            m.status.pid = Some(pid);
            m.status.started_at_ms = Some(now_ms());
            m.status.message = None;
        })?;
        Ok(updated)
    }

    /// Signal a running machine to stop. Does not itself transition the
    /// stored state: the event supervisor observes the process exit and
    /// records the terminal state, keeping a single writer of `state`.
    pub async fn stop(&self, query: &str, force: bool) -> Result<StoredMachine, ControllerError> {
        let store = self.open_store()?;
        let machine = store.get(query)?;
        let pid = machine
            .status
            .pid
            .ok_or_else(|| ControllerError::NotRunning(machine.spec.id.to_string()))?;
        let platform = self.platform_for(&machine.spec)?;
        platform.stop(pid, force).await?;
        Ok(machine)
    }

    /// Remove a terminal machine's store record and state directory.
    /// Fails with `NotTerminal` on a machine that is not yet `Exited`,
    /// `Dead`, or `Failed`; the caller must `Stop` it first. `force`
    /// makes this idempotent on an already-absent id.
    pub async fn destroy(&self, query: &str, force: bool) -> Result<(), ControllerError> {
        let mut store = self.open_store()?;
        let machine = match store.get(query) {
            Ok(m) => m,
            Err(uk_store::StoreError::NotFound(_)) if force => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if !machine.status.state.is_terminal() {
            return Err(ControllerError::NotTerminal(machine.spec.id.to_string()));
        }

        store.delete(&machine.spec.id, force)?;
        state_dir::remove(&machine.spec.state_dir)?;
        Ok(())
    }

    pub fn get(&self, query: &str) -> Result<StoredMachine, ControllerError> {
        Ok(self.open_store()?.get(query)?)
    }

    pub fn list(&self, name_prefix: Option<&str>) -> Result<Vec<StoredMachine>, ControllerError> {
        Ok(self.open_store()?.list(name_prefix))
    }

    /// Path to the machine's console log, for `logs`/`logs -f`.
    pub fn log_path(&self, query: &str) -> Result<PathBuf, ControllerError> {
        Ok(self.open_store()?.get(query)?.spec.log_file)
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uk_core::Platform;
    use uk_platform::FakePlatformController;

    fn controller(dir: &std::path::Path) -> (Controller, FakePlatformController) {
        let fake = FakePlatformController::new(Platform::Qemu);
        let platforms: Vec<Box<dyn PlatformController>> = vec![Box::new(fake.clone())];
        (Controller::new(dir.to_path_buf(), platforms), fake)
    }

    fn spec_in(dir: &std::path::Path, name: &str) -> MachineSpec {
        let state_dir = dir.join("machines-state").join(name);
        MachineSpec::builder()
            .state_dir(state_dir.clone())
            .log_file(state_dir.join("console.log"))
            .build()
    }

    #[tokio::test]
    async fn create_then_start_launches_via_platform_and_records_pid() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, fake) = controller(dir.path());
        let mut spec = spec_in(dir.path(), "alpha");
        spec.name = "alpha".try_into().unwrap();
        let created = controller.create(spec).unwrap();

        let started = controller.start(created.id.as_str()).await.unwrap();
        assert_eq!(started.status.state, MachineState::Running);
        assert!(started.status.pid.is_some());
        assert_eq!(fake.calls().len(), 1);
    }

    #[tokio::test]
    async fn stop_requires_running_machine() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _fake) = controller(dir.path());
        let mut spec = spec_in(dir.path(), "bravo");
        spec.name = "bravo".try_into().unwrap();
        let created = controller.create(spec).unwrap();

        assert!(controller.stop(created.id.as_str(), false).await.is_err());
    }

    #[tokio::test]
    async fn destroy_removes_state_dir_once_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _fake) = controller(dir.path());
        let mut spec = spec_in(dir.path(), "gamma");
        spec.name = "gamma".try_into().unwrap();
        let state_dir = spec.state_dir.clone();
        let created = controller.create(spec).unwrap();

        // Reach for the store directly to mark the machine terminal, since
        // the fake platform never drives a real exit transition.
        {
            let mut store = uk_store::Store::open(dir.path(), Duration::from_secs(1)).unwrap();
            store.update(&created.id, |m| m.status.state = MachineState::Exited).unwrap();
        }

        controller.destroy(created.id.as_str(), false).await.unwrap();
        assert!(!state_dir.exists());
        assert!(controller.get(created.id.as_str()).is_err());
    }

    #[tokio::test]
    async fn destroy_rejects_non_terminal_machine() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _fake) = controller(dir.path());
        let mut spec = spec_in(dir.path(), "delta");
        spec.name = "delta".try_into().unwrap();
        let created = controller.create(spec).unwrap();

        let err = controller.destroy(created.id.as_str(), false).await.unwrap_err();
        assert!(matches!(err, ControllerError::NotTerminal(_)));
        assert!(controller.get(created.id.as_str()).is_ok());
    }

    #[tokio::test]
    async fn start_rejects_already_running_machine() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _fake) = controller(dir.path());
        let mut spec = spec_in(dir.path(), "epsilon");
        spec.name = "epsilon".try_into().unwrap();
        let created = controller.create(spec).unwrap();

        controller.start(created.id.as_str()).await.unwrap();
        let err = controller.start(created.id.as_str()).await.unwrap_err();
        assert!(matches!(err, ControllerError::AlreadyRunning(_)));
    }

    #[tokio::test]
    async fn destroy_with_force_is_idempotent_on_missing_machine() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, _fake) = controller(dir.path());
        assert!(controller.destroy("nope", true).await.is_ok());
        assert!(controller.destroy("nope", false).await.is_err());
    }
}
