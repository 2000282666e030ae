// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Event Supervisor (spec §4.4): a long-lived poller that attaches
//! one observer task per live machine and enforces `destroy_on_exit`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uk_controller::Controller;
use uk_core::{MachineId, MachineState};
use uk_store::Store;

use crate::error::SupervisorError;
use crate::id_set::ObservationSet;
use crate::pid_file::PidFileGuard;

/// Default polling granularity (spec §4.4: "default 1 s").
pub const DEFAULT_GRANULARITY: Duration = Duration::from_secs(1);

pub struct Supervisor {
    runtime_dir: PathBuf,
    controller: Arc<Controller>,
    granularity: Duration,
    /// Restrict observation to a single id/short id (`events --id <ref>`).
    id_filter: Option<String>,
    /// Exit once the id-set drains to empty (spec §4.4.2.d).
    quit_together: bool,
    observations: ObservationSet,
}

impl Supervisor {
    pub fn new(runtime_dir: PathBuf, controller: Arc<Controller>) -> Self {
        Self {
            runtime_dir,
            controller,
            granularity: DEFAULT_GRANULARITY,
            id_filter: None,
            quit_together: false,
            observations: ObservationSet::new(),
        }
    }

    pub fn with_granularity(mut self, granularity: Duration) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn with_id_filter(mut self, id_filter: Option<String>) -> Self {
        self.id_filter = id_filter;
        self
    }

    pub fn with_quit_together(mut self, quit_together: bool) -> Self {
        self.quit_together = quit_together;
        self
    }

    /// Run until `shutdown` fires (e.g. on SIGINT/SIGTERM) or, when
    /// `quit_together` is set, until the id-set drains to empty.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), SupervisorError> {
        let pid_path = self.runtime_dir.join("events.pid");
        let _pid_guard = PidFileGuard::create(&pid_path)?;
        info!(granularity = ?self.granularity, "event supervisor started");

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            let live_ids = self.tick()?;

            if self.quit_together && live_ids.is_empty() && self.observations.is_empty() {
                debug!("id-set drained and quit_together set, exiting");
                break;
            }

            tokio::select! {
                _ = sleep(self.granularity) => {}
                _ = shutdown.cancelled() => break,
            }
        }

        shutdown.cancel();
        // Observers poll on their own schedule and exit once they notice
        // cancellation; give the final in-flight tick a chance to land.
        sleep(self.granularity).await;
        info!("event supervisor stopped");
        Ok(())
    }

    /// One pass of spec §4.4.2: re-read ids, filter, spawn new observers.
    /// Returns the filtered live (non-terminal) id list for this tick.
    fn tick(&self) -> Result<Vec<MachineId>, SupervisorError> {
        let store = Store::open(&self.runtime_dir, uk_store::DEFAULT_OPEN_TIMEOUT)?;
        let machines = store.list(None);
        drop(store);

        let live: Vec<MachineId> = machines
            .iter()
            .filter(|m| !m.status.state.is_terminal())
            .filter(|m| match &self.id_filter {
                Some(f) => m.matches_ref(f),
                None => true,
            })
            .map(|m| m.spec.id)
            .collect();

        for id in &live {
            if self.observations.try_insert(*id) {
                self.spawn_observer(*id);
            }
        }
        Ok(live)
    }

    fn spawn_observer(&self, id: MachineId) {
        let runtime_dir = self.runtime_dir.clone();
        let controller = Arc::clone(&self.controller);
        let observations = self.observations.clone();
        let granularity = self.granularity;

        tokio::spawn(async move {
            observe(runtime_dir, controller, id, granularity).await;
            observations.remove(&id);
        });
    }
}

/// One observer task: polls a single machine's status until it reaches a
/// terminal state (or the store can no longer resolve it), then honors
/// `destroy_on_exit`.
async fn observe(runtime_dir: PathBuf, controller: Arc<Controller>, id: MachineId, granularity: Duration) {
    loop {
        let status = {
            let store = match Store::open(&runtime_dir, uk_store::DEFAULT_OPEN_TIMEOUT) {
                Ok(s) => s,
                Err(e) => {
                    warn!(id = %id, error = %e, "observer could not open store, giving up");
                    return;
                }
            };
            store.get_by_id(&id)
        };

        let machine = match status {
            Ok(m) => m,
            Err(_) => {
                debug!(id = %id, "observed machine no longer present, stopping observation");
                return;
            }
        };

        if machine.status.state.is_terminal() {
            info!(id = %id, state = %machine.status.state, "machine reached terminal state");
            if machine.spec.destroy_on_exit
                && matches!(machine.status.state, MachineState::Exited | MachineState::Dead)
            {
                if let Err(e) = controller.destroy(id.as_str(), true).await {
                    warn!(id = %id, error = %e, "destroy_on_exit failed");
                }
            }
            return;
        }

        sleep(granularity).await;
    }
}
