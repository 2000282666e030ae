// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test double for [`PlatformController`], recording calls in-memory.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use uk_core::{MachineSpec, Platform};

use crate::controller::PlatformController;
use crate::error::PlatformError;

#[derive(Debug, Clone)]
pub enum FakeCall {
    Launch(uk_core::MachineId),
    Stop { pid: u32, force: bool },
}

struct FakeState {
    calls: Vec<FakeCall>,
    available: bool,
    next_pid: u32,
    launch_err: Option<String>,
}

/// Records every call; `launch` hands out sequential fake pids unless
/// `fail_next_launch` has been set.
#[derive(Clone)]
pub struct FakePlatformController {
    platform: Platform,
    inner: Arc<Mutex<FakeState>>,
}

impl FakePlatformController {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            inner: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                available: true,
                next_pid: 1000,
                launch_err: None,
            })),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.inner.lock().available = available;
    }

    pub fn fail_next_launch(&self, message: impl Into<String>) {
        self.inner.lock().launch_err = Some(message.into());
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl PlatformController for FakePlatformController {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn is_host_hypervisor_available(&self) -> bool {
        self.inner.lock().available
    }

    async fn launch(&self, spec: &MachineSpec) -> Result<u32, PlatformError> {
        let mut state = self.inner.lock();
        if let Some(msg) = state.launch_err.take() {
            return Err(PlatformError::HypervisorUnavailable(msg));
        }
        let pid = state.next_pid;
        state.next_pid += 1;
        state.calls.push(FakeCall::Launch(spec.id));
        Ok(pid)
    }

    async fn stop(&self, pid: u32, force: bool) -> Result<(), PlatformError> {
        self.inner.lock().calls.push(FakeCall::Stop { pid, force });
        Ok(())
    }

    fn is_alive(&self, _pid: u32) -> bool {
        true
    }
}
