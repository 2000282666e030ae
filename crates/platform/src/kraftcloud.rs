// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kraftcloud platform controller.
//!
//! Kraftcloud is a remote deployment target, not a local hypervisor;
//! deploying to it is out of scope here (see Non-goals). This controller
//! exists so `Platform::Kraftcloud` has a registered strategy that
//! reports itself unavailable locally rather than panicking on lookup.

use async_trait::async_trait;
use uk_core::{MachineSpec, Platform};

use crate::controller::PlatformController;
use crate::error::PlatformError;

#[derive(Debug, Clone, Copy, Default)]
pub struct KraftcloudController;

impl KraftcloudController {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlatformController for KraftcloudController {
    fn platform(&self) -> Platform {
        Platform::Kraftcloud
    }

    async fn is_host_hypervisor_available(&self) -> bool {
        false
    }

    async fn launch(&self, _spec: &MachineSpec) -> Result<u32, PlatformError> {
        Err(PlatformError::Unsupported(
            "kraftcloud deployment is not supported by this toolkit".into(),
        ))
    }

    async fn stop(&self, _pid: u32, _force: bool) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported(
            "kraftcloud deployment is not supported by this toolkit".into(),
        ))
    }
}
