// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared wiring every command handler needs: the runtime directory, a
//! [`Controller`], and a [`PackageManager`] driver.

use std::sync::Arc;

use uk_controller::{Config, Controller};
use uk_packager::{LocalPackageManager, PackageManager};
use uk_platform::{detect, Platform, PlatformController};

use crate::exit_error::ExitError;

/// Bearer credentials for a remote catalog client, read from the
/// environment but otherwise unused: no remote catalog HTTP client is
/// implemented here (spec non-goal), so these are threaded this far and
/// no further.
pub struct RemoteCredentials {
    pub user: Option<String>,
    pub token: Option<String>,
}

pub struct AppContext {
    pub config: Config,
    pub controller: Arc<Controller>,
    pub package_manager: Arc<dyn PackageManager>,
    pub remote_credentials: RemoteCredentials,
}

impl AppContext {
    pub fn load() -> Result<Self, ExitError> {
        let config = Config::load().map_err(uk_core::CoreError::from)?;
        let controller =
            Arc::new(Controller::new(config.runtime_dir.clone(), uk_platform::all()));
        let package_manager: Arc<dyn PackageManager> =
            Arc::new(LocalPackageManager::open(config.runtime_dir.join("packages"))?);
        let remote_credentials = RemoteCredentials {
            user: std::env::var("UK_LOGIN_USER").ok(),
            token: std::env::var("UK_LOGIN_TOKEN").ok(),
        };
        Ok(Self { config, controller, package_manager, remote_credentials })
    }

    /// Resolve an explicit `--plat` or probe the host (spec §4.5 `Detect`).
    pub async fn resolve_platform(&self, requested: Option<Platform>) -> Result<Platform, ExitError> {
        match requested {
            Some(p) => Ok(p),
            None => {
                let candidates: Vec<Box<dyn PlatformController>> = uk_platform::all();
                Ok(detect(&candidates).await.map_err(uk_core::CoreError::from)?)
            }
        }
    }
}
