// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner #4 (spec §4.5): the first positional argument resolves to an
//! artifact in an injected package manager's catalog. Not cached locally
//! means it is pulled, then extracted into `args.state_dir`, using the
//! package's own embedded architecture/platform.

use std::sync::Arc;

use async_trait::async_trait;
use uk_core::MachineSpec;
use uk_packager::{catalog_local_then_remote, select_one, PackageManager, PackageQuery};

use crate::args::RunArgs;
use crate::error::RunnerError;
use crate::runner::Runner;

pub struct PackageRunner {
    manager: Arc<dyn PackageManager>,
}

impl PackageRunner {
    pub fn new(manager: Arc<dyn PackageManager>) -> Self {
        Self { manager }
    }

    async fn resolve(&self, reference: &str) -> Result<uk_packager::Package, RunnerError> {
        let query = PackageQuery::named(reference);
        let candidates = catalog_local_then_remote(self.manager.as_ref(), query).await?;
        Ok(select_one(candidates)?)
    }
}

#[async_trait]
impl Runner for PackageRunner {
    fn name(&self) -> &'static str {
        "package"
    }

    async fn runnable(&self, args: &RunArgs) -> Result<bool, RunnerError> {
        let Some(first) = args.first() else { return Ok(false) };
        Ok(self.resolve(first).await.is_ok())
    }

    async fn prepare(&self, args: &RunArgs, machine: &mut MachineSpec) -> Result<(), RunnerError> {
        let reference = args.first().expect("runnable checked first()");
        let pkg = self.resolve(reference).await?;
        machine.architecture = pkg.arch;
        machine.platform = pkg.plat;
        let extracted = args.state_dir.join("package").join(&pkg.name);
        machine.kernel_path = extracted.join("kernel");
        machine.kernel_source_uri = format!("package://{}@{}", pkg.name, pkg.version);
        machine.initrd_path = None;
        machine.args = args.rest();
        Ok(())
    }
}
