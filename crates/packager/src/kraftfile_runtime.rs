// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Packager #2 (spec §4.6): project declares a *runtime* — a pre-built
//! unikernel image the user's rootfs is overlaid onto.

use async_trait::async_trait;

use crate::context::PackContext;
use crate::error::PackagerError;
use crate::manager::PackageManager;
use crate::package::{Package, PackOptions};
use crate::packager::Packager;

pub struct KraftfileRuntimePackager;

#[async_trait]
impl Packager for KraftfileRuntimePackager {
    fn name(&self) -> &'static str {
        "kraftfile-runtime"
    }

    fn runnable(&self, ctx: &PackContext) -> bool {
        ctx.project_dir.is_some() && !ctx.has_unikraft_core && ctx.runtime_ref.is_some()
    }

    async fn pack(
        &self,
        _ctx: &PackContext,
        options: &PackOptions,
        manager: &dyn PackageManager,
    ) -> Result<Vec<Package>, PackagerError> {
        manager.pack(options).await
    }
}
