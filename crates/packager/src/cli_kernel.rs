// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Packager #3 (spec §4.6): `--kernel`, `--arch`, `--plat` are all set and
//! there is no project.

use async_trait::async_trait;

use crate::context::PackContext;
use crate::error::PackagerError;
use crate::manager::PackageManager;
use crate::package::{Package, PackOptions};
use crate::packager::Packager;

pub struct CliKernelPackager;

#[async_trait]
impl Packager for CliKernelPackager {
    fn name(&self) -> &'static str {
        "cli-kernel"
    }

    fn runnable(&self, ctx: &PackContext) -> bool {
        ctx.cli_kernel.is_some() && ctx.arch.is_some() && ctx.plat.is_some()
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

#[cfg(test)]
mod tests {
    use super::*;
    use uk_core::{Architecture, Platform};

    #[test]
    fn runnable_requires_kernel_arch_and_plat() {
        let p = CliKernelPackager;
        assert!(!p.runnable(&PackContext { cli_kernel: Some("/tmp/k".into()), ..Default::default() }));
        assert!(p.runnable(&PackContext {
            cli_kernel: Some("/tmp/k".into()),
            arch: Some(Architecture::X86_64),
            plat: Some(Platform::Qemu),
            ..Default::default()
        }));
    }
}
