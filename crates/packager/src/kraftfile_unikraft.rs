// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Packager #1 (spec §4.6): project has a Unikraft core specification and
//! a compiled kernel.

use async_trait::async_trait;

use crate::context::PackContext;
use crate::error::PackagerError;
use crate::manager::PackageManager;
use crate::package::{Package, PackOptions};
use crate::packager::Packager;

pub struct KraftfileUnikraftPackager;

#[async_trait]
impl Packager for KraftfileUnikraftPackager {
    fn name(&self) -> &'static str {
        "kraftfile-unikraft"
    }

    fn runnable(&self, ctx: &PackContext) -> bool {
        ctx.project_dir.is_some() && ctx.has_unikraft_core
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

    #[test]
    fn runnable_requires_project_and_unikraft_core() {
        let p = KraftfileUnikraftPackager;
        assert!(!p.runnable(&PackContext::default()));
        assert!(p.runnable(&PackContext {
            project_dir: Some("/tmp/proj".into()),
            has_unikraft_core: true,
            ..Default::default()
        }));
    }
}
