// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Packager #4 (spec §4.6): `--rootfs` points at a Dockerfile; delegates
//! to the runtime packager. Producing OCI image bytes is out of scope —
//! this packager only forwards the build request to the injected
//! [`PackageManager`].

use async_trait::async_trait;

use crate::context::PackContext;
use crate::error::PackagerError;
use crate::manager::PackageManager;
use crate::package::{Package, PackOptions};
use crate::packager::Packager;

pub struct DockerfilePackager;

#[async_trait]
impl Packager for DockerfilePackager {
    fn name(&self) -> &'static str {
        "dockerfile"
    }

    fn runnable(&self, ctx: &PackContext) -> bool {
        ctx.rootfs_dockerfile.is_some()
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
    fn runnable_requires_rootfs_dockerfile() {
        let p = DockerfilePackager;
        assert!(!p.runnable(&PackContext::default()));
        assert!(p.runnable(&PackContext {
            rootfs_dockerfile: Some("/tmp/proj/Dockerfile".into()),
            ..Default::default()
        }));
    }
}
