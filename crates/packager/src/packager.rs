// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The packager selection trait and ordered dispatch (spec §4.6), mirrored
//! on the Runner Dispatch's `Runnable`/`Prepare` shape (spec §4.5).

use async_trait::async_trait;

use crate::context::PackContext;
use crate::error::PackagerError;
use crate::manager::PackageManager;
use crate::package::{Package, PackOptions};

#[async_trait]
pub trait Packager: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Whether this packager can handle `ctx`. Tested in a fixed order;
    /// the first `true` wins, with no fall-through on a subsequent error.
    fn runnable(&self, ctx: &PackContext) -> bool;

    async fn pack(
        &self,
        ctx: &PackContext,
        options: &PackOptions,
        manager: &dyn PackageManager,
    ) -> Result<Vec<Package>, PackagerError>;
}

/// Try each packager's `runnable` in order; the first match packs. No
/// fall-through to the next packager if `pack` errors (spec §4.5/§4.6).
pub async fn dispatch(
    packagers: &[Box<dyn Packager>],
    ctx: &PackContext,
    options: &PackOptions,
    manager: &dyn PackageManager,
) -> Result<Vec<Package>, PackagerError> {
    for packager in packagers {
        if packager.runnable(ctx) {
            return packager.pack(ctx, options, manager).await;
        }
    }
    Err(PackagerError::NoPackagerMatched)
}
