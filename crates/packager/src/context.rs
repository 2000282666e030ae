// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build context a [`crate::packager::Packager`] is evaluated against.

use std::path::PathBuf;

use uk_core::{Architecture, Platform};

#[derive(Debug, Clone, Default)]
pub struct PackContext {
    pub project_dir: Option<PathBuf>,
    /// Set when `project_dir`'s manifest declares a Unikraft core spec and
    /// a compiled kernel is already present.
    pub has_unikraft_core: bool,
    /// Set when `project_dir`'s manifest declares a runtime (a pre-built
    /// unikernel image the rootfs overlays onto) instead of a core spec.
    pub runtime_ref: Option<String>,
    pub cli_kernel: Option<PathBuf>,
    pub arch: Option<Architecture>,
    pub plat: Option<Platform>,
    pub rootfs_dockerfile: Option<PathBuf>,
}
