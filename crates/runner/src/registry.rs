// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed dispatch order for the built-in runners (spec §4.5): linuxu,
//! kernel, project, package.

use std::sync::Arc;

use uk_packager::PackageManager;

use crate::kernel::KernelRunner;
use crate::linuxu::LinuxuRunner;
use crate::package::PackageRunner;
use crate::project::ProjectRunner;
use crate::runner::Runner;

pub fn all(manager: Arc<dyn PackageManager>) -> Vec<Box<dyn Runner>> {
    vec![
        Box::new(LinuxuRunner),
        Box::new(KernelRunner),
        Box::new(ProjectRunner),
        Box::new(PackageRunner::new(manager)),
    ]
}
