// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed, priority-ordered list of known platform controllers.

use crate::controller::PlatformController;
use crate::firecracker::FirecrackerController;
use crate::kraftcloud::KraftcloudController;
use crate::linuxu::LinuxuController;
use crate::qemu::QemuController;
use crate::xen::XenController;

/// All known controllers, in the order `Detect` probes them.
///
/// `linuxu` is deliberately last: it always reports itself available on
/// any Linux host, so putting it first would starve real-hypervisor
/// detection.
pub fn all() -> Vec<Box<dyn PlatformController>> {
    vec![
        Box::new(FirecrackerController::new()),
        Box::new(QemuController::new()),
        Box::new(XenController::new()),
        Box::new(KraftcloudController::new()),
        Box::new(LinuxuController::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use uk_core::Platform;

    #[test]
    fn registry_covers_every_platform_variant() {
        let platforms: Vec<Platform> = all().iter().map(|c| c.platform()).collect();
        for p in [
            Platform::Qemu,
            Platform::Firecracker,
            Platform::Xen,
            Platform::Kraftcloud,
            Platform::Linuxu,
        ] {
            assert!(platforms.contains(&p), "{p} missing from registry");
        }
    }
}
