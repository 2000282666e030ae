// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed packager order (spec §4.6: kraftfile-unikraft, kraftfile-runtime,
//! cli-kernel, dockerfile).

use crate::cli_kernel::CliKernelPackager;
use crate::dockerfile::DockerfilePackager;
use crate::kraftfile_runtime::KraftfileRuntimePackager;
use crate::kraftfile_unikraft::KraftfileUnikraftPackager;
use crate::packager::Packager;

pub fn all() -> Vec<Box<dyn Packager>> {
    vec![
        Box::new(KraftfileUnikraftPackager),
        Box::new(KraftfileRuntimePackager),
        Box::new(CliKernelPackager),
        Box::new(DockerfilePackager),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_spec() {
        let names: Vec<&str> = all().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["kraftfile-unikraft", "kraftfile-runtime", "cli-kernel", "dockerfile"]);
    }
}
