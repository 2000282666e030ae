// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test double for [`PackageManager`], backed by an in-memory catalog.
//! Applies the merge-strategy rule from spec §4.6 so packager/dispatch
//! tests can exercise `Conflict`/`AlreadyExists` without a real backend.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::PackagerError;
use crate::manager::PackageManager;
use crate::package::{MergeStrategy, Package, PackOptions, PackageQuery};

pub struct FakePackageManager {
    catalog: Mutex<Vec<Package>>,
}

impl Default for FakePackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePackageManager {
    pub fn new() -> Self {
        Self { catalog: Mutex::new(Vec::new()) }
    }

    pub fn seed(&self, pkg: Package) {
        self.catalog.lock().push(pkg);
    }
}

#[async_trait]
impl PackageManager for FakePackageManager {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn catalog(&self, query: &PackageQuery) -> Result<Vec<Package>, PackagerError> {
        let remote_wanted = query.remote.unwrap_or(false);
        Ok(self
            .catalog
            .lock()
            .iter()
            .filter(|p| p.remote == remote_wanted && query.matches(p))
            .cloned()
            .collect())
    }

    async fn is_compatible(&self, _reference: &str) -> (&'static str, bool) {
        ("fake", true)
    }

    async fn pack(&self, options: &PackOptions) -> Result<Vec<Package>, PackagerError> {
        let mut catalog = self.catalog.lock();
        let existing_idx = catalog.iter().position(|p| p.name == options.name);

        match (existing_idx, options.merge_strategy) {
            (None, _) => {}
            (Some(_), MergeStrategy::Abort) => {
                return Err(PackagerError::AlreadyExists(options.name.clone()));
            }
            (Some(idx), MergeStrategy::Overwrite) => {
                catalog.remove(idx);
            }
            (Some(idx), MergeStrategy::Merge) => {
                let existing = &catalog[idx];
                let conflict = options
                    .kconfig
                    .iter()
                    .any(|kv| existing.kconfig.iter().any(|e| same_key(e, kv) && e != kv));
                if conflict {
                    return Err(PackagerError::Conflict(format!(
                        "kconfig conflict packing {}",
                        options.name
                    )));
                }
                let mut merged = existing.kconfig.clone();
                for kv in &options.kconfig {
                    if !merged.contains(kv) {
                        merged.push(kv.clone());
                    }
                }
                let mut pkg = catalog.remove(idx);
                pkg.kconfig = merged;
                catalog.push(pkg.clone());
                return Ok(vec![pkg]);
            }
            (Some(_), MergeStrategy::Prompt) => return Err(PackagerError::PromptDisabled),
        }

        let pkg = Package {
            name: options.name.clone(),
            version: options.kernel_version.clone().unwrap_or_else(|| "0.0.0".to_string()),
            types: vec!["kernel".to_string()],
            arch: uk_core::Architecture::X86_64,
            plat: uk_core::Platform::Qemu,
            kconfig: options.kconfig.clone(),
            remote: false,
            local: true,
        };
        catalog.push(pkg.clone());
        Ok(vec![pkg])
    }

    async fn delete(&self, filter: &PackageQuery) -> Result<(), PackagerError> {
        self.catalog.lock().retain(|p| !filter.matches(p));
        Ok(())
    }
}

fn same_key(a: &str, b: &str) -> bool {
    a.split('=').next() == b.split('=').next()
}
