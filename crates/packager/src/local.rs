// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A filesystem-backed `PackageManager` driver: the concrete catalog/pack
//! backend the CLI injects into [`crate::packager::Packager`] strategies.
//! Packed artifacts and their metadata live under a single directory;
//! `remote` is always empty here since there is no registry client (spec
//! §4.6 non-goal: "container/OCI image byte-format production").

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::PackagerError;
use crate::manager::PackageManager;
use crate::package::{MergeStrategy, Package, PackOptions, PackageQuery};

#[derive(serde::Serialize, serde::Deserialize, Clone)]
struct CatalogFile {
    packages: Vec<Package>,
}

/// Local-disk package store: `<root>/catalog.json` plus one artifact
/// directory per packed name under `<root>/<name>/`.
pub struct LocalPackageManager {
    root: PathBuf,
    catalog: Mutex<Vec<Package>>,
}

impl LocalPackageManager {
    pub fn open(root: PathBuf) -> Result<Self, PackagerError> {
        fs::create_dir_all(&root)?;
        let catalog = load_catalog(&root)?;
        Ok(Self { root, catalog: Mutex::new(catalog) })
    }

    fn catalog_path(&self) -> PathBuf {
        self.root.join("catalog.json")
    }

    fn persist(&self, packages: &[Package]) -> Result<(), PackagerError> {
        let file = CatalogFile { packages: packages.to_vec() };
        let json = serde_json::to_vec_pretty(&file).map_err(|e| PackagerError::Manager(e.to_string()))?;
        fs::write(self.catalog_path(), json)?;
        Ok(())
    }

    pub fn artifact_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

fn load_catalog(root: &Path) -> Result<Vec<Package>, PackagerError> {
    let path = root.join("catalog.json");
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(path)?;
    let file: CatalogFile =
        serde_json::from_slice(&bytes).map_err(|e| PackagerError::Manager(e.to_string()))?;
    Ok(file.packages)
}

#[async_trait]
impl PackageManager for LocalPackageManager {
    fn name(&self) -> &'static str {
        "local"
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

    /// No registry client exists here, so everything is treated as a
    /// locally-addressable reference.
    async fn is_compatible(&self, _reference: &str) -> (&'static str, bool) {
        ("local", true)
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
                self.persist(&catalog)?;
                return Ok(vec![pkg]);
            }
            (Some(_), MergeStrategy::Prompt) => return Err(PackagerError::PromptDisabled),
        }

        fs::create_dir_all(self.artifact_dir(&options.name))?;
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
        self.persist(&catalog)?;
        Ok(vec![pkg])
    }

    async fn delete(&self, filter: &PackageQuery) -> Result<(), PackagerError> {
        let mut catalog = self.catalog.lock();
        catalog.retain(|p| !filter.matches(p));
        let _ = fs::remove_dir_all(self.root.join(
            filter.name.as_deref().unwrap_or_default(),
        ));
        self.persist(&catalog)
    }
}

fn same_key(a: &str, b: &str) -> bool {
    a.split('=').next() == b.split('=').next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(name: &str, strategy: MergeStrategy) -> PackOptions {
        PackOptions {
            name: name.to_string(),
            args: vec![],
            initrd: None,
            kconfig: vec![],
            envs: vec![],
            labels: vec![],
            output: "/tmp/out".into(),
            merge_strategy: strategy,
            kernel_version: None,
        }
    }

    #[tokio::test]
    async fn pack_persists_and_reopen_sees_it() {
        let dir = tempfile::tempdir().unwrap();
        {
            let manager = LocalPackageManager::open(dir.path().to_path_buf()).unwrap();
            manager.pack(&options("app", MergeStrategy::Overwrite)).await.unwrap();
        }
        let reopened = LocalPackageManager::open(dir.path().to_path_buf()).unwrap();
        let found = reopened.catalog(&PackageQuery::named("app")).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_from_catalog_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let manager = LocalPackageManager::open(dir.path().to_path_buf()).unwrap();
        manager.pack(&options("app", MergeStrategy::Overwrite)).await.unwrap();
        manager.delete(&PackageQuery::named("app")).await.unwrap();
        let found = manager.catalog(&PackageQuery::named("app")).await.unwrap();
        assert!(found.is_empty());
        assert!(!manager.artifact_dir("app").exists());
    }
}
