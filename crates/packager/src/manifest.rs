// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project manifest (`Kraftfile`): declares either a Unikraft core spec
//! with one or more build targets, or a runtime reference the project's
//! rootfs is overlaid onto (spec §4.5 "project" runner, §4.6
//! kraftfile-unikraft / kraftfile-runtime packagers).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uk_core::{Architecture, Platform};

use crate::error::PackagerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestTarget {
    pub name: String,
    #[serde(default)]
    pub architecture: Option<Architecture>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub kernel: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub name: String,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub targets: Vec<ManifestTarget>,
}

impl ProjectManifest {
    /// Load `Kraftfile` (or `kraft.yaml`) from `project_dir`.
    pub fn load(project_dir: &Path) -> Result<Self, PackagerError> {
        for candidate in ["Kraftfile", "kraft.yaml", "kraft.yml"] {
            let path = project_dir.join(candidate);
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                return Ok(serde_yaml::from_str(&content)?);
            }
        }
        Err(PackagerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no Kraftfile found under {}", project_dir.display()),
        )))
    }

    pub fn has_unikraft_core(&self) -> bool {
        self.runtime.is_none() && !self.targets.is_empty()
    }

    /// Targets filtered by the CLI's requested arch/plat/name, per spec
    /// §4.5's "project" runner selection rule.
    pub fn filter_targets(
        &self,
        arch: Option<Architecture>,
        plat: Option<Platform>,
        target_name: Option<&str>,
    ) -> Vec<&ManifestTarget> {
        self.targets
            .iter()
            .filter(|t| match target_name {
                Some(n) => t.name == n,
                None => true,
            })
            .filter(|t| match arch {
                Some(a) => t.architecture == Some(a),
                None => true,
            })
            .filter(|t| match plat {
                Some(p) => t.platform == Some(p),
                None => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &tempfile::TempDir, yaml: &str) {
        std::fs::write(dir.path().join("Kraftfile"), yaml).unwrap();
    }

    #[test]
    fn loads_core_spec_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            &dir,
            "name: app\ntargets:\n  - name: default\n    architecture: x86_64\n    platform: qemu\n    kernel: /tmp/kernel\n",
        );
        let manifest = ProjectManifest::load(dir.path()).unwrap();
        assert!(manifest.has_unikraft_core());
        assert_eq!(manifest.targets.len(), 1);
    }

    #[test]
    fn loads_runtime_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(&dir, "name: app\nruntime: unikraft.org/base:latest\n");
        let manifest = ProjectManifest::load(dir.path()).unwrap();
        assert!(!manifest.has_unikraft_core());
        assert_eq!(manifest.runtime.as_deref(), Some("unikraft.org/base:latest"));
    }

    #[test]
    fn filter_targets_narrows_by_arch() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            &dir,
            "name: app\ntargets:\n  - name: a\n    architecture: x86_64\n    platform: qemu\n  - name: b\n    architecture: arm64\n    platform: qemu\n",
        );
        let manifest = ProjectManifest::load(dir.path()).unwrap();
        let filtered = manifest.filter_targets(Some(Architecture::Arm64), None, None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "b");
    }

    #[test]
    fn missing_manifest_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProjectManifest::load(dir.path()).is_err());
    }
}
