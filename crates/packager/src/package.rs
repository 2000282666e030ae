// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package/query/pack-option types for the catalog protocol (spec §4.6).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uk_core::{Architecture, EnvVar, Platform};

/// A resolved artifact in a package manager's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub types: Vec<String>,
    pub arch: Architecture,
    pub plat: Platform,
    pub kconfig: Vec<String>,
    pub remote: bool,
    pub local: bool,
}

/// `Catalog` query (spec §4.6): `remote=false` is consulted first; if
/// empty, `remote=true` is retried.
#[derive(Debug, Clone, Default)]
pub struct PackageQuery {
    pub name: Option<String>,
    pub version: Option<String>,
    pub types: Vec<String>,
    pub arch: Option<Architecture>,
    pub plat: Option<Platform>,
    pub kconfig: Vec<String>,
    pub remote: Option<bool>,
    pub local: Option<bool>,
    pub update: bool,
}

impl PackageQuery {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }

    /// Whether `pkg` satisfies this query's filled-in fields.
    pub fn matches(&self, pkg: &Package) -> bool {
        if let Some(name) = &self.name {
            if &pkg.name != name {
                return false;
            }
        }
        if let Some(version) = &self.version {
            if &pkg.version != version {
                return false;
            }
        }
        if let Some(arch) = self.arch {
            if pkg.arch != arch {
                return false;
            }
        }
        if let Some(plat) = self.plat {
            if pkg.plat != plat {
                return false;
            }
        }
        if !self.types.is_empty() && !self.types.iter().any(|t| pkg.types.contains(t)) {
            return false;
        }
        true
    }
}

/// How to resolve a naming collision when packing over an existing
/// same-name artifact (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    #[default]
    Overwrite,
    Merge,
    Abort,
    Prompt,
}

/// Options accepted by [`crate::manager::PackageManager::pack`].
#[derive(Debug, Clone)]
pub struct PackOptions {
    pub name: String,
    pub args: Vec<String>,
    pub initrd: Option<PathBuf>,
    pub kconfig: Vec<String>,
    pub envs: Vec<EnvVar>,
    pub labels: Vec<(String, String)>,
    pub output: PathBuf,
    pub merge_strategy: MergeStrategy,
    pub kernel_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str) -> Package {
        Package {
            name: name.to_string(),
            version: "1.0".into(),
            types: vec!["kernel".into()],
            arch: Architecture::X86_64,
            plat: Platform::Qemu,
            kconfig: Vec::new(),
            remote: false,
            local: true,
        }
    }

    #[test]
    fn query_matches_on_name_and_arch() {
        let q = PackageQuery { name: Some("app".into()), arch: Some(Architecture::X86_64), ..Default::default() };
        assert!(q.matches(&pkg("app")));
        assert!(!q.matches(&pkg("other")));
    }

    #[test]
    fn empty_query_matches_anything() {
        assert!(PackageQuery::default().matches(&pkg("anything")));
    }
}
