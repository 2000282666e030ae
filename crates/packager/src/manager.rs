// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `PackageManager` catalog protocol (spec §4.6): Catalog, IsCompatible,
//! Pack, Delete, implemented by a concrete backend and injected into
//! [`crate::packager::Packager`] strategies.

use async_trait::async_trait;

use crate::error::PackagerError;
use crate::package::{Package, PackOptions, PackageQuery};

#[async_trait]
pub trait PackageManager: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Enumerate packages matching `query`. `remote=false` is tried first;
    /// if the result is empty, the caller retries with `remote=true`.
    async fn catalog(&self, query: &PackageQuery) -> Result<Vec<Package>, PackagerError>;

    /// Whether `reference` looks compatible with this manager, and under
    /// which manager name — used for auto-dispatch when `--as` is unset.
    async fn is_compatible(&self, reference: &str) -> (&'static str, bool);

    async fn pack(&self, options: &PackOptions) -> Result<Vec<Package>, PackagerError>;

    async fn delete(&self, filter: &PackageQuery) -> Result<(), PackagerError>;
}

/// Run `query` against `manager`, retrying with `remote=true` if the
/// local-first pass comes back empty (spec §4.6 catalog protocol).
pub async fn catalog_local_then_remote(
    manager: &dyn PackageManager,
    mut query: PackageQuery,
) -> Result<Vec<Package>, PackagerError> {
    query.remote = Some(false);
    let local = manager.catalog(&query).await?;
    if !local.is_empty() {
        return Ok(local);
    }
    query.remote = Some(true);
    manager.catalog(&query).await
}

/// Selection rule for multi-result catalog lookups (spec §4.6): one match
/// wins outright; on ties, narrow by `(arch, plat)`; still-multi is
/// ambiguous (prompting is out of scope for the core library).
pub fn select_one(candidates: Vec<Package>) -> Result<Package, PackagerError> {
    let mut candidates = candidates;
    if candidates.len() == 1 {
        return Ok(candidates.remove(0));
    }
    if candidates.is_empty() {
        return Err(PackagerError::NoPackagerMatched);
    }
    let (arch, plat) = (candidates[0].arch, candidates[0].plat);
    let narrowed: Vec<Package> =
        candidates.into_iter().filter(|p| p.arch == arch && p.plat == plat).collect();
    match narrowed.len() {
        1 => Ok(narrowed.into_iter().next().expect("len checked")),
        0 => Err(PackagerError::NoPackagerMatched),
        _ => Err(PackagerError::Ambiguous(narrowed.iter().map(|p| p.name.clone()).collect())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uk_core::{Architecture, Platform};

    fn pkg(name: &str, arch: Architecture, plat: Platform) -> Package {
        Package {
            name: name.into(),
            version: "1.0".into(),
            types: vec![],
            arch,
            plat,
            kconfig: vec![],
            remote: false,
            local: true,
        }
    }

    #[test]
    fn select_one_picks_sole_candidate() {
        let only = vec![pkg("a", Architecture::X86_64, Platform::Qemu)];
        assert_eq!(select_one(only).unwrap().name, "a");
    }

    #[test]
    fn select_one_narrows_by_arch_and_plat() {
        let candidates = vec![
            pkg("a", Architecture::X86_64, Platform::Qemu),
            pkg("b", Architecture::Arm64, Platform::Firecracker),
        ];
        let selected =
            select_one(candidates.into_iter().filter(|p| p.arch == Architecture::X86_64).collect())
                .unwrap();
        assert_eq!(selected.name, "a");
    }

    #[test]
    fn select_one_still_ambiguous_after_narrowing() {
        let candidates = vec![
            pkg("a", Architecture::X86_64, Platform::Qemu),
            pkg("b", Architecture::X86_64, Platform::Qemu),
        ];
        assert!(matches!(select_one(candidates), Err(PackagerError::Ambiguous(_))));
    }
}
