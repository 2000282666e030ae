// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal ELF header sanity check and architecture inference.
//!
//! Only reads the fixed 16-byte `e_ident` plus the `e_machine` field; this
//! is a sanity/classification probe, not a loader.
use std::io::Read;
use std::path::Path;

use crate::error::CoreError;
use crate::spec::Architecture;

const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

// e_machine values (ELF spec).
const EM_386: u16 = 3;
const EM_ARM: u16 = 40;
const EM_X86_64: u16 = 62;
const EM_AARCH64: u16 = 183;

/// Error inferring architecture from an ELF `e_machine` value that this
/// toolkit does not support.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unsupported ELF machine type {0:#x}")]
pub struct UnsupportedArch(pub u16);

/// Read enough of `path` to confirm it is a regular, non-empty, ELF file
/// and return its inferred [`Architecture`].
///
/// This is the "unikernel-ELF sanity check" referenced throughout spec §4.5
/// and the `kernel_path` invariant in §3.
pub fn sanity_check(path: &Path) -> Result<Architecture, CoreError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CoreError::InvalidInput(format!("{}: {e}", path.display())))?;
    if !metadata.is_file() || metadata.len() == 0 {
        return Err(CoreError::InvalidInput(format!(
            "{}: not a regular non-empty file",
            path.display()
        )));
    }

    let mut file = std::fs::File::open(path)
        .map_err(|e| CoreError::InvalidInput(format!("{}: {e}", path.display())))?;
    let mut header = [0u8; 20];
    file.read_exact(&mut header)
        .map_err(|_| CoreError::InvalidInput(format!("{}: not an ELF image", path.display())))?;

    if header[0..4] != ELF_MAGIC {
        return Err(CoreError::InvalidInput(format!("{}: missing ELF magic", path.display())));
    }

    // e_machine is a 16-bit LE field at byte offset 18 for both ELF32/ELF64.
    let machine = u16::from_le_bytes([header[18], header[19]]);
    arch_for_machine(machine)
        .map_err(|e| CoreError::InvalidInput(format!("{}: {e}", path.display())))
}

fn arch_for_machine(machine: u16) -> Result<Architecture, UnsupportedArch> {
    match machine {
        EM_X86_64 | EM_386 => Ok(Architecture::X86_64),
        EM_ARM => Ok(Architecture::Arm),
        EM_AARCH64 => Ok(Architecture::Arm64),
        other => Err(UnsupportedArch(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fake_elf(dir: &tempfile::TempDir, machine: u16) -> std::path::PathBuf {
        let path = dir.path().join("kernel");
        let mut f = std::fs::File::create(&path).unwrap();
        let mut header = [0u8; 20];
        header[0..4].copy_from_slice(&ELF_MAGIC);
        header[4] = 2; // ELFCLASS64
        header[18..20].copy_from_slice(&machine.to_le_bytes());
        f.write_all(&header).unwrap();
        path
    }

    #[test]
    fn infers_x86_64_and_i386_as_x86_64() {
        assert_eq!(arch_for_machine(EM_X86_64).unwrap(), Architecture::X86_64);
        assert_eq!(arch_for_machine(EM_386).unwrap(), Architecture::X86_64);
    }

    #[test]
    fn infers_arm_and_aarch64() {
        assert_eq!(arch_for_machine(EM_ARM).unwrap(), Architecture::Arm);
        assert_eq!(arch_for_machine(EM_AARCH64).unwrap(), Architecture::Arm64);
    }

    #[test]
    fn rejects_unsupported_machine() {
        assert!(arch_for_machine(0xffff).is_err());
    }

    #[test]
    fn sanity_check_accepts_valid_elf() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fake_elf(&dir, EM_X86_64);
        assert_eq!(sanity_check(&path).unwrap(), Architecture::X86_64);
    }

    #[test]
    fn sanity_check_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sanity_check(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn sanity_check_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::File::create(&path).unwrap();
        assert!(sanity_check(&path).is_err());
    }

    #[test]
    fn sanity_check_rejects_non_elf_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notelf");
        std::fs::write(&path, b"not an elf at all, just text").unwrap();
        assert!(sanity_check(&path).is_err());
    }
}
