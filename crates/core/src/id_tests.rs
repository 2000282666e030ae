// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_ids_are_full_length_and_unique() {
    let a = MachineId::new();
    let b = MachineId::new();
    assert!(a.is_full());
    assert_eq!(a.as_str().len(), ID_FULL_LEN);
    assert_ne!(a, b);
}

#[test]
fn empty_string_is_null() {
    let id = MachineId::from_str("").unwrap();
    assert!(id.is_null());
    assert_eq!(id.as_str(), "");
}

#[test]
fn rejects_non_hex() {
    assert!(matches!(MachineId::from_str("not-hex!"), Err(IdParseError::NotHex(_))));
}

#[test]
fn rejects_too_long() {
    let too_long = "a".repeat(ID_FULL_LEN + 1);
    assert!(matches!(MachineId::from_str(&too_long), Err(IdParseError::TooLong(_))));
}

#[test]
fn lowercases_on_parse() {
    let id = MachineId::from_str("ABCDEF").unwrap();
    assert_eq!(id.as_str(), "abcdef");
}

#[test]
fn short_truncates_to_twelve_chars() {
    let id = MachineId::new();
    assert_eq!(id.short().len(), ID_SHORT_LEN);
    assert!(id.as_str().starts_with(id.short()));
}

#[test]
fn short_of_already_short_id_is_unchanged() {
    let id = MachineId::from_str("abc").unwrap();
    assert_eq!(id.short(), "abc");
}

#[test]
fn matches_prefix_but_not_unrelated_id() {
    let full = MachineId::new();
    let prefix = MachineId::from_str(full.short()).unwrap();
    assert!(prefix.matches(&full));

    let other = MachineId::new();
    assert!(!prefix.matches(&other) || prefix.short() == other.short());
}

#[test]
fn null_matches_nothing() {
    let full = MachineId::new();
    assert!(!MachineId::null().matches(&full));
}

#[test]
fn serde_roundtrip() {
    let id = MachineId::new();
    let json = serde_json::to_string(&id).unwrap();
    let back: MachineId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}
