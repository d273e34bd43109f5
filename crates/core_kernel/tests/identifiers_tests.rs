//! Tests for strongly-typed identifiers

use std::collections::HashSet;
use std::str::FromStr;

use core_kernel::{ClaimId, PostId, UserId};
use uuid::Uuid;

#[test]
fn test_display_includes_prefix() {
    assert!(PostId::new().to_string().starts_with("PST-"));
    assert!(ClaimId::new().to_string().starts_with("CLM-"));
    assert!(UserId::new().to_string().starts_with("USR-"));
}

#[test]
fn test_roundtrip_through_display() {
    let id = PostId::new_v7();
    let parsed = PostId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_parse_without_prefix() {
    let uuid = Uuid::new_v4();
    let parsed = ClaimId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(parsed.as_uuid(), &uuid);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(UserId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_serde_transparent() {
    let id = ClaimId::new();
    let json = serde_json::to_string(&id).unwrap();
    // Serialized as the bare UUID, not a struct
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));

    let back: ClaimId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}

#[test]
fn test_v7_ids_are_unique() {
    let ids: HashSet<_> = (0..1000).map(|_| ClaimId::new_v7()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn test_ids_are_hashable_keys() {
    let mut set = HashSet::new();
    let id = PostId::new();
    set.insert(id);
    assert!(set.contains(&id));
}
