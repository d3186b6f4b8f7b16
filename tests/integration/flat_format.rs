//! Flat row document conversion.

use crate::common::builders::TreeBuilder;
use crate::common::fixtures::{load_invalid_listing, load_valid_listing};
use crate::{assert_group_error, assert_schema_violation};
use mcp_groups::{
    Converter, FlatConverter, GroupError, GroupResult, GroupTree, JsonConverter, MemberKey,
    SchemaViolation,
};
use serde_json::json;

#[test]
fn test_flat_fixture_imports() {
    let tree: GroupTree = FlatConverter::default()
        .from_external(&load_valid_listing("flat"))
        .unwrap();

    let ops = tree.find_by_fqn("ops").unwrap();
    let db = tree.find_by_fqn("ops.db").unwrap();
    assert_eq!(tree.get(ops).unwrap().title(), Some("Operations"));
    assert_eq!(tree.children(ops).unwrap().len(), 2);

    assert!(tree.is_member(ops, &MemberKey::tool("restart")).unwrap());
    assert_eq!(tree.resources_in(db).unwrap()[0].uri(), "postgres://main");
    assert_eq!(tree.tools_in(db).unwrap()[0].name(), "vacuum");
}

#[test]
fn test_flat_cycle_fixture_is_rejected() {
    let result: GroupResult<GroupTree> =
        FlatConverter::default().from_external(&load_invalid_listing("flat_cycle"));
    assert_group_error!(result, GroupError::Cycle { .. });
}

#[test]
fn test_duplicate_sibling_fixture_is_rejected() {
    let result: GroupResult<GroupTree> =
        FlatConverter::default().from_external(&load_invalid_listing("duplicate_sibling"));
    assert_group_error!(result, GroupError::DuplicateName { .. });
}

#[test]
fn test_flat_and_json_agree() {
    let tree = TreeBuilder::new()
        .tool("com.example.api", "search")
        .prompt("com.example", "summarize")
        .resource("ops", "file:///runbook.md", "runbook")
        .tool("ops", "search")
        .build();

    let flat = FlatConverter::default();
    let json = JsonConverter::default();

    let via_flat: GroupTree = flat.from_external(&flat.to_external(&tree)).unwrap();
    let via_json: GroupTree = json.from_external(&json.to_external(&tree)).unwrap();

    assert_eq!(via_flat, tree);
    assert_eq!(via_json, tree);
    assert_eq!(via_flat.listing_version(), via_json.listing_version());
}

#[test]
fn test_membership_rows_validated() {
    let doc = json!({
        "groups": [{"id": "a", "name": "a"}],
        "tools": [{"name": "t"}],
        "memberships": [{"group": "b", "kind": "tool", "id": "t"}]
    });
    let result: GroupResult<GroupTree> = FlatConverter::default().from_external(&doc);
    assert_schema_violation!(result, SchemaViolation::UnknownReference { .. });

    let doc = json!({
        "groups": [{"id": "a", "name": "a"}],
        "memberships": [{"group": "a", "kind": "tool"}]
    });
    let result: GroupResult<GroupTree> = FlatConverter::default().from_external(&doc);
    assert_schema_violation!(result, SchemaViolation::MissingRequiredField { .. });
}

#[test]
fn test_batch_import_stops_at_first_failure() {
    let converter = FlatConverter::default();
    let good = converter.to_external(&TreeBuilder::new().group("a").build());
    let bad = json!({"groups": [{"id": "x", "name": "x", "parent": "x"}]});

    let trees = converter
        .from_external_all(&[good.clone(), good.clone()][..])
        .unwrap();
    assert_eq!(trees.len(), 2);

    let result = converter.from_external_all(&[good, bad][..]);
    assert_group_error!(result, GroupError::Cycle { .. });
}
