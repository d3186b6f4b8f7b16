//! JSON listing conversion against fixture documents.

use crate::assert_schema_violation;
use crate::common::builders::{ListingBuilder, TreeBuilder};
use crate::common::fixtures::{load_invalid_listing, load_valid_listing};
use crate::common::init_logging;
use mcp_groups::entity::{ArgumentType, Role};
use mcp_groups::{
    Converter, GROUPS_META_KEY, GroupResult, GroupTree, JsonConverter, MemberKey, SchemaViolation,
    TreeConfig,
};
use serde_json::{Value, json};

#[test]
fn test_nested_fixture_imports() {
    init_logging();
    let converter = JsonConverter::default();
    let tree: GroupTree = converter
        .from_external(&load_valid_listing("nested"))
        .unwrap();

    assert_eq!(tree.len(), 4);
    let api = tree.find_by_fqn("com.example.api").unwrap();
    let ops = tree.find_by_fqn("ops").unwrap();
    let com = tree.find_by_fqn("com").unwrap();

    assert_eq!(tree.get(com).unwrap().title(), Some("Company"));
    assert_eq!(tree.get(api).unwrap().description(), Some("Public API tools"));
    assert_eq!(tree.get(api).unwrap().meta().unwrap()["owner"], "platform");

    let search = MemberKey::tool("search");
    assert_eq!(tree.groups_of(&search), vec![api, ops]);

    // Only the reserved key is stripped from entity metadata
    let restart = tree.entity(&MemberKey::tool("restart")).unwrap();
    let meta = restart.as_tool().unwrap().meta().unwrap();
    assert_eq!(meta.len(), 1);
    assert_eq!(meta["team"], "sre");
    assert!(
        tree.entity(&search)
            .unwrap()
            .as_tool()
            .unwrap()
            .meta()
            .is_none()
    );

    let example = tree.find_by_fqn("com.example").unwrap();
    let prompt = tree.prompts_in(example).unwrap()[0];
    assert_eq!(prompt.arguments()[0].value_type(), Some(ArgumentType::String));
    assert!(prompt.arguments()[0].is_required());

    let readme = tree
        .entity(&MemberKey::resource("file:///docs/readme.md"))
        .unwrap()
        .as_resource()
        .unwrap();
    assert_eq!(readme.size(), Some(2048));
    let annotations = readme.annotations().unwrap();
    assert_eq!(annotations.audience.as_deref(), Some(&[Role::User][..]));
    assert!(annotations.last_modified.is_some());
    assert!(tree.groups_of(&MemberKey::resource("file:///docs/readme.md")).is_empty());
}

#[test]
fn test_nested_fixture_round_trips() {
    let converter = JsonConverter::default();
    let tree: GroupTree = converter
        .from_external(&load_valid_listing("nested"))
        .unwrap();

    let exported: Value = converter.to_external(&tree);
    let again: GroupTree = converter.from_external(&exported).unwrap();
    assert_eq!(again, tree);
    assert_eq!(again.listing_version(), tree.listing_version());

    // A second export is byte-for-byte identical
    assert_eq!(converter.to_external(&again), exported);
}

#[test]
fn test_missing_name_fixture_is_rejected() {
    let converter = JsonConverter::default();
    let result: GroupResult<GroupTree> =
        converter.from_external(&load_invalid_listing("missing_name"));
    assert_schema_violation!(result, SchemaViolation::MissingRequiredField { .. });
}

#[test]
fn test_wrong_field_types() {
    let converter = JsonConverter::default();

    let payload = ListingBuilder::new().group(json!({"name": 7})).build();
    let result: GroupResult<GroupTree> = converter.from_external(&payload);
    assert_schema_violation!(result, SchemaViolation::InvalidFieldType { .. });

    let payload = ListingBuilder::new()
        .with_field("groups", json!({"name": "not-an-array"}))
        .build();
    let result: GroupResult<GroupTree> = converter.from_external(&payload);
    assert_schema_violation!(result, SchemaViolation::InvalidFieldType { .. });

    let payload = ListingBuilder::new()
        .group(json!({"name": "ops", "parent": "com"}))
        .build();
    let result: GroupResult<GroupTree> = converter.from_external(&payload);
    assert_schema_violation!(result, SchemaViolation::InvalidFieldType { .. });
}

#[test]
fn test_strict_unknown_fields() {
    let payload = ListingBuilder::new()
        .group(json!({"name": "ops", "color": "red"}))
        .build();

    let lenient = JsonConverter::default();
    let tree: GroupTree = lenient.from_external(&payload).unwrap();
    assert!(tree.find_by_fqn("ops").is_some());

    let strict = JsonConverter::new(TreeConfig::default().with_allow_unknown_fields(false)).unwrap();
    let result: GroupResult<GroupTree> = strict.from_external(&payload);
    assert_schema_violation!(result, SchemaViolation::UnknownField { .. });
}

#[test]
fn test_membership_to_unknown_group() {
    let payload = ListingBuilder::new()
        .group(json!({"name": "ops"}))
        .tool_in("restart", &["ops", "dev"])
        .build();

    let result: GroupResult<GroupTree> = JsonConverter::default().from_external(&payload);
    match result {
        Err(mcp_groups::GroupError::SchemaViolation(SchemaViolation::UnknownReference {
            path,
            reference,
            ..
        })) => {
            assert_eq!(reference, "dev");
            assert!(path.starts_with("tools[0]._meta"));
        }
        other => panic!("Expected UnknownReference, got: {:?}", other),
    }
}

#[test]
fn test_custom_separator_round_trip() {
    let config = TreeConfig::default().with_separator("/");
    let converter = JsonConverter::new(config.clone()).unwrap();

    let payload = ListingBuilder::new()
        .group(json!({"name": "v1.2", "parent": {"name": "api"}}))
        .tool_in("ping", &["api/v1.2"])
        .build();

    let tree: GroupTree = converter.from_external(&payload).unwrap();
    let v12 = tree.find_by_fqn("api/v1.2").unwrap();
    assert_eq!(tree.fully_qualified_name(v12).unwrap(), "api/v1.2");
    assert!(tree.is_member(v12, &MemberKey::tool("ping")).unwrap());

    let exported: Value = converter.to_external(&tree);
    assert_eq!(exported["tools"][0]["_meta"][GROUPS_META_KEY], json!(["api/v1.2"]));
}

#[test]
fn test_export_of_built_tree() {
    let tree = TreeBuilder::new()
        .titled_group("docs", "Documentation")
        .resource("docs.guides", "file:///guide.md", "guide")
        .build();

    let payload: Value = JsonConverter::default().to_external(&tree);
    let groups = payload["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1]["parent"]["title"], "Documentation");
    assert_eq!(
        payload["resources"][0]["_meta"][GROUPS_META_KEY],
        json!(["docs.guides"])
    );
    assert_eq!(payload["tools"], Value::Array(vec![]));
}
