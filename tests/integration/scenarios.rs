//! End-to-end scenarios on the group tree API.

use crate::common::builders::TreeBuilder;
use crate::common::init_logging;
use crate::{assert_error_message_contains, assert_group_error};
use mcp_groups::{Group, GroupError, GroupTree, MemberKey, Prompt, Tool};

#[test]
fn test_three_level_fully_qualified_name() {
    init_logging();
    let mut tree = GroupTree::new();
    let com = tree.create_group(Group::new("com"), None).unwrap();
    let example = tree.create_group(Group::new("example"), Some(com)).unwrap();
    let api = tree.create_group(Group::new("api"), Some(example)).unwrap();

    assert_eq!(tree.fully_qualified_name(api).unwrap(), "com.example.api");
    assert_eq!(tree.find_by_fqn("com.example.api"), Some(api));
}

#[test]
fn test_reparent_under_own_grandchild_fails() {
    init_logging();
    let mut tree = TreeBuilder::new().group("com.example.api").build();
    let com = tree.find_by_fqn("com").unwrap();
    let api = tree.find_by_fqn("com.example.api").unwrap();
    let before = tree.clone();

    assert_group_error!(tree.set_parent(com, Some(api)), GroupError::Cycle { .. });
    assert_eq!(tree, before);
    assert_eq!(tree.parent(com).unwrap(), None);
}

#[test]
fn test_tool_in_two_groups_listed_by_both() {
    init_logging();
    let mut tree = TreeBuilder::new()
        .group("search")
        .group("web.crawl")
        .build();
    let search = tree.find_by_fqn("search").unwrap();
    let crawl = tree.find_by_fqn("web.crawl").unwrap();

    tree.add_member(search, Tool::new("fetch_page")).unwrap();
    tree.add_member(crawl, Tool::new("fetch_page")).unwrap();

    let in_search: Vec<&str> = tree.tools_in(search).unwrap().iter().map(|t| t.name()).collect();
    let in_crawl: Vec<&str> = tree.tools_in(crawl).unwrap().iter().map(|t| t.name()).collect();
    assert_eq!(in_search, vec!["fetch_page"]);
    assert_eq!(in_crawl, vec!["fetch_page"]);

    let key = MemberKey::tool("fetch_page");
    assert_eq!(tree.groups_of(&key), vec![search, crawl]);
    assert_eq!(tree.entity_roots(&key).len(), 2);
}

#[test]
fn test_adding_member_twice_keeps_one_entry() {
    let mut tree = TreeBuilder::new().group("search").build();
    let search = tree.find_by_fqn("search").unwrap();

    tree.add_member(search, Tool::new("web")).unwrap();
    tree.add_member(search, Tool::new("web")).unwrap();

    assert_eq!(tree.member_keys(search).unwrap().len(), 1);
}

#[test]
fn test_name_rules() {
    let mut tree = GroupTree::new();
    assert_group_error!(
        tree.create_group(Group::new(""), None),
        GroupError::InvalidName { .. }
    );
    assert_error_message_contains!(tree.create_group(Group::new("a.b"), None), "separator");

    tree.create_group(Group::new("ops"), None).unwrap();
    assert_group_error!(
        tree.create_group(Group::new("ops"), None),
        GroupError::DuplicateName { parent: None, .. }
    );
}

#[test]
fn test_reorganize_hierarchy() {
    init_logging();
    let mut tree = TreeBuilder::new()
        .tool("tools.search", "web")
        .prompt("tools.search", "query_help")
        .group("archive")
        .build();
    let tools = tree.find_by_fqn("tools").unwrap();
    let search = tree.find_by_fqn("tools.search").unwrap();
    let archive = tree.find_by_fqn("archive").unwrap();

    tree.add_child(archive, search).unwrap();
    assert_eq!(tree.fully_qualified_name(search).unwrap(), "archive.search");
    assert!(tree.children(tools).unwrap().is_empty());

    tree.rename(archive, "legacy").unwrap();
    assert_eq!(tree.find_by_fqn("legacy.search"), Some(search));

    // Members move with their group
    assert_eq!(tree.prompts_in(search).unwrap()[0].name(), "query_help");

    assert!(tree.remove_child(archive, search).unwrap());
    assert_eq!(tree.roots().len(), 3);
}

#[test]
fn test_delete_subtree_keeps_entities() {
    let mut tree = TreeBuilder::new()
        .tool("a.b.c", "deep")
        .tool("a", "shallow")
        .build();
    let a = tree.find_by_fqn("a").unwrap();
    let b = tree.find_by_fqn("a.b").unwrap();

    let removed = tree.delete_group(b).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(tree.descendants(a).unwrap().count(), 0);

    let deep = MemberKey::tool("deep");
    assert!(tree.entity(&deep).is_some());
    assert!(tree.groups_of(&deep).is_empty());
    assert_eq!(tree.groups_of(&MemberKey::tool("shallow")), vec![a]);
}

#[test]
fn test_descendants_order_is_stable() {
    let tree = TreeBuilder::new()
        .group("r.a.x")
        .group("r.a.y")
        .group("r.b")
        .build();
    let r = tree.find_by_fqn("r").unwrap();

    let names: Vec<String> = tree
        .descendants(r)
        .unwrap()
        .map(|id| tree.fully_qualified_name(id).unwrap())
        .collect();
    assert_eq!(names, vec!["r.a", "r.a.x", "r.a.y", "r.b"]);

    let again: Vec<String> = tree
        .descendants(r)
        .unwrap()
        .map(|id| tree.fully_qualified_name(id).unwrap())
        .collect();
    assert_eq!(names, again);
}

#[test]
fn test_register_replaces_record_for_all_groups() {
    let mut tree = TreeBuilder::new()
        .prompt("a", "greet")
        .prompt("b", "greet")
        .build();
    let a = tree.find_by_fqn("a").unwrap();
    let b = tree.find_by_fqn("b").unwrap();

    tree.register(Prompt::new("greet").with_description("Say hello"));

    assert_eq!(tree.prompts_in(a).unwrap()[0].description(), Some("Say hello"));
    assert_eq!(tree.prompts_in(b).unwrap()[0].description(), Some("Say hello"));
}
