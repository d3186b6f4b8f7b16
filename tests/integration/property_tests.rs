//! Property-based tests for the group tree and its converters.
//!
//! Trees are generated from a list of "create group" steps, each picking a
//! parent among the groups created so far (or none, for a root), plus a list
//! of tool, prompt and resource memberships. Groups and entities carry
//! optional `_meta`, the empty map included. Steps that would break a
//! naming rule are skipped.

use mcp_groups::{
    Converter, Entity, FlatConverter, Group, GroupId, GroupTree, JsonConverter, MemberKey, Meta,
    Prompt, Resource, Tool,
};
use proptest::prelude::*;
use serde_json::Value;

#[derive(Debug, Clone)]
struct GroupStep {
    parent: usize,
    name: String,
    title: Option<String>,
    meta: Option<Meta>,
}

/// One entity, identified by kind and index, with optional `_meta`.
#[derive(Debug, Clone)]
struct EntitySpec {
    kind: u8,
    index: usize,
    meta: Option<Meta>,
}

#[derive(Debug, Clone)]
struct TreeScenario {
    steps: Vec<GroupStep>,
    memberships: Vec<(usize, EntitySpec)>,
    ungrouped: Vec<EntitySpec>,
}

/// Metadata maps, the empty map included.
fn meta_strategy() -> impl Strategy<Value = Meta> {
    prop::collection::btree_map("[a-z]{1,4}", any::<i32>(), 0..3).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()
    })
}

fn group_step_strategy() -> impl Strategy<Value = GroupStep> {
    (
        any::<usize>(),
        "[a-z]{1,6}",
        proptest::option::of("[A-Za-z ]{1,12}"),
        proptest::option::of(meta_strategy()),
    )
        .prop_map(|(parent, name, title, meta)| GroupStep {
            parent,
            name,
            title,
            meta,
        })
}

fn entity_strategy() -> impl Strategy<Value = EntitySpec> {
    (0u8..3, 0usize..6, proptest::option::of(meta_strategy()))
        .prop_map(|(kind, index, meta)| EntitySpec { kind, index, meta })
}

fn tree_scenario_strategy() -> impl Strategy<Value = TreeScenario> {
    (
        prop::collection::vec(group_step_strategy(), 1..24),
        prop::collection::vec((any::<usize>(), entity_strategy()), 0..20),
        prop::collection::vec(entity_strategy(), 0..4),
    )
        .prop_map(|(steps, memberships, ungrouped)| TreeScenario {
            steps,
            memberships,
            ungrouped,
        })
}

fn make_entity(spec: &EntitySpec) -> Entity {
    let meta = spec.meta.clone().unwrap_or_default();
    match spec.kind {
        0 => Tool::new(format!("tool_{}", spec.index)).with_meta(meta).into(),
        1 => Prompt::new(format!("prompt_{}", spec.index))
            .with_meta(meta)
            .into(),
        _ => Resource::new(
            format!("file:///docs/{}.md", spec.index),
            format!("doc_{}", spec.index),
        )
        .with_meta(meta)
        .into(),
    }
}

/// Build a tree from a scenario, returning the ids that were created.
fn build(scenario: &TreeScenario) -> (GroupTree, Vec<GroupId>) {
    let mut tree = GroupTree::new();
    let mut ids: Vec<GroupId> = Vec::new();

    for step in &scenario.steps {
        // Slot 0 means "root", slot i means ids[i - 1]
        let slot = step.parent % (ids.len() + 1);
        let parent = slot.checked_sub(1).map(|i| ids[i]);

        let mut group = Group::new(step.name.clone());
        if let Some(title) = &step.title {
            group = group.with_title(title.clone());
        }
        if let Some(meta) = &step.meta {
            group = group.with_meta(meta.clone());
        }
        if let Ok(id) = tree.create_group(group, parent) {
            ids.push(id);
        }
    }

    for spec in &scenario.ungrouped {
        tree.register(make_entity(spec));
    }

    for (group, spec) in &scenario.memberships {
        if ids.is_empty() {
            break;
        }
        let id = ids[group % ids.len()];
        tree.add_member(id, make_entity(spec)).expect("group exists");
    }

    (tree, ids)
}

proptest! {
    #[test]
    fn test_fqn_resolves_back_to_group(scenario in tree_scenario_strategy()) {
        let (tree, ids) = build(&scenario);
        for id in ids {
            let fqn = tree.fully_qualified_name(id).unwrap();
            prop_assert_eq!(tree.find_by_fqn(&fqn), Some(id));
        }
    }

    #[test]
    fn test_parent_chains_terminate(scenario in tree_scenario_strategy()) {
        let (tree, ids) = build(&scenario);
        for id in ids {
            let depth = tree.ancestors(id).unwrap().count();
            prop_assert!(depth < tree.len());
            let root = tree.root_of(id).unwrap();
            prop_assert!(tree.is_root(root).unwrap());
        }
    }

    #[test]
    fn test_reparent_under_descendant_always_fails(scenario in tree_scenario_strategy()) {
        let (mut tree, ids) = build(&scenario);
        let before = tree.clone();

        for id in ids {
            let below: Vec<GroupId> = tree.descendants(id).unwrap().collect();
            for descendant in below.into_iter().chain(std::iter::once(id)) {
                prop_assert!(tree.set_parent(id, Some(descendant)).is_err());
            }
        }
        prop_assert_eq!(tree, before);
    }

    #[test]
    fn test_walk_visits_every_group_once(scenario in tree_scenario_strategy()) {
        let (tree, _) = build(&scenario);
        let mut visited: Vec<GroupId> = tree.walk().collect();
        prop_assert_eq!(visited.len(), tree.len());
        visited.sort();
        visited.dedup();
        prop_assert_eq!(visited.len(), tree.len());
    }

    #[test]
    fn test_json_round_trip(scenario in tree_scenario_strategy()) {
        let (tree, _) = build(&scenario);
        let converter = JsonConverter::default();
        let restored: GroupTree = converter.from_external(&converter.to_external(&tree)).unwrap();
        prop_assert_eq!(restored, tree);
    }

    #[test]
    fn test_flat_round_trip(scenario in tree_scenario_strategy()) {
        let (tree, _) = build(&scenario);
        let converter = FlatConverter::default();
        let restored: GroupTree = converter.from_external(&converter.to_external(&tree)).unwrap();
        prop_assert_eq!(restored.listing_version(), tree.listing_version());
        prop_assert_eq!(restored, tree);
    }

    #[test]
    fn test_add_member_is_idempotent(scenario in tree_scenario_strategy(), tool in 0usize..6) {
        let (mut tree, ids) = build(&scenario);
        let tool_name = format!("tool_{}", tool);
        for id in ids {
            tree.add_member(id, Tool::new(tool_name.clone())).unwrap();
            let once = tree.member_keys(id).unwrap().len();
            prop_assert!(!tree.add_member(id, Tool::new(tool_name.clone())).unwrap());
            prop_assert_eq!(tree.member_keys(id).unwrap().len(), once);
            prop_assert!(tree.groups_of(&MemberKey::tool(tool_name.clone())).contains(&id));
        }
    }
}
