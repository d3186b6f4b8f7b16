//! Test data builders for group trees and listing payloads.
//!
//! `TreeBuilder` creates groups by fully qualified name so tests can describe
//! a hierarchy in one line per group. `ListingBuilder` assembles raw JSON
//! listing payloads, including broken ones.

use mcp_groups::{GROUPS_META_KEY, Group, GroupId, GroupTree, Prompt, Resource, Tool};
use serde_json::{Map, Value, json};

/// Fluent builder for `GroupTree` values.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    tree: GroupTree,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure every group along `fqn` exists, creating missing ones.
    pub fn group(mut self, fqn: &str) -> Self {
        self.ensure(fqn);
        self
    }

    /// Create the group at `fqn` with a title on its last segment.
    pub fn titled_group(mut self, fqn: &str, title: &str) -> Self {
        let id = self.ensure(fqn);
        self.tree
            .group_mut(id)
            .expect("group was just created")
            .set_title(Some(title.to_string()));
        self
    }

    pub fn tool(mut self, fqn: &str, name: &str) -> Self {
        let id = self.ensure(fqn);
        self.tree
            .add_member(id, Tool::new(name))
            .expect("group exists");
        self
    }

    pub fn prompt(mut self, fqn: &str, name: &str) -> Self {
        let id = self.ensure(fqn);
        self.tree
            .add_member(id, Prompt::new(name))
            .expect("group exists");
        self
    }

    pub fn resource(mut self, fqn: &str, uri: &str, name: &str) -> Self {
        let id = self.ensure(fqn);
        self.tree
            .add_member(id, Resource::new(uri, name))
            .expect("group exists");
        self
    }

    pub fn build(self) -> GroupTree {
        self.tree
    }

    fn ensure(&mut self, fqn: &str) -> GroupId {
        let mut parent: Option<GroupId> = None;
        for name in fqn.split('.') {
            let id = match self.tree.find_child(parent, name) {
                Some(existing) => existing,
                None => self
                    .tree
                    .create_group(Group::new(name), parent)
                    .unwrap_or_else(|e| panic!("Failed to create '{}': {}", fqn, e)),
            };
            parent = Some(id);
        }
        parent.expect("fqn has at least one segment")
    }
}

/// Builder for raw JSON listing payloads.
#[derive(Debug, Clone)]
pub struct ListingBuilder {
    data: Map<String, Value>,
}

impl ListingBuilder {
    /// Start from an empty listing with all four arrays present.
    pub fn new() -> Self {
        let mut data = Map::new();
        for field in ["groups", "tools", "prompts", "resources"] {
            data.insert(field.to_string(), json!([]));
        }
        Self { data }
    }

    /// Add a raw group object.
    pub fn group(mut self, group: Value) -> Self {
        self.push("groups", group);
        self
    }

    /// Add a tool that belongs to the given groups.
    pub fn tool_in(mut self, name: &str, groups: &[&str]) -> Self {
        self.push(
            "tools",
            json!({"name": name, "_meta": {GROUPS_META_KEY: groups}}),
        );
        self
    }

    /// Add a raw entity object to one of the entity arrays.
    pub fn entity(mut self, field: &str, entity: Value) -> Self {
        self.push(field, entity);
        self
    }

    /// Replace or add a top-level field.
    pub fn with_field(mut self, field: &str, value: Value) -> Self {
        self.data.insert(field.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.data)
    }

    fn push(&mut self, field: &str, value: Value) {
        if let Some(Value::Array(items)) = self.data.get_mut(field) {
            items.push(value);
        }
    }
}

impl Default for ListingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
