//! Flat row document converter.
//!
//! This format suits configuration files and tabular stores: groups are
//! rows that point at their parent by row id, and memberships are explicit
//! edges.
//!
//! ```json
//! {
//!   "groups": [
//!     {"id": "g0", "name": "com"},
//!     {"id": "g1", "name": "api", "parent": "g0", "title": "API"}
//!   ],
//!   "tools": [{"name": "search"}],
//!   "prompts": [],
//!   "resources": [],
//!   "memberships": [{"group": "g1", "kind": "tool", "id": "search"}]
//! }
//! ```
//!
//! Since parent references are free-form, a document can describe a cycle;
//! import detects it before creating anything.

use super::{Converter, decode, to_value};
use crate::config::TreeConfig;
use crate::entity::{Entity, EntityKind, MemberKey, Prompt, Resource, Tool};
use crate::error::{GroupError, GroupResult, SchemaViolation};
use crate::group::{Group, GroupId};
use crate::schema::types::{
    GROUP_ROW, MEMBERSHIP_ROW, ObjectSchema, PROMPT_OBJECT, RESOURCE_OBJECT, TOOL_OBJECT,
};
use crate::schema::validation::{
    array_field, expect_object, field_path, index_path, validate_object,
};
use crate::tree::GroupTree;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Converter for the flat row document.
#[derive(Debug, Clone, Default)]
pub struct FlatConverter {
    config: TreeConfig,
}

/// A validated group row.
struct Row<'a> {
    index: usize,
    name: &'a str,
    parent: Option<&'a str>,
    fields: &'a Map<String, Value>,
}

impl FlatConverter {
    /// # Errors
    ///
    /// Returns [`GroupError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: TreeConfig) -> GroupResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    fn export_row(tree: &GroupTree, id: GroupId) -> Option<Value> {
        let group = tree.get(id)?;
        let mut row = Map::new();
        row.insert("id".to_string(), Value::from(id.to_string()));
        row.insert("name".to_string(), Value::from(group.name()));
        if let Ok(Some(parent)) = tree.parent(id) {
            row.insert("parent".to_string(), Value::from(parent.to_string()));
        }
        if let Some(title) = group.title() {
            row.insert("title".to_string(), Value::from(title));
        }
        if let Some(description) = group.description() {
            row.insert("description".to_string(), Value::from(description));
        }
        if let Some(meta) = group.meta() {
            row.insert("_meta".to_string(), Value::Object(meta.clone()));
        }
        Some(Value::Object(row))
    }

    /// Validate group rows and index them by row id.
    fn read_rows<'a>(&self, rows: &'a [Value]) -> GroupResult<BTreeMap<&'a str, Row<'a>>> {
        let mut by_id = BTreeMap::new();
        for (index, value) in rows.iter().enumerate() {
            let path = index_path("groups", index);
            let fields = validate_object(&GROUP_ROW, value, &path, self.config.allow_unknown_fields)?;

            let id = str_field(fields, "id");
            let row = Row {
                index,
                name: str_field(fields, "name"),
                parent: fields.get("parent").and_then(Value::as_str),
                fields,
            };
            if by_id.insert(id, row).is_some() {
                return Err(SchemaViolation::DuplicateRowId {
                    path,
                    id: id.to_string(),
                }
                .into());
            }
        }

        for row in by_id.values() {
            if let Some(parent) = row.parent {
                if !by_id.contains_key(parent) {
                    return Err(SchemaViolation::unknown_reference(
                        field_path(&index_path("groups", row.index), "parent"),
                        "group row",
                        parent,
                    )
                    .into());
                }
            }
        }

        Ok(by_id)
    }

    /// Fail with `Cycle` if following parent references from any row
    /// comes back around.
    fn check_acyclic(rows: &BTreeMap<&str, Row<'_>>) -> GroupResult<()> {
        for (start, row) in rows {
            let mut current = row.parent;
            let mut steps = 0;
            while let Some(parent) = current {
                if parent == *start || steps > rows.len() {
                    let parent_name = rows.get(parent).map_or(parent, |p| p.name);
                    return Err(GroupError::cycle(row.name, parent_name));
                }
                current = rows.get(parent).and_then(|p| p.parent);
                steps += 1;
            }
        }
        Ok(())
    }

    /// Create groups in document order, creating missing ancestors first.
    fn create_groups<'a>(
        &self,
        tree: &mut GroupTree,
        rows: &BTreeMap<&'a str, Row<'a>>,
    ) -> GroupResult<BTreeMap<&'a str, GroupId>> {
        let mut ordered: Vec<(&'a str, &Row<'a>)> = rows.iter().map(|(id, row)| (*id, row)).collect();
        ordered.sort_by_key(|(_, row)| row.index);

        let mut created: BTreeMap<&'a str, GroupId> = BTreeMap::new();
        for (row_id, _) in ordered {
            // Collect uncreated ancestors, nearest first
            let mut pending = Vec::new();
            let mut current = Some(row_id);
            while let Some(id) = current {
                if created.contains_key(id) {
                    break;
                }
                pending.push(id);
                current = rows.get(id).and_then(|row| row.parent);
            }

            for id in pending.into_iter().rev() {
                let Some(row) = rows.get(id) else { continue };
                let parent = row.parent.and_then(|p| created.get(p).copied());
                let group_id = tree.create_group(row_group(row), parent)?;
                created.insert(id, group_id);
            }
        }
        Ok(created)
    }

    fn import_entities<D>(
        &self,
        tree: &mut GroupTree,
        payload: &Map<String, Value>,
        field: &str,
        schema: &ObjectSchema,
    ) -> GroupResult<()>
    where
        D: DeserializeOwned + Into<Entity>,
    {
        for (i, item) in array_field(payload, "", field)?.iter().enumerate() {
            let path = index_path(field, i);
            validate_object(schema, item, &path, true)?;
            let record: D = decode(item.clone(), &path)?;
            tree.register(record);
        }
        Ok(())
    }

    fn import_memberships(
        &self,
        tree: &mut GroupTree,
        payload: &Map<String, Value>,
        created: &BTreeMap<&str, GroupId>,
    ) -> GroupResult<()> {
        for (i, item) in array_field(payload, "", "memberships")?.iter().enumerate() {
            let path = index_path("memberships", i);
            let fields = validate_object(&MEMBERSHIP_ROW, item, &path, true)?;

            let row_id = str_field(fields, "group");
            let group = created.get(row_id).copied().ok_or_else(|| {
                SchemaViolation::unknown_reference(field_path(&path, "group"), "group row", row_id)
            })?;

            let kind: EntityKind = decode(
                fields.get("kind").cloned().unwrap_or_default(),
                &field_path(&path, "kind"),
            )?;
            let key = MemberKey::new(kind, str_field(fields, "id"));
            if tree.entity(&key).is_none() {
                return Err(SchemaViolation::unknown_reference(
                    field_path(&path, "id"),
                    key.kind.as_str(),
                    key.id.clone(),
                )
                .into());
            }
            tree.add_member_key(group, &key)?;
        }
        Ok(())
    }
}

/// Read a string field already checked by `validate_object`.
fn str_field<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn row_group(row: &Row<'_>) -> Group {
    let mut group = Group::new(row.name);
    group.set_title(
        row.fields
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string),
    );
    group.set_description(
        row.fields
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
    );
    group.set_meta(row.fields.get("_meta").and_then(Value::as_object).cloned());
    group
}

impl Converter<GroupTree, Value> for FlatConverter {
    fn to_external(&self, tree: &GroupTree) -> Value {
        let mut groups = Vec::new();
        let mut memberships = Vec::new();
        for id in tree.walk() {
            groups.extend(Self::export_row(tree, id));
            for key in tree.member_keys(id).unwrap_or_default() {
                memberships.push(json!({
                    "group": id.to_string(),
                    "kind": key.kind.as_str(),
                    "id": key.id,
                }));
            }
        }

        let mut tools = Vec::new();
        let mut prompts = Vec::new();
        let mut resources = Vec::new();
        for entity in tree.entities() {
            match entity {
                Entity::Tool(tool) => tools.push(to_value(tool)),
                Entity::Prompt(prompt) => prompts.push(to_value(prompt)),
                Entity::Resource(resource) => resources.push(to_value(resource)),
            }
        }

        debug!(
            "Exported flat document with {} row(s) and {} membership edge(s)",
            groups.len(),
            memberships.len()
        );

        json!({
            "groups": groups,
            "tools": tools,
            "prompts": prompts,
            "resources": resources,
            "memberships": memberships,
        })
    }

    fn from_external(&self, payload: &Value) -> GroupResult<GroupTree> {
        let obj = expect_object(payload, "$")?;
        let mut tree = GroupTree::with_config(self.config.clone())?;

        let rows = self.read_rows(array_field(obj, "", "groups")?)?;
        Self::check_acyclic(&rows)?;
        let created = self.create_groups(&mut tree, &rows)?;

        self.import_entities::<Tool>(&mut tree, obj, "tools", &TOOL_OBJECT)?;
        self.import_entities::<Prompt>(&mut tree, obj, "prompts", &PROMPT_OBJECT)?;
        self.import_entities::<Resource>(&mut tree, obj, "resources", &RESOURCE_OBJECT)?;
        self.import_memberships(&mut tree, obj, &created)?;

        debug!("Imported flat document with {} group(s)", tree.len());
        Ok(tree)
    }
}
