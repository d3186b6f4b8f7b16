//! JSON listing payload converter.
//!
//! The listing payload has one array per record kind:
//!
//! ```json
//! {
//!   "groups":    [{"name": "api", "parent": {"name": "com"}}],
//!   "tools":     [{"name": "search", "_meta": {"org.openmcptools.extensions.groups": ["com.api"]}}],
//!   "prompts":   [],
//!   "resources": []
//! }
//! ```
//!
//! Groups are listed in depth-first pre-order and embed their whole parent
//! chain. Entities carry the fully qualified names of their groups in
//! `_meta` under [`GROUPS_META_KEY`]; that key is reserved and is stripped
//! again on import, every other `_meta` entry is kept as is.

use super::{Converter, decode, to_value};
use crate::config::TreeConfig;
use crate::entity::{Entity, Prompt, Resource, Tool};
use crate::error::{GroupError, GroupResult, SchemaViolation};
use crate::group::{GroupId, naming};
use crate::schema::types::{ObjectSchema, PROMPT_OBJECT, RESOURCE_OBJECT, TOOL_OBJECT};
use crate::schema::validation::{
    array_field, expect_object, field_path, index_path, membership_names, validate_group_object,
    validate_object,
};
use crate::schema::{GROUPS_META_KEY, GroupDescriptor};
use crate::tree::GroupTree;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

/// Converter for the JSON listing payload and its individual records.
#[derive(Debug, Clone, Default)]
pub struct JsonConverter {
    config: TreeConfig,
}

impl JsonConverter {
    /// Create a converter; imported trees use the same configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: TreeConfig) -> GroupResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Converter matching an existing tree's configuration.
    ///
    /// Membership FQNs are written with the converter's separator. A tree
    /// whose group names contain that separator only round-trips through a
    /// converter built here.
    pub fn for_tree(tree: &GroupTree) -> Self {
        Self {
            config: tree.config().clone(),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Describe one group with its parent chain embedded.
    pub fn describe(&self, tree: &GroupTree, id: GroupId) -> GroupResult<GroupDescriptor> {
        let mut chain: Vec<GroupId> = tree.ancestors(id)?.collect();
        chain.reverse();
        chain.push(id);

        let mut descriptor: Option<GroupDescriptor> = None;
        for link in chain {
            let group = tree
                .get(link)
                .ok_or_else(|| GroupError::group_not_found(link))?;
            let mut current = GroupDescriptor::from_group(group);
            current.parent = descriptor.map(Box::new);
            descriptor = Some(current);
        }

        descriptor.ok_or_else(|| GroupError::group_not_found(id))
    }

    /// Fully qualified name of a group using this converter's separator.
    fn qualified_name(&self, tree: &GroupTree, id: GroupId) -> GroupResult<String> {
        let mut names = Vec::new();
        for link in std::iter::once(id).chain(tree.ancestors(id)?) {
            if let Some(group) = tree.get(link) {
                names.push(group.name());
            }
        }
        names.reverse();
        Ok(naming::join(&names, &self.config.separator))
    }

    fn export_entity(&self, tree: &GroupTree, entity: &Entity) -> Value {
        let mut value = match entity {
            Entity::Tool(tool) => to_value(tool),
            Entity::Prompt(prompt) => to_value(prompt),
            Entity::Resource(resource) => to_value(resource),
        };

        let key = entity.key();
        let mut names: Vec<String> = tree
            .groups_of(&key)
            .into_iter()
            .filter_map(|group| self.qualified_name(tree, group).ok())
            .collect();
        names.sort();

        let reserved = value
            .get("_meta")
            .and_then(|meta| meta.get(GROUPS_META_KEY))
            .is_some();
        if names.is_empty() && !reserved {
            return value;
        }
        if reserved {
            warn!(
                "{} carries reserved _meta key '{}'; replacing it with its memberships",
                key, GROUPS_META_KEY
            );
        }

        if let Some(obj) = value.as_object_mut() {
            let meta = obj
                .entry("_meta")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(meta) = meta {
                if names.is_empty() {
                    meta.remove(GROUPS_META_KEY);
                } else {
                    meta.insert(GROUPS_META_KEY.to_string(), Value::from(names));
                }
            }
        }
        value
    }

    /// Find or create every link of a descriptor's chain, root first.
    ///
    /// The descriptor's own fields win over those of an earlier embedded
    /// copy of the same group.
    fn import_group(&self, tree: &mut GroupTree, descriptor: &GroupDescriptor) -> GroupResult<GroupId> {
        let chain = descriptor.chain();
        let leaf = chain.len().saturating_sub(1);

        let mut parent: Option<GroupId> = None;
        for (depth, link) in chain.into_iter().enumerate() {
            let id = match tree.find_child(parent, &link.name) {
                Some(existing) => {
                    if depth == leaf {
                        if let Some(group) = tree.group_mut(existing) {
                            group.set_title(link.title.clone());
                            group.set_description(link.description.clone());
                            group.set_meta(link.meta.clone());
                        }
                    }
                    existing
                }
                None => tree.create_group(link.to_group(), parent)?,
            };
            parent = Some(id);
        }

        parent.ok_or_else(|| {
            SchemaViolation::missing_required("groups", "name").into()
        })
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
            let groups = membership_names(item, &path)?;

            let record: D = decode(strip_memberships(item.clone()), &path)?;
            let entity: Entity = record.into();
            let key = entity.key();
            if tree.register(entity).is_some() {
                warn!("{} lists {} more than once; keeping the last record", path, key);
            }

            let meta_path = field_path(&field_path(&path, "_meta"), GROUPS_META_KEY);
            for name in groups {
                let group = tree.find_by_fqn(name).ok_or_else(|| {
                    SchemaViolation::unknown_reference(meta_path.clone(), "group", name)
                })?;
                tree.add_member_key(group, &key)?;
            }
        }
        Ok(())
    }
}

/// Remove the reserved membership key from an entity's `_meta`, dropping
/// `_meta` entirely if nothing else was in it.
fn strip_memberships(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let emptied = match obj.get_mut("_meta") {
            Some(Value::Object(meta)) => meta.remove(GROUPS_META_KEY).is_some() && meta.is_empty(),
            _ => false,
        };
        if emptied {
            obj.remove("_meta");
        }
    }
    value
}

impl Converter<GroupTree, Value> for JsonConverter {
    fn to_external(&self, tree: &GroupTree) -> Value {
        if tree.separator() != self.config.separator {
            warn!(
                "Exporting a tree that uses separator '{}' with separator '{}'; \
                 use JsonConverter::for_tree to keep memberships importable",
                tree.separator(),
                self.config.separator
            );
        }

        let groups: Vec<Value> = tree
            .walk()
            .filter_map(|id| self.describe(tree, id).ok())
            .map(|descriptor| to_value(&descriptor))
            .collect();

        let mut tools = Vec::new();
        let mut prompts = Vec::new();
        let mut resources = Vec::new();
        for entity in tree.entities() {
            let value = self.export_entity(tree, entity);
            match entity {
                Entity::Tool(_) => tools.push(value),
                Entity::Prompt(_) => prompts.push(value),
                Entity::Resource(_) => resources.push(value),
            }
        }

        debug!(
            "Exported listing with {} group(s), {} tool(s), {} prompt(s), {} resource(s)",
            groups.len(),
            tools.len(),
            prompts.len(),
            resources.len()
        );

        json!({
            "groups": groups,
            "tools": tools,
            "prompts": prompts,
            "resources": resources,
        })
    }

    fn from_external(&self, payload: &Value) -> GroupResult<GroupTree> {
        let obj = expect_object(payload, "$")?;
        let mut tree = GroupTree::with_config(self.config.clone())?;

        for (i, item) in array_field(obj, "", "groups")?.iter().enumerate() {
            let path = index_path("groups", i);
            validate_group_object(item, &path, self.config.allow_unknown_fields)?;
            let descriptor: GroupDescriptor = decode(item.clone(), &path)?;
            self.import_group(&mut tree, &descriptor)?;
        }

        self.import_entities::<Tool>(&mut tree, obj, "tools", &TOOL_OBJECT)?;
        self.import_entities::<Prompt>(&mut tree, obj, "prompts", &PROMPT_OBJECT)?;
        self.import_entities::<Resource>(&mut tree, obj, "resources", &RESOURCE_OBJECT)?;

        debug!(
            "Imported listing with {} group(s) and {} entit(ies)",
            tree.len(),
            tree.entities().count()
        );
        Ok(tree)
    }
}

impl Converter<GroupDescriptor, Value> for JsonConverter {
    fn to_external(&self, descriptor: &GroupDescriptor) -> Value {
        to_value(descriptor)
    }

    /// Decode a group object, checking every name in its parent chain.
    fn from_external(&self, value: &Value) -> GroupResult<GroupDescriptor> {
        validate_group_object(value, "$", self.config.allow_unknown_fields)?;
        let descriptor: GroupDescriptor = decode(value.clone(), "$")?;
        for link in descriptor.chain() {
            naming::validate_name(&link.name, &self.config.separator)?;
        }
        Ok(descriptor)
    }
}

impl Converter<Tool, Value> for JsonConverter {
    fn to_external(&self, tool: &Tool) -> Value {
        to_value(tool)
    }

    fn from_external(&self, value: &Value) -> GroupResult<Tool> {
        validate_object(&TOOL_OBJECT, value, "$", true)?;
        Ok(decode(value.clone(), "$")?)
    }
}

impl Converter<Prompt, Value> for JsonConverter {
    fn to_external(&self, prompt: &Prompt) -> Value {
        to_value(prompt)
    }

    fn from_external(&self, value: &Value) -> GroupResult<Prompt> {
        validate_object(&PROMPT_OBJECT, value, "$", true)?;
        Ok(decode(value.clone(), "$")?)
    }
}

impl Converter<Resource, Value> for JsonConverter {
    fn to_external(&self, resource: &Resource) -> Value {
        to_value(resource)
    }

    fn from_external(&self, value: &Value) -> GroupResult<Resource> {
        validate_object(&RESOURCE_OBJECT, value, "$", true)?;
        Ok(decode(value.clone(), "$")?)
    }
}
