//! Entity records that groups can contain.
//!
//! Tools, prompts and resources are self-contained descriptors. None of them
//! knows which groups it belongs to: membership is a separate many-to-many
//! relation kept by [`GroupTree`](crate::tree::GroupTree), keyed by each
//! entity's identity ([`MemberKey`]).
//!
//! ## Identity
//!
//! - Tools and prompts are identified by `name`
//! - Resources are identified by `uri`
//!
//! Two records with the same identity are the same entity for membership
//! purposes, even when their descriptive fields differ.
//!
//! ```rust
//! use mcp_groups::entity::{Entity, EntityKind, MemberKey, Tool};
//!
//! let first = Entity::from(Tool::new("search").with_description("v1"));
//! let second = Entity::from(Tool::new("search").with_description("v2"));
//!
//! assert_eq!(first.key(), second.key());
//! assert_eq!(first.key(), MemberKey::tool("search"));
//! assert_eq!(first.kind(), EntityKind::Tool);
//! ```

mod icon;
mod prompt;
mod resource;
mod tool;

pub use icon::Icon;
pub use prompt::{ArgumentType, Prompt, PromptArgument};
pub use resource::{Annotations, Resource, Role};
pub use tool::{Tool, ToolAnnotations};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Open extension metadata carried as `_meta` on the wire.
///
/// Keys and values are preserved opaquely through every conversion.
/// On tools, prompts and resources an empty map is the same as no `_meta`
/// at all and is stored as `None`.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Canonical form of entity metadata: `None` for an empty map.
pub(crate) fn non_empty(meta: Meta) -> Option<Meta> {
    if meta.is_empty() { None } else { Some(meta) }
}

pub(crate) fn deserialize_meta<'de, D>(deserializer: D) -> Result<Option<Meta>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Meta>::deserialize(deserializer)?.and_then(non_empty))
}

/// The kind of entity a membership edge points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Tool,
    Prompt,
    Resource,
}

impl EntityKind {
    /// Lowercase wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Tool => "tool",
            EntityKind::Prompt => "prompt",
            EntityKind::Resource => "resource",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an entity within a tree's catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberKey {
    /// Entity kind
    pub kind: EntityKind,
    /// Tool or prompt name, or resource URI
    pub id: String,
}

impl MemberKey {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn tool(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Tool, name)
    }

    pub fn prompt(name: impl Into<String>) -> Self {
        Self::new(EntityKind::Prompt, name)
    }

    pub fn resource(uri: impl Into<String>) -> Self {
        Self::new(EntityKind::Resource, uri)
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Any entity that can be a group member.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Tool(Tool),
    Prompt(Prompt),
    Resource(Resource),
}

impl Entity {
    /// Membership identity of this entity.
    pub fn key(&self) -> MemberKey {
        match self {
            Entity::Tool(tool) => MemberKey::tool(tool.name()),
            Entity::Prompt(prompt) => MemberKey::prompt(prompt.name()),
            Entity::Resource(resource) => MemberKey::resource(resource.uri()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Tool(_) => EntityKind::Tool,
            Entity::Prompt(_) => EntityKind::Prompt,
            Entity::Resource(_) => EntityKind::Resource,
        }
    }

    /// Human-readable name (resources report their name, not their URI).
    pub fn name(&self) -> &str {
        match self {
            Entity::Tool(tool) => tool.name(),
            Entity::Prompt(prompt) => prompt.name(),
            Entity::Resource(resource) => resource.name(),
        }
    }

    pub fn as_tool(&self) -> Option<&Tool> {
        match self {
            Entity::Tool(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_prompt(&self) -> Option<&Prompt> {
        match self {
            Entity::Prompt(prompt) => Some(prompt),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Entity::Resource(resource) => Some(resource),
            _ => None,
        }
    }
}

impl From<Tool> for Entity {
    fn from(tool: Tool) -> Self {
        Entity::Tool(tool)
    }
}

impl From<Prompt> for Entity {
    fn from(prompt: Prompt) -> Self {
        Entity::Prompt(prompt)
    }
}

impl From<Resource> for Entity {
    fn from(resource: Resource) -> Self {
        Entity::Resource(resource)
    }
}
