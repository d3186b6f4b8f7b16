//! Wire shape of a group.

use crate::entity::Meta;
use crate::group::Group;
use serde::{Deserialize, Serialize};

/// A group as it appears on the wire.
///
/// Unlike [`Group`], a descriptor is self-describing: it embeds its parent
/// descriptor, so a receiver can rebuild the whole ancestor chain from a
/// single object.
///
/// # Examples
///
/// ```rust
/// use mcp_groups::schema::GroupDescriptor;
/// use serde_json::json;
///
/// let api = GroupDescriptor::new("api").with_parent(GroupDescriptor::new("com"));
/// assert_eq!(
///     serde_json::to_value(&api).unwrap(),
///     json!({"name": "api", "parent": {"name": "com"}})
/// );
/// assert_eq!(api.path(), vec!["com", "api"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<GroupDescriptor>>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl GroupDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            parent: None,
            meta: None,
        }
    }

    pub fn with_parent(mut self, parent: GroupDescriptor) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Names from the root down to this descriptor.
    pub fn path(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(self);
        while let Some(descriptor) = current {
            names.push(descriptor.name.as_str());
            current = descriptor.parent.as_deref();
        }
        names.reverse();
        names
    }

    /// Chain of descriptors from the root down to this one.
    pub fn chain(&self) -> Vec<&GroupDescriptor> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(descriptor) = current {
            chain.push(descriptor);
            current = descriptor.parent.as_deref();
        }
        chain.reverse();
        chain
    }

    /// The descriptive part of this descriptor as a detached [`Group`].
    pub fn to_group(&self) -> Group {
        let mut group = Group::new(self.name.clone());
        group.set_title(self.title.clone());
        group.set_description(self.description.clone());
        group.set_meta(self.meta.clone());
        group
    }

    /// Descriptor of a detached group, without parent.
    pub fn from_group(group: &Group) -> Self {
        Self {
            name: group.name().to_string(),
            title: group.title().map(str::to_string),
            description: group.description().map(str::to_string),
            parent: None,
            meta: group.meta().cloned(),
        }
    }
}
