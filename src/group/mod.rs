//! Group records and identifiers.
//!
//! A [`Group`] holds the descriptive fields of a folder-like node: its name,
//! optional display strings and opaque metadata. It carries no links of its
//! own. Parent/child structure and membership live in
//! [`GroupTree`](crate::tree::GroupTree), which hands out [`GroupId`]s.
//!
//! The name is fixed once the record is built; renaming a group that is part
//! of a tree goes through [`GroupTree::rename`](crate::tree::GroupTree::rename)
//! so the naming invariants are rechecked.

pub mod naming;

use crate::entity::Meta;
use std::fmt;

/// Arena key of a group inside one [`GroupTree`](crate::tree::GroupTree).
///
/// Ids are never reused within a tree, so a stale id of a deleted group
/// simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(u64);

impl GroupId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value of the id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Descriptive fields of a group node.
///
/// # Examples
///
/// ```rust
/// use mcp_groups::group::Group;
///
/// let group = Group::new("api")
///     .with_title("Public API")
///     .with_description("Tools exposed to every client");
///
/// assert_eq!(group.name(), "api");
/// assert_eq!(group.title(), Some("Public API"));
/// assert!(group.meta().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    name: String,
    title: Option<String>,
    description: Option<String>,
    meta: Option<Meta>,
}

impl Group {
    /// Create a group record.
    ///
    /// The name is validated when the record is inserted into a tree, since
    /// the forbidden separator is a property of the tree's configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            meta: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_meta(&mut self, meta: Option<Meta>) {
        self.meta = meta;
    }

    /// Mutable access to the metadata map, creating it if absent.
    pub fn meta_mut(&mut self) -> &mut Meta {
        self.meta.get_or_insert_with(Meta::new)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
