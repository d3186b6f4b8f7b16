//! The group tree: structure, naming and membership in one registry.
//!
//! [`GroupTree`] owns every group node and every catalogued entity. Nodes are
//! kept in an arena keyed by [`GroupId`]:
//!
//! * the child → parent link is a plain id and never owns anything
//! * each node's children list is the owning direction of the tree
//! * membership is a many-to-many relation between group ids and
//!   [`MemberKey`]s, indexed in both directions
//!
//! # Invariants
//!
//! * Following parent links always reaches a root (no cycles)
//! * Sibling names are unique, and so are root names, so every fully
//!   qualified name resolves to at most one group
//! * No group name is empty or contains the configured separator
//!
//! Every mutating operation checks its invariant before touching any state,
//! so a failed call leaves the tree unchanged.
//!
//! # Concurrency
//!
//! The tree is a plain synchronous data structure. Hosts that share one tree
//! across threads wrap it in a lock (for example `std::sync::RwLock`) so that
//! structural mutations are serialized and never interleave with reads.
//!
//! # Examples
//!
//! ```rust
//! use mcp_groups::group::Group;
//! use mcp_groups::tree::GroupTree;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = GroupTree::new();
//! let com = tree.create_group(Group::new("com"), None)?;
//! let example = tree.create_group(Group::new("example"), Some(com))?;
//! let api = tree.create_group(Group::new("api"), Some(example))?;
//!
//! assert_eq!(tree.fully_qualified_name(api)?, "com.example.api");
//! assert_eq!(tree.find_by_fqn("com.example"), Some(example));
//!
//! // Re-parenting a group under its own descendant is rejected
//! assert!(tree.set_parent(com, Some(api)).is_err());
//! # Ok(())
//! # }
//! ```

mod iter;
mod membership;
mod structure;

pub use iter::{Ancestors, Descendants};

use crate::config::TreeConfig;
use crate::entity::{Entity, MemberKey};
use crate::error::{GroupError, GroupResult};
use crate::group::{Group, GroupId, naming};
use log::trace;
use std::collections::{BTreeMap, BTreeSet};

/// A group plus its structural links and membership set.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) group: Group,
    pub(crate) parent: Option<GroupId>,
    pub(crate) children: Vec<GroupId>,
    pub(crate) members: BTreeSet<MemberKey>,
}

/// Registry of groups, their hierarchy and their members.
#[derive(Debug, Clone)]
pub struct GroupTree {
    config: TreeConfig,
    nodes: BTreeMap<GroupId, Node>,
    roots: Vec<GroupId>,
    next_id: u64,
    // Entity records by identity
    catalog: BTreeMap<MemberKey, Entity>,
    // Reverse membership index: entity -> groups
    memberships: BTreeMap<MemberKey, BTreeSet<GroupId>>,
}

impl Default for GroupTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupTree {
    /// Create an empty tree using the default configuration.
    pub fn new() -> Self {
        Self {
            config: TreeConfig::default(),
            nodes: BTreeMap::new(),
            roots: Vec::new(),
            next_id: 0,
            catalog: BTreeMap::new(),
            memberships: BTreeMap::new(),
        }
    }

    /// Create an empty tree with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::InvalidConfig`] if the configuration is invalid.
    pub fn with_config(config: TreeConfig) -> GroupResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Separator used for fully qualified names.
    pub fn separator(&self) -> &str {
        &self.config.separator
    }

    /// Number of groups in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.nodes.get(&id).map(|node| &node.group)
    }

    /// Mutable access to a group's descriptive fields.
    ///
    /// The name cannot be changed through this handle; use [`rename`](Self::rename).
    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.nodes.get_mut(&id).map(|node| &mut node.group)
    }

    /// Root groups in insertion order.
    pub fn roots(&self) -> &[GroupId] {
        &self.roots
    }

    pub fn parent(&self, id: GroupId) -> GroupResult<Option<GroupId>> {
        Ok(self.node(id)?.parent)
    }

    /// Direct children in insertion order.
    pub fn children(&self, id: GroupId) -> GroupResult<&[GroupId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn is_root(&self, id: GroupId) -> GroupResult<bool> {
        Ok(self.node(id)?.parent.is_none())
    }

    /// The root group at the top of `id`'s parent chain.
    pub fn root_of(&self, id: GroupId) -> GroupResult<GroupId> {
        Ok(self.ancestors(id)?.last().unwrap_or(id))
    }

    /// Walk parent links root-ward, starting with the direct parent.
    pub fn ancestors(&self, id: GroupId) -> GroupResult<Ancestors<'_>> {
        let start = self.node(id)?.parent;
        Ok(Ancestors::new(self, start))
    }

    /// Lazily list every group below `id` (excluding `id` itself).
    ///
    /// Order is depth-first pre-order with children visited in insertion
    /// order. Re-iterating an unchanged tree yields the same sequence.
    pub fn descendants(&self, id: GroupId) -> GroupResult<Descendants<'_>> {
        let node = self.node(id)?;
        Ok(Descendants::new(self, node.children.iter().rev().copied().collect()))
    }

    /// Lazily list every group in the tree, roots included, in the same
    /// depth-first pre-order as [`descendants`](Self::descendants).
    pub fn walk(&self) -> Descendants<'_> {
        Descendants::new(self, self.roots.iter().rev().copied().collect())
    }

    /// Derive the fully qualified name of a group from its current parent chain.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::GroupNotFound`] if `id` is not in this tree.
    pub fn fully_qualified_name(&self, id: GroupId) -> GroupResult<String> {
        let mut names = vec![self.node(id)?.group.name()];
        for ancestor in self.ancestors(id)? {
            names.push(self.node(ancestor)?.group.name());
        }
        names.reverse();
        Ok(naming::join(&names, &self.config.separator))
    }

    /// Resolve a fully qualified name back to a group.
    pub fn find_by_fqn(&self, fqn: &str) -> Option<GroupId> {
        let segments = naming::split(fqn, &self.config.separator)?;
        let mut current: Option<GroupId> = None;
        for segment in segments {
            current = Some(self.find_child(current, segment)?);
        }
        trace!("Resolved '{}' to {:?}", fqn, current);
        current
    }

    /// Find the child of `parent` (or the root, for `None`) named `name`.
    pub fn find_child(&self, parent: Option<GroupId>, name: &str) -> Option<GroupId> {
        self.siblings(parent)
            .ok()?
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|group| group.name() == name))
    }

    pub(crate) fn node(&self, id: GroupId) -> GroupResult<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| GroupError::group_not_found(id))
    }

    pub(crate) fn node_mut(&mut self, id: GroupId) -> GroupResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| GroupError::group_not_found(id))
    }

    /// Children of `parent`, or the root list for `None`.
    pub(crate) fn siblings(&self, parent: Option<GroupId>) -> GroupResult<&[GroupId]> {
        match parent {
            Some(parent) => Ok(&self.node(parent)?.children),
            None => Ok(&self.roots),
        }
    }

    /// Whether `candidate` is `id` itself or lies below it.
    pub(crate) fn is_self_or_descendant(&self, id: GroupId, candidate: GroupId) -> bool {
        if candidate == id {
            return true;
        }
        match self.ancestors(candidate) {
            Ok(mut ancestors) => ancestors.any(|ancestor| ancestor == id),
            Err(_) => false,
        }
    }

    /// Compare the structure rooted at `id` with the one at `other_id` in `other`.
    fn same_subtree(&self, id: GroupId, other: &GroupTree, other_id: GroupId) -> bool {
        let mut pending = vec![(id, other_id)];
        while let Some((left, right)) = pending.pop() {
            let (Some(a), Some(b)) = (self.nodes.get(&left), other.nodes.get(&right)) else {
                return false;
            };
            if a.group != b.group || a.members != b.members || a.children.len() != b.children.len()
            {
                return false;
            }
            pending.extend(a.children.iter().copied().zip(b.children.iter().copied()));
        }
        true
    }
}

/// Structural equality: same group records in the same hierarchy and order,
/// same membership sets and the same entity catalog. Group ids are ignored.
impl PartialEq for GroupTree {
    fn eq(&self, other: &Self) -> bool {
        self.config.separator == other.config.separator
            && self.catalog == other.catalog
            && self.roots.len() == other.roots.len()
            && self
                .roots
                .iter()
                .zip(other.roots.iter())
                .all(|(a, b)| self.same_subtree(*a, other, *b))
    }
}
