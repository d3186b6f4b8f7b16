//! Structural mutations: creating, moving, renaming and deleting groups.

use super::{GroupTree, Node};
use crate::error::{GroupError, GroupResult};
use crate::group::{Group, GroupId, naming};
use log::debug;
use std::collections::BTreeSet;

impl GroupTree {
    /// Insert a new group, as a root (`parent = None`) or under `parent`.
    ///
    /// # Errors
    ///
    /// * [`GroupError::InvalidName`] if the name is empty or contains the separator
    /// * [`GroupError::GroupNotFound`] if `parent` is not in this tree
    /// * [`GroupError::DuplicateName`] if a sibling already uses the name
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mcp_groups::group::Group;
    /// use mcp_groups::tree::GroupTree;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree = GroupTree::new();
    /// let ops = tree.create_group(Group::new("ops").with_title("Operations"), None)?;
    ///
    /// assert!(tree.create_group(Group::new(""), Some(ops)).is_err());
    /// assert!(tree.create_group(Group::new("a.b"), Some(ops)).is_err());
    /// assert!(tree.create_group(Group::new("ops"), None).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_group(&mut self, group: Group, parent: Option<GroupId>) -> GroupResult<GroupId> {
        naming::validate_name(group.name(), &self.config.separator)?;
        self.ensure_unique_name(parent, group.name(), None)?;

        let id = GroupId::new(self.next_id);
        self.next_id += 1;

        match parent {
            Some(parent_id) => self.node_mut(parent_id)?.children.push(id),
            None => self.roots.push(id),
        }

        debug!(
            "Created group '{}' ({}) under {:?}",
            group.name(),
            id,
            parent
        );

        self.nodes.insert(
            id,
            Node {
                group,
                parent,
                children: Vec::new(),
                members: BTreeSet::new(),
            },
        );

        Ok(id)
    }

    /// Move `id` under `new_parent`, or detach it to a root with `None`.
    ///
    /// All checks run before the link is changed, so on error the tree is
    /// untouched. Setting the current parent again is a no-op.
    ///
    /// # Errors
    ///
    /// * [`GroupError::Cycle`] if `new_parent` is `id` itself or one of its descendants
    /// * [`GroupError::DuplicateName`] if the new siblings already use `id`'s name
    /// * [`GroupError::GroupNotFound`] if either id is not in this tree
    pub fn set_parent(&mut self, id: GroupId, new_parent: Option<GroupId>) -> GroupResult<()> {
        let current_parent = self.node(id)?.parent;

        if let Some(parent_id) = new_parent {
            self.node(parent_id)?;
            if self.is_self_or_descendant(id, parent_id) {
                return Err(GroupError::cycle(
                    self.fully_qualified_name(id)?,
                    self.fully_qualified_name(parent_id)?,
                ));
            }
        }

        if current_parent == new_parent {
            return Ok(());
        }

        let name = self.node(id)?.group.name().to_string();
        self.ensure_unique_name(new_parent, &name, Some(id))?;

        self.detach(id, current_parent)?;
        match new_parent {
            Some(parent_id) => self.node_mut(parent_id)?.children.push(id),
            None => self.roots.push(id),
        }
        self.node_mut(id)?.parent = new_parent;

        debug!(
            "Moved group '{}' ({}) from {:?} to {:?}",
            name, id, current_parent, new_parent
        );
        Ok(())
    }

    /// Place `child` under `parent`. Same checks as [`set_parent`](Self::set_parent).
    pub fn add_child(&mut self, parent: GroupId, child: GroupId) -> GroupResult<()> {
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` from `parent`, turning it into a root.
    ///
    /// The child keeps its own subtree and members. Returns `false` when
    /// `child` is not a direct child of `parent`.
    ///
    /// # Errors
    ///
    /// [`GroupError::DuplicateName`] if a root already uses the child's name.
    pub fn remove_child(&mut self, parent: GroupId, child: GroupId) -> GroupResult<bool> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Ok(false);
        }
        self.set_parent(child, None)?;
        Ok(true)
    }

    /// Change a group's name.
    ///
    /// Fully qualified names of the group and its descendants follow
    /// immediately since they are always derived from the current chain.
    pub fn rename(&mut self, id: GroupId, name: impl Into<String>) -> GroupResult<()> {
        let name = name.into();
        naming::validate_name(&name, &self.config.separator)?;

        let parent = self.node(id)?.parent;
        self.ensure_unique_name(parent, &name, Some(id))?;

        let node = self.node_mut(id)?;
        debug!("Renamed group '{}' ({}) to '{}'", node.group.name(), id, name);
        node.group.set_name(name);
        Ok(())
    }

    /// Delete a group together with its subtree.
    ///
    /// Membership edges of the removed groups are dropped; the entities
    /// themselves stay in the catalog. Returns the removed group records in
    /// depth-first pre-order, starting with `id`.
    pub fn delete_group(&mut self, id: GroupId) -> GroupResult<Vec<Group>> {
        let parent = self.node(id)?.parent;
        let mut doomed = vec![id];
        doomed.extend(self.descendants(id)?);

        self.detach(id, parent)?;

        let mut removed = Vec::with_capacity(doomed.len());
        for group_id in doomed {
            let Some(node) = self.nodes.remove(&group_id) else {
                continue;
            };
            for key in &node.members {
                self.unindex_membership(key, group_id);
            }
            removed.push(node.group);
        }

        debug!("Deleted group {} and {} descendant(s)", id, removed.len() - 1);
        Ok(removed)
    }

    /// Fail with `DuplicateName` if a sibling under `parent` other than
    /// `exclude` is already called `name`.
    fn ensure_unique_name(
        &self,
        parent: Option<GroupId>,
        name: &str,
        exclude: Option<GroupId>,
    ) -> GroupResult<()> {
        let clash = self
            .siblings(parent)?
            .iter()
            .filter(|sibling| Some(**sibling) != exclude)
            .any(|sibling| self.get(*sibling).is_some_and(|g| g.name() == name));

        if clash {
            let parent_fqn = match parent {
                Some(parent_id) => Some(self.fully_qualified_name(parent_id)?),
                None => None,
            };
            return Err(GroupError::DuplicateName {
                parent: parent_fqn,
                name: name.to_string(),
            });
        }

        Ok(())
    }

    /// Remove `id` from its parent's children (or from the roots).
    fn detach(&mut self, id: GroupId, parent: Option<GroupId>) -> GroupResult<()> {
        let siblings = match parent {
            Some(parent_id) => &mut self.node_mut(parent_id)?.children,
            None => &mut self.roots,
        };
        siblings.retain(|sibling| *sibling != id);
        Ok(())
    }
}
