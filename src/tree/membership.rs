//! Membership: the many-to-many relation between groups and entities.
//!
//! Entities live in the tree's catalog, keyed by [`MemberKey`]. A group only
//! records keys, so one entity can belong to any number of groups, in
//! different subtrees, without being copied.

use super::GroupTree;
use crate::entity::{Entity, MemberKey, Prompt, Resource, Tool};
use crate::error::{GroupError, GroupResult};
use crate::group::GroupId;
use log::{debug, trace};

impl GroupTree {
    /// Add or replace an entity record in the catalog.
    ///
    /// Memberships follow the identity, so replacing a record keeps every
    /// group it already belongs to. Returns the previous record, if any.
    pub fn register(&mut self, entity: impl Into<Entity>) -> Option<Entity> {
        let entity = entity.into();
        let key = entity.key();
        trace!("Registering entity {}", key);
        self.catalog.insert(key, entity)
    }

    pub fn entity(&self, key: &MemberKey) -> Option<&Entity> {
        self.catalog.get(key)
    }

    /// Every catalogued entity, ordered by kind then identity.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.catalog.values()
    }

    /// Make an entity a member of a group.
    ///
    /// If no entity with the same identity is catalogued yet, the given
    /// record is registered; otherwise the existing record is kept. Returns
    /// `false` when the entity was already a member.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mcp_groups::entity::{MemberKey, Tool};
    /// use mcp_groups::group::Group;
    /// use mcp_groups::tree::GroupTree;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree = GroupTree::new();
    /// let search = tree.create_group(Group::new("search"), None)?;
    ///
    /// assert!(tree.add_member(search, Tool::new("web_search"))?);
    /// assert!(!tree.add_member(search, Tool::new("web_search"))?);
    /// assert_eq!(tree.member_keys(search)?.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_member(&mut self, group: GroupId, entity: impl Into<Entity>) -> GroupResult<bool> {
        self.node(group)?;
        let entity = entity.into();
        let key = entity.key();
        self.catalog.entry(key.clone()).or_insert(entity);
        self.link(group, key)
    }

    /// Add an already catalogued entity to a group by identity.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::EntityNotFound`] if the key is not catalogued.
    pub fn add_member_key(&mut self, group: GroupId, key: &MemberKey) -> GroupResult<bool> {
        self.node(group)?;
        if !self.catalog.contains_key(key) {
            return Err(GroupError::EntityNotFound {
                key: key.to_string(),
            });
        }
        self.link(group, key.clone())
    }

    /// Remove an entity from a group. The entity stays catalogued.
    ///
    /// Returns `false` if it was not a member.
    pub fn remove_member(&mut self, group: GroupId, key: &MemberKey) -> GroupResult<bool> {
        let removed = self.node_mut(group)?.members.remove(key);
        if removed {
            self.unindex_membership(key, group);
            debug!("Removed {} from group {}", key, group);
        }
        Ok(removed)
    }

    /// Drop an entity from the catalog and from every group it belongs to.
    pub fn remove_entity(&mut self, key: &MemberKey) -> Option<Entity> {
        if let Some(groups) = self.memberships.remove(key) {
            for group in groups {
                if let Some(node) = self.nodes.get_mut(&group) {
                    node.members.remove(key);
                }
            }
        }
        let removed = self.catalog.remove(key);
        if removed.is_some() {
            debug!("Removed entity {} from the catalog", key);
        }
        removed
    }

    /// Identities of a group's direct members, ordered by kind then identity.
    pub fn member_keys(&self, group: GroupId) -> GroupResult<Vec<&MemberKey>> {
        Ok(self.node(group)?.members.iter().collect())
    }

    pub fn is_member(&self, group: GroupId, key: &MemberKey) -> GroupResult<bool> {
        Ok(self.node(group)?.members.contains(key))
    }

    /// Tools that are direct members of `group`.
    pub fn tools_in(&self, group: GroupId) -> GroupResult<Vec<&Tool>> {
        Ok(self.members_of(group)?.filter_map(Entity::as_tool).collect())
    }

    /// Prompts that are direct members of `group`.
    pub fn prompts_in(&self, group: GroupId) -> GroupResult<Vec<&Prompt>> {
        Ok(self.members_of(group)?.filter_map(Entity::as_prompt).collect())
    }

    /// Resources that are direct members of `group`.
    pub fn resources_in(&self, group: GroupId) -> GroupResult<Vec<&Resource>> {
        Ok(self
            .members_of(group)?
            .filter_map(Entity::as_resource)
            .collect())
    }

    /// Groups an entity belongs to, in id order.
    pub fn groups_of(&self, key: &MemberKey) -> Vec<GroupId> {
        self.memberships
            .get(key)
            .map(|groups| groups.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Distinct roots of the groups an entity belongs to.
    ///
    /// An entity reachable from several subtrees reports each root once, in
    /// the order the roots appear in the tree.
    pub fn entity_roots(&self, key: &MemberKey) -> Vec<GroupId> {
        let member_roots: Vec<GroupId> = self
            .groups_of(key)
            .into_iter()
            .filter_map(|group| self.root_of(group).ok())
            .collect();

        self.roots
            .iter()
            .copied()
            .filter(|root| member_roots.contains(root))
            .collect()
    }

    fn members_of(&self, group: GroupId) -> GroupResult<impl Iterator<Item = &Entity>> {
        let node = self.node(group)?;
        Ok(node.members.iter().filter_map(move |key| self.catalog.get(key)))
    }

    fn link(&mut self, group: GroupId, key: MemberKey) -> GroupResult<bool> {
        let inserted = self.node_mut(group)?.members.insert(key.clone());
        if inserted {
            debug!("Added {} to group {}", key, group);
            self.memberships.entry(key).or_default().insert(group);
        }
        Ok(inserted)
    }

    /// Drop `group` from the reverse index entry of `key`.
    pub(crate) fn unindex_membership(&mut self, key: &MemberKey, group: GroupId) {
        if let Some(groups) = self.memberships.get_mut(key) {
            groups.remove(&group);
            if groups.is_empty() {
                self.memberships.remove(key);
            }
        }
    }
}
