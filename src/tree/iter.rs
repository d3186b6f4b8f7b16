//! Lazy traversal of a [`GroupTree`].

use super::GroupTree;
use crate::group::GroupId;

/// Depth-first pre-order traversal over group ids.
///
/// Children are visited in insertion order. The iterator borrows the tree,
/// so the tree cannot change while it is alive; asking the tree for a new
/// iterator restarts the traversal from the beginning.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    tree: &'a GroupTree,
    // Next ids to visit, top of stack first
    stack: Vec<GroupId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a GroupTree, stack: Vec<GroupId>) -> Self {
        Self { tree, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = GroupId;

    fn next(&mut self) -> Option<GroupId> {
        let id = self.stack.pop()?;
        if let Some(node) = self.tree.nodes.get(&id) {
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(id)
    }
}

/// Walk from a group's parent up to its root.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a GroupTree,
    next: Option<GroupId>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a GroupTree, start: Option<GroupId>) -> Self {
        Self { tree, next: start }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = GroupId;

    fn next(&mut self) -> Option<GroupId> {
        let id = self.next?;
        self.next = self.tree.nodes.get(&id).and_then(|node| node.parent);
        Some(id)
    }
}
