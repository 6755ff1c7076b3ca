use std::cmp::Ordering;
use std::collections::HashSet;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::node::{Node, NodeId, Side};

/// Unbalanced binary search tree with duplicate counting.
///
/// Nodes live in a generational arena owned by the tree. The root slot and
/// every child slot each reference at most one node, and every live node is
/// referenced by exactly one slot, so the arena holds precisely the nodes
/// reachable from the root.
///
/// Values to the left of a node are strictly smaller, values to the right
/// strictly greater. Inserting an equal value bumps the node's `frequency`
/// instead of adding a node.
#[derive(Debug)]
pub struct Tree<T> {
    nodes: Arena<Node<T>>,
    root: Option<NodeId>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Tree holding a single root node.
    pub fn with_root(value: T) -> Self {
        let mut tree = Self::new();
        tree.place_root(value);
        tree
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The root node itself.
    pub fn head(&self) -> Option<&Node<T>> {
        self.root.map(|id| self.slot(id))
    }

    /// Replaces the root reference.
    ///
    /// Everything not reachable from the new root is dropped, so `Some(id)`
    /// keeps only the subtree below `id` and `None` empties the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn set_root(&mut self, root: Option<NodeId>) -> TreeResult<()> {
        match root {
            None => {
                self.nodes.clear();
                self.root = None;
            }
            Some(id) => {
                self.resolve(id)?;
                let reachable: HashSet<Index> =
                    self.iter_pre_order_ids(Some(id)).map(|n| n.0).collect();
                self.nodes.retain(|idx, _| reachable.contains(&idx));
                self.root = Some(id);
                debug!("root replaced, {} nodes kept", self.nodes.len());
            }
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Mutable access to a node's value and frequency.
    ///
    /// Changing `value` can break the ordering; the tree does not re-check it.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes (duplicates collapsed).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of insertions represented, counting duplicates.
    pub fn total_frequency(&self) -> usize {
        self.nodes.iter().map(|(_, n)| n.frequency).sum()
    }

    /// Links a new node holding `value` under `parent` on `side`.
    ///
    /// Ordering is not checked: this is for building fixtures by hand. The
    /// slot must be empty.
    #[instrument(level = "trace", skip(self, value))]
    pub fn attach(&mut self, parent: NodeId, side: Side, value: T) -> TreeResult<NodeId> {
        if self.resolve(parent)?.child(side).is_some() {
            return Err(TreeError::InvalidArgument(format!(
                "{side} child slot of the parent is already occupied"
            )));
        }
        let id = NodeId(self.nodes.insert(Node::new(value)));
        self.slot_mut(parent).set_child(side, Some(id));
        Ok(id)
    }

    /// Closure following `side` links from a start node until no child
    /// remains on that side. `None` (or a stale handle) yields `None`.
    pub fn side_traverser(&self, side: Side) -> impl Fn(Option<NodeId>) -> Option<NodeId> + '_ {
        move |start| {
            let mut current = start.filter(|id| self.nodes.contains(id.0))?;
            while let Some(next) = self.slot(current).child(side) {
                current = next;
            }
            Some(current)
        }
    }

    pub fn minimum(&self) -> Option<NodeId> {
        self.minimum_from(self.root)
    }

    pub fn maximum(&self) -> Option<NodeId> {
        self.maximum_from(self.root)
    }

    /// Leftmost node of the subtree rooted at `node`.
    pub fn minimum_from(&self, node: Option<NodeId>) -> Option<NodeId> {
        self.side_traverser(Side::Left)(node)
    }

    /// Rightmost node of the subtree rooted at `node`.
    pub fn maximum_from(&self, node: Option<NodeId>) -> Option<NodeId> {
        self.side_traverser(Side::Right)(node)
    }

    pub fn minimum_value(&self) -> Option<&T> {
        self.minimum().map(|id| &self.slot(id).value)
    }

    pub fn maximum_value(&self) -> Option<&T> {
        self.maximum().map(|id| &self.slot(id).value)
    }

    /// Number of levels: 0 for an empty tree, 1 for a lone root.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.root.map_or(0, |root| self.calculate_height(root))
    }

    fn calculate_height(&self, id: NodeId) -> usize {
        let node = self.slot(id);
        let left = node.left.map_or(0, |c| self.calculate_height(c));
        let right = node.right.map_or(0, |c| self.calculate_height(c));
        1 + left.max(right)
    }

    /// Nodes without children, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, id: NodeId, leaves: &mut Vec<NodeId>) {
        let node = self.slot(id);
        if node.is_leaf() {
            leaves.push(id);
            return;
        }
        for child in [node.left, node.right].into_iter().flatten() {
            self.collect_leaves(child, leaves);
        }
    }

    /// Pre-order walk over handles, used internally for reachability.
    fn iter_pre_order_ids(&self, start: Option<NodeId>) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = start.into_iter().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = self.slot(id);
            stack.extend(node.right);
            stack.extend(node.left);
            Some(id)
        })
    }

    fn place_root(&mut self, value: T) -> NodeId {
        let id = NodeId(self.nodes.insert(Node::new(value)));
        self.root = Some(id);
        debug!("new root placed");
        id
    }

    /// Validates a caller-supplied handle.
    pub(crate) fn resolve(&self, id: NodeId) -> TreeResult<&Node<T>> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| TreeError::InvalidArgument("node is not part of this tree".into()))
    }

    /// Node behind a link held by the tree itself; such links are always live.
    pub(crate) fn slot(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }
}

impl<T: Ord> Tree<T> {
    /// Inserts `value` starting at the root and returns the node now holding it.
    pub fn insert(&mut self, value: T) -> NodeId {
        match self.root {
            None => self.place_root(value),
            Some(root) => self.insert_below(value, root),
        }
    }

    /// Inserts `value` descending from `start`.
    ///
    /// `None` creates the root of an empty tree. Passing `None` while a root
    /// exists, or a stale handle, is an `InvalidArgument`.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_at(&mut self, value: T, start: Option<NodeId>) -> TreeResult<NodeId> {
        match start {
            None if self.root.is_none() => Ok(self.place_root(value)),
            None => Err(TreeError::InvalidArgument(
                "insert start node is absent but the tree already has a root".into(),
            )),
            Some(id) => {
                self.resolve(id)?;
                Ok(self.insert_below(value, id))
            }
        }
    }

    fn insert_below(&mut self, value: T, start: NodeId) -> NodeId {
        let mut current = start;
        loop {
            let node = self.slot_mut(current);
            let side = match value.cmp(&node.value) {
                Ordering::Equal => {
                    node.frequency += 1;
                    debug!(frequency = node.frequency, "duplicate collapsed");
                    return current;
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(next) => current = next,
                None => {
                    let id = NodeId(self.nodes.insert(Node::new(value)));
                    self.slot_mut(current).set_child(side, Some(id));
                    return id;
                }
            }
        }
    }

    pub fn find_parent_node(&self, value: &T) -> Option<NodeId> {
        self.find_parent_node_from(value, self.root)
    }

    /// Node whose immediate child holds `value`, searching from `node`.
    ///
    /// Returns `None` when the value is absent and also when it is held by
    /// `node` itself, so a root value never has a parent.
    #[instrument(level = "trace", skip(self, value))]
    pub fn find_parent_node_from(&self, value: &T, node: Option<NodeId>) -> Option<NodeId> {
        let mut current = node.filter(|id| self.nodes.contains(id.0))?;
        loop {
            let node = self.slot(current);
            if node.is_leaf() {
                return None;
            }
            let holds = |child: Option<NodeId>| child.is_some_and(|c| self.slot(c).value == *value);
            if holds(node.left) || holds(node.right) {
                return Some(current);
            }
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left?,
                Ordering::Greater => node.right?,
                Ordering::Equal => return None,
            };
        }
    }

    /// Node holding `value`: the root if it matches, else the matching child
    /// of [`find_parent_node`](Self::find_parent_node).
    pub fn find_node(&self, value: &T) -> Option<NodeId> {
        let root = self.root?;
        if self.slot(root).value == *value {
            return Some(root);
        }
        let parent = self.slot(self.find_parent_node(value)?);
        [parent.left, parent.right]
            .into_iter()
            .flatten()
            .find(|&c| self.slot(c).value == *value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find_node(value).is_some()
    }

    /// Removes the node named by `target` from the tree.
    ///
    /// - two children: the in-order successor (minimum of the right subtree)
    ///   donates its value and frequency, and its own right child takes over
    ///   its slot;
    /// - one child: the child's value, frequency and links are written into
    ///   `target`, which therefore stays a valid handle;
    /// - leaf: the parent's link is cleared, or the tree becomes empty when
    ///   `target` is the root.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, target: NodeId) -> TreeResult<()>
    where
        T: Clone,
    {
        let node = self.resolve(target)?;
        match (node.left, node.right) {
            (Some(_), Some(right)) => self.replace_with_successor(target, right),
            (Some(child), None) | (None, Some(child)) => self.absorb_child(target, child),
            (None, None) => self.detach_leaf(target),
        }
    }

    fn replace_with_successor(&mut self, target: NodeId, right: NodeId) -> TreeResult<()>
    where
        T: Clone,
    {
        let successor = self
            .minimum_from(Some(right))
            .ok_or_else(|| TreeError::InvalidState("right subtree has no minimum".into()))?;
        let (parent, side) = if successor == right {
            (target, Side::Right)
        } else {
            let parent = self
                .find_parent_node_from(&self.slot(successor).value, Some(right))
                .ok_or_else(|| TreeError::InvalidState("successor has no parent".into()))?;
            (parent, Side::Left)
        };
        debug!("deleting node with two children via in-order successor");

        let donor = self.slot(successor).copy();
        self.slot_mut(parent).set_child(side, donor.right);
        self.nodes
            .remove(successor.0)
            .ok_or_else(|| TreeError::InvalidState("successor vanished".into()))?;

        let node = self.slot_mut(target);
        node.value = donor.value;
        node.frequency = donor.frequency;
        Ok(())
    }

    fn absorb_child(&mut self, target: NodeId, child: NodeId) -> TreeResult<()>
    where
        T: Clone,
    {
        debug!("deleting node with one child by absorbing it");
        let donor = self.slot(child).copy();
        self.nodes
            .remove(child.0)
            .ok_or_else(|| TreeError::InvalidState("child vanished".into()))?;
        let node = self.slot_mut(target);
        node.value = donor.value;
        node.frequency = donor.frequency;
        node.left = donor.left;
        node.right = donor.right;
        Ok(())
    }

    fn detach_leaf(&mut self, target: NodeId) -> TreeResult<()> {
        match self.find_parent_node(&self.slot(target).value) {
            Some(parent) => {
                let parent = self.slot_mut(parent);
                let side = if parent.left == Some(target) {
                    Side::Left
                } else if parent.right == Some(target) {
                    Side::Right
                } else {
                    return Err(TreeError::InvalidArgument(
                        "leaf is not linked where its value belongs".into(),
                    ));
                };
                parent.set_child(side, None);
                debug!(%side, "leaf detached from parent");
            }
            None if self.root == Some(target) => {
                self.root = None;
                debug!("last node deleted, tree is empty");
            }
            None => {
                return Err(TreeError::InvalidArgument(
                    "leaf is not reachable from the root".into(),
                ))
            }
        }
        self.nodes
            .remove(target.0)
            .ok_or_else(|| TreeError::InvalidState("leaf vanished".into()))?;
        Ok(())
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
