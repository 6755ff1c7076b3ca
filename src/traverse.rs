use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::node::NodeId;
use crate::tree::Tree;

/// Order in which a traversal yields values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalMode {
    /// Value, then the whole left subtree, then the whole right subtree.
    #[default]
    PreOrder,
    /// Left subtree, value, right subtree: ascending order.
    InOrder,
    /// Left subtree, right subtree, value.
    PostOrder,
    /// Start value, then only the immediate left and right child values.
    ///
    /// Matches the historical generator that pulled a single value out of
    /// each recursive sub-traversal; anything two levels down is skipped.
    Shallow,
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalMode::PreOrder => "pre-order",
            TraversalMode::InOrder => "in-order",
            TraversalMode::PostOrder => "post-order",
            TraversalMode::Shallow => "shallow",
        };
        write!(f, "{name}")
    }
}

/// Lazy depth-first walk over a tree's values.
///
/// Each node is yielded once regardless of its frequency.
pub struct Traverse<'a, T> {
    tree: &'a Tree<T>,
    mode: TraversalMode,
    // (node, ready): ready entries are emitted on pop, the rest are expanded
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> Traverse<'a, T> {
    fn new(tree: &'a Tree<T>, start: Option<NodeId>, mode: TraversalMode) -> Self {
        let mut stack = Vec::new();
        if let Some(start) = start {
            if mode == TraversalMode::Shallow {
                let node = tree.slot(start);
                stack.extend(node.right().map(|id| (id, true)));
                stack.extend(node.left().map(|id| (id, true)));
                stack.push((start, true));
            } else {
                stack.push((start, false));
            }
        }
        Self { tree, mode, stack }
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, ready)) = self.stack.pop() {
            let node = self.tree.slot(id);
            if ready {
                return Some(&node.value);
            }
            match self.mode {
                TraversalMode::PreOrder | TraversalMode::Shallow => {
                    self.stack.extend(node.right().map(|c| (c, false)));
                    self.stack.extend(node.left().map(|c| (c, false)));
                    return Some(&node.value);
                }
                TraversalMode::InOrder => {
                    self.stack.extend(node.right().map(|c| (c, false)));
                    self.stack.push((id, true));
                    self.stack.extend(node.left().map(|c| (c, false)));
                }
                TraversalMode::PostOrder => {
                    self.stack.push((id, true));
                    self.stack.extend(node.right().map(|c| (c, false)));
                    self.stack.extend(node.left().map(|c| (c, false)));
                }
            }
        }
        None
    }
}

impl<T> Tree<T> {
    /// Pre-order traversal from the root.
    ///
    /// # Errors
    /// `InvalidState` when the tree is empty.
    pub fn traverse(&self) -> TreeResult<Traverse<'_, T>> {
        self.traverse_with(self.root(), TraversalMode::PreOrder)
    }

    pub fn traverse_from(&self, start: Option<NodeId>) -> TreeResult<Traverse<'_, T>> {
        self.traverse_with(start, TraversalMode::PreOrder)
    }

    /// Traversal from `start` in the given mode.
    ///
    /// # Errors
    /// `InvalidState` when `start` is `None` or no longer part of the tree.
    #[instrument(level = "trace", skip(self))]
    pub fn traverse_with(
        &self,
        start: Option<NodeId>,
        mode: TraversalMode,
    ) -> TreeResult<Traverse<'_, T>> {
        let start = start.filter(|&id| self.node(id).is_some()).ok_or_else(|| {
            TreeError::InvalidState("tried traversing, but the start node does not exist".into())
        })?;
        Ok(Traverse::new(self, Some(start), mode))
    }

    /// Pre-order values; empty for an empty tree.
    pub fn iter_pre_order(&self) -> Traverse<'_, T> {
        Traverse::new(self, self.root(), TraversalMode::PreOrder)
    }

    /// Ascending values; empty for an empty tree.
    pub fn iter_in_order(&self) -> Traverse<'_, T> {
        Traverse::new(self, self.root(), TraversalMode::InOrder)
    }

    /// Post-order values; empty for an empty tree.
    pub fn iter_post_order(&self) -> Traverse<'_, T> {
        Traverse::new(self, self.root(), TraversalMode::PostOrder)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Traverse<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_in_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //        50
    //      /    \
    //    30      70
    //   /  \       \
    //  20  40       80
    //                 \
    //                  90
    fn sample() -> Tree<i32> {
        [50, 30, 70, 20, 40, 80, 90].into_iter().collect()
    }

    fn collect(iter: Traverse<'_, i32>) -> Vec<i32> {
        iter.copied().collect()
    }

    #[test]
    fn given_tree_when_pre_order_then_value_left_right() {
        let tree = sample();
        assert_eq!(
            collect(tree.traverse().unwrap()),
            vec![50, 30, 20, 40, 70, 80, 90]
        );
    }

    #[test]
    fn given_tree_when_in_order_then_ascending() {
        let tree = sample();
        assert_eq!(
            collect(tree.iter_in_order()),
            vec![20, 30, 40, 50, 70, 80, 90]
        );
    }

    #[test]
    fn given_tree_when_post_order_then_children_first() {
        let tree = sample();
        assert_eq!(
            collect(tree.iter_post_order()),
            vec![20, 40, 30, 90, 80, 70, 50]
        );
    }

    #[test]
    fn given_tree_when_shallow_then_only_start_and_immediate_children() {
        let tree = sample();
        let shallow = tree.traverse_with(tree.root(), TraversalMode::Shallow).unwrap();
        assert_eq!(collect(shallow), vec![50, 30, 70]);
    }

    #[test]
    fn given_empty_tree_when_traverse_then_invalid_state() {
        let tree: Tree<i32> = Tree::new();
        assert!(matches!(tree.traverse(), Err(TreeError::InvalidState(_))));
        assert_eq!(tree.iter_in_order().count(), 0);
    }

    #[test]
    fn given_traversal_when_restarted_then_walks_again() {
        let tree = sample();
        let first: Vec<_> = collect(tree.traverse().unwrap());
        let second: Vec<_> = collect(tree.traverse().unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn mode_display_matches_serde_names() {
        assert_eq!(TraversalMode::InOrder.to_string(), "in-order");
        assert_eq!(TraversalMode::default(), TraversalMode::PreOrder);
    }
}
