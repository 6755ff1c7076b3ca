use std::fmt;

use generational_arena::Index;

/// Handle naming one node of a [`Tree`](crate::tree::Tree).
///
/// Handles are generational: once the node is spliced out of its tree the
/// handle goes stale and every tree operation rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// Which child link of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "L"),
            Side::Right => write!(f, "R"),
        }
    }
}

/// A tree node: the stored value, how many times it was inserted, and the
/// two child links.
///
/// `value` and `frequency` are plain fields. Child links are read through
/// [`Node::left`] / [`Node::right`] and only rewired by tree operations, since
/// every child slot must own its node exclusively.
#[derive(Debug, PartialEq, Eq)]
pub struct Node<T> {
    pub value: T,
    pub frequency: usize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            frequency: 1,
            left: None,
            right: None,
        }
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Shallow duplicate: same value, same frequency, same child handles.
    ///
    /// The children are not copied; the duplicate names the very same
    /// subtrees, so it must not be linked into a tree next to the original.
    pub fn copy(&self) -> Self
    where
        T: Clone,
    {
        Self {
            value: self.value.clone(),
            frequency: self.frequency,
            left: self.left,
            right: self.right,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frequency > 1 {
            write!(f, "{} (x{})", self.value, self.frequency)
        } else {
            write!(f, "{}", self.value)
        }
    }
}
