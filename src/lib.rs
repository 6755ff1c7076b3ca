//! Unbalanced binary search tree with duplicate counting.
//!
//! [`Tree`] owns every [`Node`] in a generational arena and hands out
//! [`NodeId`] handles, so callers can name the exact node to delete while the
//! tree keeps exclusive ownership of each child link.
//!
//! ```
//! use bstree::Tree;
//!
//! let mut tree: Tree<i32> = [100, 90, 110, 105, 120].into_iter().collect();
//! tree.insert(100);
//! assert_eq!(tree.head().map(|h| h.frequency), Some(2));
//!
//! let root = tree.root().unwrap();
//! tree.delete_node(root).unwrap();
//! assert_eq!(tree.head().map(|h| h.value), Some(105));
//! assert_eq!(tree.maximum_value(), Some(&120));
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod node;
pub mod traverse;
pub mod tree;
pub mod tree_traits;
pub mod util;

pub use errors::{TreeError, TreeResult};
pub use node::{Node, NodeId, Side};
pub use traverse::{TraversalMode, Traverse};
pub use tree::Tree;
pub use tree_traits::TreeRender;
