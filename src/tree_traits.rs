use std::fmt::Display;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::node::{NodeId, Side};
use crate::tree::Tree;

/// Converts a tree into a printable `termtree` outline.
pub trait TreeRender {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<T: Display> TreeRender for Tree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        let Some(root) = self.root() else {
            return TermTree::new("Empty tree".to_string());
        };

        fn build<T: Display>(tree: &Tree<T>, id: NodeId, label: String) -> TermTree<String> {
            let node = tree.slot(id);
            let mut out = TermTree::new(label);
            for side in [Side::Left, Side::Right] {
                if let Some(child) = node.child(side) {
                    let label = format!("{side}: {}", tree.slot(child));
                    out.push(build(tree, child, label));
                }
            }
            out
        }

        build(self, root, self.slot(root).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_tree_when_render_then_placeholder() {
        let tree: Tree<i32> = Tree::new();
        assert_eq!(tree.to_tree_string().to_string().trim(), "Empty tree");
    }

    #[test]
    fn given_tree_when_render_then_children_are_labelled_by_side() {
        let mut tree: Tree<i32> = [100, 90, 110].into_iter().collect();
        tree.insert(110);
        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "100");
        assert!(lines[1].ends_with("L: 90"));
        assert!(lines[2].ends_with("R: 110 (x2)"));
    }
}
