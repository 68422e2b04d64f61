use std::iter::FusedIterator;

use slab::Slab;

use crate::node::Node;

/// An iterator of owned key/value pairs as the underlying tree `into_iter()`
/// impl.
///
/// Nodes are freed as they are yielded, so the walk keeps an explicit stack
/// rather than following parent links back into freed nodes.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    nodes: Slab<Node<K, V>>,
    stack: Vec<usize>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(nodes: Slab<Node<K, V>>, root: Option<usize>) -> Self {
        let mut this = Self {
            nodes,
            stack: vec![],
        };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: usize) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = self.nodes[v].left;
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.nodes.remove(self.stack.pop()?);

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.right {
            self.push_subtree(right);
        }

        Some(v.into_tuple())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
