use crate::{node::NodeId, tree::RbTree};

/// A bidirectional position in an [`RbTree`].
///
/// A cursor points either at a node, or at the past-the-end position that
/// sits after the maximum and before the minimum. Stepping forward from the
/// maximum, or backward from the minimum, reaches past-the-end. Stepping
/// backward from past-the-end reaches the maximum; stepping forward from it
/// stays put.
#[derive(Debug)]
pub struct Cursor<'a, K, V, C> {
    tree: &'a RbTree<K, V, C>,
    current: Option<usize>,
}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            current: self.current,
        }
    }
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    pub(crate) fn new(tree: &'a RbTree<K, V, C>, current: Option<usize>) -> Self {
        Self { tree, current }
    }

    /// Returns true if the cursor is at the past-the-end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the handle of the current node, or [`None`] at past-the-end.
    pub fn node(&self) -> Option<NodeId> {
        self.current.map(|v| self.tree.id_of(v))
    }

    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        self.current.map(|v| tree.pair(v))
    }

    /// Step to the next node in key order.
    pub fn move_next(&mut self) {
        if let Some(v) = self.current {
            self.current = self.tree.successor_slot(v);
        }
    }

    /// Step to the previous node in key order.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            Some(v) => self.tree.predecessor_slot(v),
            None => self.tree.root.map(|v| self.tree.max_from(v)),
        };
    }

    /// Returns the pair the cursor would reach with [`Cursor::move_next()`],
    /// without moving.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let mut c = self.clone();
        c.move_next();
        c.key_value()
    }

    /// Returns the pair the cursor would reach with [`Cursor::move_prev()`],
    /// without moving.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        let mut c = self.clone();
        c.move_prev();
        c.key_value()
    }
}
