/// The color tag of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Identifies one of the two children of a node, or the direction of a
/// rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// An opaque handle to a node in an [`RbTree`].
///
/// A [`NodeId`] stays valid until the node it refers to is removed, or the
/// tree is cleared. After that, every tree operation given the handle treats
/// it as absent - even if the arena slot it pointed at has since been reused
/// by a new node.
///
/// Handles are only meaningful for the tree that produced them.
///
/// [`RbTree`]: crate::RbTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) slot: usize,
    pub(crate) stamp: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,

    /// Arena slots of the linked nodes.
    ///
    /// The parent link never owns the parent: a node is owned by the arena,
    /// and reachable from the root through the child links.
    pub(crate) parent: Option<usize>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,

    /// The allocation stamp of this node, matched against [`NodeId::stamp`]
    /// to reject handles to a previous occupant of the slot.
    pub(crate) stamp: u64,
}

impl<K, V> Node<K, V> {
    /// Construct an unlinked red node.
    pub(crate) fn new(key: K, value: V, stamp: u64) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
            stamp,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Explode this [`Node`] into the key and value it contains.
    pub(crate) fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}
