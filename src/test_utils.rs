use std::{cmp::Ordering, fmt::Debug};

use crate::{compare::Comparator, node::Color, tree::RbTree};

/// Linear-feedback shift register based PRNG.
///
/// Generates 65,535 unique values before cycling, making it a cheap source
/// of distinct keys in a random order.
#[derive(Debug, Clone)]
pub(crate) struct Lfsr(u16);

impl Default for Lfsr {
    fn default() -> Self {
        Self(42)
    }
}

impl Lfsr {
    #[allow(clippy::should_implement_trait)]
    pub(crate) fn next(&mut self) -> u16 {
        let lsb = self.0 & 1;
        self.0 >>= 1;
        if lsb == 1 {
            self.0 ^= 0xD008;
        }
        assert_ne!(self.0, 42, "LFSR rollover");
        self.0
    }
}

/// Returns the number of black nodes on the path from the root to the
/// left-most absent child, counting the root.
pub(crate) fn black_height<K, V, C>(t: &RbTree<K, V, C>) -> usize {
    let mut n = 0;
    let mut ptr = t.root;
    while let Some(v) = ptr {
        if t.nodes[v].color == Color::Black {
            n += 1;
        }
        ptr = t.nodes[v].left;
    }
    n
}

/// Assert the BST and red-black properties of the tree, and the consistency
/// of its links, ensuring the tree is well-formed.
///
/// Returns the height of the tree (the number of nodes on the longest
/// root-to-leaf path).
pub(crate) fn validate_tree_structure<K, V, C>(t: &RbTree<K, V, C>) -> usize
where
    K: Debug,
    C: Comparator<K>,
{
    let root = match t.root {
        Some(v) => v,
        None => {
            assert!(t.nodes.is_empty(), "empty tree retains nodes");
            return 0;
        }
    };

    // Invariant 1: the root is black and has no parent.
    assert_eq!(t.nodes[root].color, Color::Black, "red root");
    assert_eq!(t.nodes[root].parent, None);

    let want_black_height = black_height(t);
    let mut max_height = 0;
    let mut visited = 0;

    // Perform a pre-order traversal of the tree, carrying the depth and the
    // number of black nodes above each node.
    let mut stack = vec![(root, 1, 0)];
    while let Some((v, depth, blacks_above)) = stack.pop() {
        let n = &t.nodes[v];
        visited += 1;
        max_height = max_height.max(depth);

        let blacks = blacks_above + usize::from(n.color == Color::Black);

        for (child, want) in [(n.left, Ordering::Less), (n.right, Ordering::Greater)] {
            match child {
                Some(c) => {
                    let c_node = &t.nodes[c];

                    // Invariant 2: the parent link of each child points back
                    // at this node.
                    assert_eq!(c_node.parent, Some(v), "stale parent link");

                    // Invariant 3: the left child always contains a key
                    // strictly less than this node, the right strictly
                    // greater.
                    assert_eq!(
                        t.cmp.compare(&c_node.key, &n.key),
                        want,
                        "child {:?} misordered under {:?}",
                        c_node.key,
                        n.key,
                    );

                    // Invariant 4: a red node never has a red child.
                    assert!(
                        !(n.is_red() && c_node.is_red()),
                        "red node {:?} has red child {:?}",
                        n.key,
                        c_node.key,
                    );

                    stack.push((c, depth + 1, blacks));
                }
                None => {
                    // Invariant 5: every path to an absent child passes
                    // through the same number of black nodes.
                    assert_eq!(
                        blacks, want_black_height,
                        "non-uniform black-height below {:?}",
                        n.key
                    );
                }
            }
        }
    }

    // Invariant 6: every node in the arena is reachable from the root.
    assert_eq!(visited, t.nodes.len(), "unreachable nodes in arena");

    // Invariant 7: an in-order walk is strictly ascending, which with the
    // per-edge ordering above confirms the whole-subtree BST property.
    let keys = t.iter().map(|(k, _)| k).collect::<Vec<_>>();
    assert_eq!(keys.len(), visited);
    for w in keys.windows(2) {
        assert_eq!(t.cmp.compare(w[0], w[1]), Ordering::Less);
    }

    max_height
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::node::Side;

    #[test]
    fn test_lfsr_unique() {
        let mut rand = Lfsr::default();
        let values = (0..10_000).map(|_| rand.next()).collect::<HashSet<_>>();
        assert_eq!(values.len(), 10_000);
    }

    #[test]
    #[should_panic(expected = "red root")]
    fn test_validate_rejects_red_root() {
        let mut t = RbTree::new();
        let (id, _) = t.insert(1, ());
        t.set_color(id.slot, Color::Red);

        validate_tree_structure(&t);
    }

    #[test]
    #[should_panic(expected = "non-uniform black-height")]
    fn test_validate_rejects_black_height() {
        let mut t = RbTree::new();
        t.insert(2, ());
        let (id, _) = t.insert(1, ());
        t.set_color(id.slot, Color::Black);

        validate_tree_structure(&t);
    }

    #[test]
    #[should_panic(expected = "misordered")]
    fn test_validate_rejects_misordered() {
        let mut t = RbTree::new();
        t.insert(2, ());
        let (id, _) = t.insert(1, ());

        // Relink the left child on the right.
        let root = t.root.unwrap();
        *t.nodes[root].child_mut(Side::Left) = None;
        *t.nodes[root].child_mut(Side::Right) = Some(id.slot);

        validate_tree_structure(&t);
    }
}
