//! Node and tree value types.
//!
//! A tree is a chain of immutable nodes. Each node has:
//! - An integer key
//! - Optional left and right children, held through `Rc`
//!
//! Insertion rebuilds only the nodes on the root-to-leaf path it walks and
//! reuses every other subtree by reference. Keys smaller than a node go left;
//! equal and greater keys go right.

use std::rc::Rc;

/// Key stored in a tree node.
pub type Key = i32;

/// A single immutable tree node.
///
/// Nodes are never mutated after construction. Children are shared with
/// older tree versions through reference counting.
#[derive(Debug, PartialEq, Eq)]
pub struct BstNode {
    key: Key,
    left: Option<Rc<BstNode>>,
    right: Option<Rc<BstNode>>,
}

impl BstNode {
    /// Create a node without children.
    #[inline]
    pub fn leaf(key: Key) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// Get the node's key.
    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    /// Get the left child, if any.
    #[inline]
    pub fn left(&self) -> Option<&Rc<BstNode>> {
        self.left.as_ref()
    }

    /// Get the right child, if any.
    #[inline]
    pub fn right(&self) -> Option<&Rc<BstNode>> {
        self.right.as_ref()
    }

    fn len(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.len()) + self.right.as_ref().map_or(0, |n| n.len())
    }

    fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.height());
        let right = self.right.as_ref().map_or(0, |n| n.height());
        1 + left.max(right)
    }

    fn collect_in_order(&self, out: &mut Vec<Key>) {
        if let Some(left) = &self.left {
            left.collect_in_order(out);
        }
        out.push(self.key);
        if let Some(right) = &self.right {
            right.collect_in_order(out);
        }
    }

    fn collect_pre_order(&self, out: &mut Vec<Key>) {
        out.push(self.key);
        if let Some(left) = &self.left {
            left.collect_pre_order(out);
        }
        if let Some(right) = &self.right {
            right.collect_pre_order(out);
        }
    }

    /// Check keys against the half-open window `[lower, upper)` inherited
    /// from the ancestors.
    fn within(&self, lower: Option<Key>, upper: Option<Key>) -> bool {
        if lower.is_some_and(|lo| self.key < lo) || upper.is_some_and(|hi| self.key >= hi) {
            return false;
        }
        let left_ok = self
            .left
            .as_ref()
            .is_none_or(|n| n.within(lower, Some(self.key)));
        let right_ok = self
            .right
            .as_ref()
            .is_none_or(|n| n.within(Some(self.key), upper));
        left_ok && right_ok
    }
}

/// An immutable binary search tree value.
///
/// Cloning is O(1): clones share the same root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BstTree {
    root: Option<Rc<BstNode>>,
}

impl BstTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Build a tree by inserting keys in order.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        keys.into_iter()
            .fold(Self::new(), |tree, key| tree.insert(key))
    }

    /// Get the root node, if the tree is not empty.
    #[inline]
    pub fn root(&self) -> Option<&Rc<BstNode>> {
        self.root.as_ref()
    }

    /// Check if the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return a new tree with `value` inserted.
    ///
    /// `self` is left untouched. Only the nodes on the path from the root to
    /// the insertion point are allocated; all other subtrees are shared.
    /// Duplicates are not rejected here: an equal key is placed in the right
    /// subtree like any greater key.
    pub fn insert(&self, value: Key) -> Self {
        Self {
            root: Some(insert_node(self.root.as_ref(), value)),
        }
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.len())
    }

    /// Get the number of levels (0 for an empty tree).
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.height())
    }

    /// Check if a key is present, following the same routing as insertion.
    pub fn contains(&self, value: Key) -> bool {
        let mut current = self.root.as_ref();
        while let Some(node) = current {
            if value == node.key {
                return true;
            }
            current = if value < node.key {
                node.left.as_ref()
            } else {
                node.right.as_ref()
            };
        }
        false
    }

    /// Keys in in-order sequence (sorted for a valid tree).
    pub fn keys_in_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        if let Some(root) = &self.root {
            root.collect_in_order(&mut keys);
        }
        keys
    }

    /// Keys in pre-order sequence (root, left subtree, right subtree).
    pub fn keys_pre_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        if let Some(root) = &self.root {
            root.collect_pre_order(&mut keys);
        }
        keys
    }

    /// Check the search-tree ordering: left keys strictly smaller, right keys
    /// greater or equal, at every node.
    pub fn is_valid_bst(&self) -> bool {
        self.root.as_ref().is_none_or(|n| n.within(None, None))
    }
}

/// Insert `value` into `tree`, returning the new tree.
///
/// Free-function form of [`BstTree::insert`].
#[inline]
pub fn insert(tree: &BstTree, value: Key) -> BstTree {
    tree.insert(value)
}

fn insert_node(node: Option<&Rc<BstNode>>, value: Key) -> Rc<BstNode> {
    match node {
        None => Rc::new(BstNode::leaf(value)),
        Some(node) if value < node.key => Rc::new(BstNode {
            key: node.key,
            left: Some(insert_node(node.left.as_ref(), value)),
            right: node.right.clone(),
        }),
        Some(node) => Rc::new(BstNode {
            key: node.key,
            left: node.left.clone(),
            right: Some(insert_node(node.right.as_ref(), value)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All permutations of `items` (Heap's algorithm).
    fn permutations(items: &[Key]) -> Vec<Vec<Key>> {
        fn generate(k: usize, items: &mut Vec<Key>, out: &mut Vec<Vec<Key>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            generate(k - 1, items, out);
            for i in 0..k - 1 {
                if k % 2 == 0 {
                    items.swap(i, k - 1);
                } else {
                    items.swap(0, k - 1);
                }
                generate(k - 1, items, out);
            }
        }

        let mut items = items.to_vec();
        let mut out = Vec::new();
        let len = items.len();
        generate(len, &mut items, &mut out);
        out
    }

    #[test]
    fn test_insert_into_empty() {
        let tree = BstTree::new().insert(10);

        let root = tree.root().unwrap();
        assert_eq!(root.key(), 10);
        assert!(root.left().is_none() && root.right().is_none());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_smaller_goes_left_larger_goes_right() {
        let tree = BstTree::from_keys([10, 5, 20]);
        let root = tree.root().unwrap();

        assert_eq!(root.left().map(|n| n.key()), Some(5));
        assert_eq!(root.right().map(|n| n.key()), Some(20));
    }

    #[test]
    fn test_chain_goes_right() {
        let tree = BstTree::from_keys([10, 20, 30]);
        let root = tree.root().unwrap();
        let twenty = root.right().unwrap();

        assert!(root.left().is_none());
        assert_eq!(twenty.key(), 20);
        assert_eq!(twenty.right().map(|n| n.key()), Some(30));
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_equal_key_routes_right() {
        let tree = BstTree::from_keys([10, 10]);
        let root = tree.root().unwrap();

        assert!(root.left().is_none());
        assert_eq!(root.right().map(|n| n.key()), Some(10));
        assert!(tree.is_valid_bst());
    }

    #[test]
    fn test_original_tree_unchanged() {
        let before = BstTree::from_keys([50, 30, 70]);
        let snapshot = before.keys_pre_order();

        let after = before.insert(20);

        assert_eq!(before.keys_pre_order(), snapshot);
        assert_eq!(before.len(), 3);
        assert_eq!(after.len(), 4);
        assert!(!before.contains(20));
        assert!(after.contains(20));
    }

    #[test]
    fn test_untouched_subtrees_are_shared() {
        let before = BstTree::from_keys([50, 30, 70, 20, 40, 60, 80]);
        let after = before.insert(65);

        let old_root = before.root().unwrap();
        let new_root = after.root().unwrap();
        assert!(!Rc::ptr_eq(old_root, new_root), "Root is on the path");

        // Left subtree is off the path
        assert!(Rc::ptr_eq(old_root.left().unwrap(), new_root.left().unwrap()));

        // 70 is on the path, its right child 80 is not
        let old_70 = old_root.right().unwrap();
        let new_70 = new_root.right().unwrap();
        assert!(!Rc::ptr_eq(old_70, new_70));
        assert!(Rc::ptr_eq(old_70.right().unwrap(), new_70.right().unwrap()));

        // 60 gained a child, so it was rebuilt
        let old_60 = old_70.left().unwrap();
        let new_60 = new_70.left().unwrap();
        assert!(!Rc::ptr_eq(old_60, new_60));
        assert_eq!(new_60.right().map(|n| n.key()), Some(65));
    }

    #[test]
    fn test_every_order_is_a_valid_bst() {
        let palette = [50, 30, 70, 20, 40, 60, 80];
        let mut sorted = palette.to_vec();
        sorted.sort_unstable();

        let orders = permutations(&palette);
        assert_eq!(orders.len(), 5040);

        for order in orders {
            let tree = BstTree::from_keys(order.iter().copied());
            assert!(tree.is_valid_bst(), "Invalid BST for order {order:?}");
            assert_eq!(tree.keys_in_order(), sorted, "In-order not sorted for {order:?}");
        }
    }

    #[test]
    fn test_different_orders_different_shapes() {
        let balanced = BstTree::from_keys([20, 10, 30]);
        let chain = BstTree::from_keys([10, 20, 30]);

        assert_ne!(balanced, chain);
        assert_eq!(balanced.keys_in_order(), chain.keys_in_order());
        assert_eq!(balanced.height(), 2);
        assert_eq!(chain.height(), 3);
    }

    #[test]
    fn test_contains() {
        let tree = BstTree::from_keys([50, 30, 70, 40]);

        assert!(tree.contains(40));
        assert!(tree.contains(70));
        assert!(!tree.contains(45));
        assert!(!BstTree::new().contains(0));
    }

    #[test]
    fn test_pre_order() {
        let tree = BstTree::from_keys([50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(tree.keys_pre_order(), vec![50, 30, 20, 40, 70, 60, 80]);
    }

    #[test]
    fn test_invalid_bst_detected() {
        let bad = BstTree {
            root: Some(Rc::new(BstNode {
                key: 10,
                left: Some(Rc::new(BstNode::leaf(15))),
                right: None,
            })),
        };
        assert!(!bad.is_valid_bst());

        let equal_on_left = BstTree {
            root: Some(Rc::new(BstNode {
                key: 10,
                left: Some(Rc::new(BstNode::leaf(10))),
                right: None,
            })),
        };
        assert!(!equal_on_left.is_valid_bst());
    }

    #[test]
    fn test_empty_tree() {
        let tree = BstTree::new();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.keys_in_order().is_empty());
        assert!(tree.is_valid_bst());
    }

    #[test]
    fn test_free_function_insert() {
        let tree = insert(&BstTree::new(), 7);
        assert_eq!(tree.keys_in_order(), vec![7]);
    }
}
