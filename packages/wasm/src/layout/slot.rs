//! Slot-based binary tree layout.
//!
//! Each level of the tree splits the canvas width into `2^level` equal slots.
//! A node is addressed by its level and a slot index built from the path to
//! it (left appends a 0 bit, right appends a 1 bit), and is centered in that
//! slot.
//!
//! # Algorithm Overview
//!
//! 1. **Pre-order walk:** Start at the root with `(level, slot) = (0, 0)`.
//!    Left children get `(level + 1, slot * 2)`, right children
//!    `(level + 1, slot * 2 + 1)`.
//! 2. **Placement:** `x = (canvas_width / 2^level) * (slot + 0.5)` and
//!    `y = top_margin + level * level_spacing`.
//!
//! Two nodes on the same level always have distinct slot indices, so they can
//! never share an x-coordinate, whatever the shape of the tree. The price is
//! that slots halve in width at every level, so deep sparse branches get
//! crowded.
//!
//! # Depth limit
//!
//! x is evaluated as `canvas_width * (2 * slot + 1) / 2^(level + 1)`. Up to
//! [`MAX_LAYOUT_DEPTH`] the odd numerator and the power of two are exact in
//! `f64`, so the only rounding is the final multiply, and neighbouring slots
//! stay distinct and strictly inside `(0, canvas_width)`. Nodes below that
//! level are not positioned: the walk stops there, and
//! [`extract_edges`](super::extract_edges) stops at the same level.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use crate::config::{CANVAS_WIDTH, LEVEL_SPACING, TOP_MARGIN};
use crate::tree::{BstNode, BstTree, Key};

/// Deepest level that receives a position (root = 0).
pub const MAX_LAYOUT_DEPTH: u32 = 48;

/// Configuration for the slot layout.
#[derive(Debug, Clone)]
pub struct SlotLayoutConfig {
    /// Width of the canvas divided into slots.
    pub canvas_width: f64,
    /// Vertical distance between consecutive levels.
    pub level_spacing: f64,
    /// Y-coordinate of the root.
    pub top_margin: f64,
}

impl Default for SlotLayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            level_spacing: LEVEL_SPACING,
            top_margin: TOP_MARGIN,
        }
    }
}

/// Position of a single node on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionRecord {
    /// Horizontal center of the node (top-left origin).
    pub x: f64,
    /// Vertical center of the node (top-left origin).
    pub y: f64,
    /// Depth from the root (root = 0).
    pub level: u32,
}

/// Key to position mapping for every node of one tree value.
///
/// Iteration is ordered by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutMapping {
    positions: BTreeMap<Key, PositionRecord>,
}

impl LayoutMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the position of a key.
    pub fn get(&self, key: Key) -> Option<&PositionRecord> {
        self.positions.get(&key)
    }

    /// Check if a key has a position.
    pub fn contains_key(&self, key: Key) -> bool {
        self.positions.contains_key(&key)
    }

    /// Get the number of positioned nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over `(key, position)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Key, PositionRecord> {
        self.positions.iter()
    }

    /// Get the smallest and largest x-coordinate, or None if empty.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        if self.positions.is_empty() {
            return None;
        }
        let (min_x, max_x) = self
            .positions
            .values()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            });
        Some((min_x, max_x))
    }

    /// Get the bounding box of all node centers as
    /// `(min_x, min_y, max_x, max_y)`, or None if empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let (min_x, max_x) = self.x_range()?;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in self.positions.values() {
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some((min_x, min_y, max_x, max_y))
    }

    fn insert(&mut self, key: Key, position: PositionRecord) {
        self.positions.insert(key, position);
    }
}

impl<'a> IntoIterator for &'a LayoutMapping {
    type Item = (&'a Key, &'a PositionRecord);
    type IntoIter = btree_map::Iter<'a, Key, PositionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

/// The slot layout engine.
#[derive(Debug, Clone, Default)]
pub struct SlotLayout {
    config: SlotLayoutConfig,
}

impl SlotLayout {
    /// Create a new slot layout with the given configuration.
    pub fn new(config: SlotLayoutConfig) -> Self {
        Self { config }
    }

    /// Create a slot layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SlotLayoutConfig::default())
    }

    /// Compute positions for every node of `tree` down to
    /// [`MAX_LAYOUT_DEPTH`].
    ///
    /// An empty tree yields an empty mapping. The result depends only on the
    /// shape of the tree.
    pub fn compute(&self, tree: &BstTree) -> LayoutMapping {
        let mut mapping = LayoutMapping::new();
        if let Some(root) = tree.root() {
            self.place(root, 0, 0, &mut mapping);
        }
        mapping
    }

    /// Position of the node in `slot` of the given `level`.
    ///
    /// `level` must not exceed [`MAX_LAYOUT_DEPTH`] and `slot` must be below
    /// `2^level`.
    fn position(&self, level: u32, slot: u64) -> PositionRecord {
        let numerator = (2 * slot + 1) as f64;
        let denominator = 2f64.powi(level as i32 + 1);
        PositionRecord {
            x: self.config.canvas_width * (numerator / denominator),
            y: self.config.top_margin + f64::from(level) * self.config.level_spacing,
            level,
        }
    }

    fn place(&self, node: &BstNode, level: u32, slot: u64, mapping: &mut LayoutMapping) {
        mapping.insert(node.key(), self.position(level, slot));

        if level == MAX_LAYOUT_DEPTH {
            return;
        }
        if let Some(left) = node.left() {
            self.place(left, level + 1, slot * 2, mapping);
        }
        if let Some(right) = node.right() {
            self.place(right, level + 1, slot * 2 + 1, mapping);
        }
    }
}

/// Compute the layout of `tree` with the default top margin.
pub fn compute_layout(tree: &BstTree, canvas_width: f64, level_spacing: f64) -> LayoutMapping {
    SlotLayout::new(SlotLayoutConfig {
        canvas_width,
        level_spacing,
        top_margin: TOP_MARGIN,
    })
    .compute(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_position(mapping: &LayoutMapping, key: Key, x: f64, y: f64, level: u32) {
        let p = mapping
            .get(key)
            .unwrap_or_else(|| panic!("Key {key} missing from layout"));
        assert!((p.x - x).abs() < 0.01, "Key {key}: x should be {x}, got {}", p.x);
        assert!((p.y - y).abs() < 0.01, "Key {key}: y should be {y}, got {}", p.y);
        assert_eq!(p.level, level, "Key {key}: wrong level");
    }

    #[test]
    fn test_empty_tree() {
        let mapping = SlotLayout::with_defaults().compute(&BstTree::new());
        assert!(mapping.is_empty());
        assert_eq!(mapping.x_range(), None);
        assert_eq!(mapping.bounds(), None);
    }

    #[test]
    fn test_single_node() {
        let mapping = compute_layout(&BstTree::from_keys([10]), 520.0, 80.0);

        assert_eq!(mapping.len(), 1);
        assert_position(&mapping, 10, 260.0, 20.0, 0);
    }

    #[test]
    fn test_right_child() {
        let mapping = compute_layout(&BstTree::from_keys([10, 20]), 520.0, 80.0);

        assert_position(&mapping, 10, 260.0, 20.0, 0);
        assert_position(&mapping, 20, 390.0, 100.0, 1);
    }

    #[test]
    fn test_right_chain() {
        let mapping = compute_layout(&BstTree::from_keys([10, 20, 30]), 520.0, 80.0);

        assert_position(&mapping, 30, 455.0, 180.0, 2);
    }

    #[test]
    fn test_full_tree() {
        let tree = BstTree::from_keys([50, 30, 70, 20, 40, 60, 80]);
        let mapping = SlotLayout::with_defaults().compute(&tree);

        assert_position(&mapping, 50, 260.0, 20.0, 0);
        assert_position(&mapping, 30, 130.0, 100.0, 1);
        assert_position(&mapping, 70, 390.0, 100.0, 1);
        assert_position(&mapping, 20, 65.0, 180.0, 2);
        assert_position(&mapping, 40, 195.0, 180.0, 2);
        assert_position(&mapping, 60, 325.0, 180.0, 2);
        assert_position(&mapping, 80, 455.0, 180.0, 2);
    }

    #[test]
    fn test_custom_spacing_and_margin() {
        let layout = SlotLayout::new(SlotLayoutConfig {
            canvas_width: 400.0,
            level_spacing: 50.0,
            top_margin: 10.0,
        });
        let mapping = layout.compute(&BstTree::from_keys([5, 1]));

        assert_position(&mapping, 5, 200.0, 10.0, 0);
        assert_position(&mapping, 1, 100.0, 60.0, 1);
    }

    #[test]
    fn test_mapping_covers_exactly_tree_keys() {
        let tree = BstTree::from_keys([50, 30, 70, 40]);
        let mapping = SlotLayout::with_defaults().compute(&tree);

        let mapped: Vec<Key> = mapping.iter().map(|(&k, _)| k).collect();
        let mut keys = tree.keys_in_order();
        keys.sort_unstable();
        assert_eq!(mapped, keys);
        assert!(!mapping.contains_key(20));
    }

    #[test]
    fn test_no_collisions_on_same_level() {
        // Zig-zag and skewed shapes stress the slot addressing
        let shapes: [&[Key]; 4] = [
            &[50, 30, 70, 20, 40, 60, 80],
            &[10, 20, 30, 40, 50, 60, 70],
            &[70, 60, 50, 40, 30, 20, 10],
            &[50, 20, 80, 30, 70, 40, 60],
        ];

        for keys in shapes {
            let tree = BstTree::from_keys(keys.iter().copied());
            let mapping = SlotLayout::with_defaults().compute(&tree);
            let mut seen: HashSet<(u32, u64)> = HashSet::new();
            for (key, p) in &mapping {
                assert!(
                    seen.insert((p.level, p.x.to_bits())),
                    "Key {key} collides at level {} x {} for {keys:?}",
                    p.level,
                    p.x
                );
            }
        }
    }

    #[test]
    fn test_layout_depends_only_on_shape() {
        // Same shape from different insertion orders
        let a = BstTree::from_keys([50, 30, 70, 20]);
        let b = BstTree::from_keys([50, 70, 30, 20]);
        assert_eq!(a, b);

        let layout = SlotLayout::with_defaults();
        assert_eq!(layout.compute(&a), layout.compute(&b));
    }

    #[test]
    fn test_bounds() {
        let mapping = SlotLayout::with_defaults().compute(&BstTree::from_keys([10, 20, 30]));
        assert_eq!(mapping.x_range(), Some((260.0, 455.0)));
        assert_eq!(mapping.bounds(), Some((260.0, 20.0, 455.0, 180.0)));
    }

    #[test]
    fn test_position_slot_addressing() {
        let layout = SlotLayout::with_defaults();

        // Level 3 has 8 slots of width 65
        let p = layout.position(3, 5);
        assert!((p.x - 357.5).abs() < 0.01, "got {}", p.x);
        assert!((p.y - 260.0).abs() < 0.01, "got {}", p.y);
    }

    #[test]
    fn test_deep_siblings_stay_apart() {
        // Right chain down to level 24, then 27 at level 25 with children
        // 26 and 28 on level 26
        let keys = (1..=25).chain([27, 26, 28]);
        let mapping = SlotLayout::with_defaults().compute(&BstTree::from_keys(keys));
        assert_eq!(mapping.len(), 28);

        let left = mapping.get(26).unwrap();
        let right = mapping.get(28).unwrap();
        assert_eq!((left.level, right.level), (26, 26));
        assert!(left.x < right.x, "26 at {} should be left of 28 at {}", left.x, right.x);
        for p in [left, right] {
            assert!(p.x > 0.0 && p.x < CANVAS_WIDTH, "x {} off canvas", p.x);
        }

        // Parent sits strictly between its children
        let parent = mapping.get(27).unwrap();
        assert!(left.x < parent.x && parent.x < right.x);
    }

    #[test]
    fn test_chain_is_cut_at_max_depth() {
        let depth = MAX_LAYOUT_DEPTH as Key;
        let mapping = SlotLayout::with_defaults().compute(&BstTree::from_keys(0..depth + 12));

        assert_eq!(mapping.len(), MAX_LAYOUT_DEPTH as usize + 1);
        assert_eq!(mapping.get(depth).map(|p| p.level), Some(MAX_LAYOUT_DEPTH));
        assert!(!mapping.contains_key(depth + 1));

        // Every positioned node is strictly right of its parent and on canvas
        let xs: Vec<f64> = mapping.iter().map(|(_, p)| p.x).collect();
        for pair in xs.windows(2) {
            assert!(pair[0] < pair[1], "x {} not left of {}", pair[0], pair[1]);
        }
        assert!(xs.iter().all(|&x| x > 0.0 && x < CANVAS_WIDTH));
    }
}
