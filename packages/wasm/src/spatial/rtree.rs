//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Node under a pointer (within the node radius)
//! - Rectangle intersection

use std::fmt;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::layout::LayoutMapping;
use crate::tree::Key;

/// A rendered node center with its key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    /// The node key.
    pub key: Key,
    /// X coordinate (offset applied).
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl NodePoint {
    /// Create a new NodePoint.
    pub fn new(key: Key, x: f64, y: f64) -> Self {
        Self { key, x, y }
    }
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over rendered node centers.
pub struct SpatialIndex {
    tree: RTree<NodePoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Rebuild the index from a layout, shifting every x by `offset_x`.
    pub fn rebuild(&mut self, layout: &LayoutMapping, offset_x: f64) {
        let points: Vec<_> = layout
            .iter()
            .map(|(&key, p)| NodePoint::new(key, p.x + offset_x, p.y))
            .collect();

        self.tree = RTree::bulk_load(points);
    }

    /// Find the key of the nearest node within `max_distance` of a point.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<Key> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.key)
    }

    /// Find the keys of all nodes whose centers lie in a rectangle.
    pub fn in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<Key> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        let mut keys: Vec<Key> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|point| point.key)
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Remove all nodes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.len())
            .finish()
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
