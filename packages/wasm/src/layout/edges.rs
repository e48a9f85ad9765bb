//! Parent-to-child edge segments for rendering.
//!
//! Segments run from the bottom of the parent's circle to the top of the
//! child's circle, so lines never cross a node's interior. The horizontal
//! offset is applied to both endpoints; the node radius only moves y.
//!
//! The walk follows the layout's depth limit: nodes below
//! [`MAX_LAYOUT_DEPTH`] have no position, so no segment leads to them.

use serde::Serialize;

use super::slot::{LayoutMapping, MAX_LAYOUT_DEPTH, PositionRecord};
use crate::config::NODE_RADIUS;
use crate::tree::{BstNode, BstTree, Key};

/// A drawable line between a parent and one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSegment {
    /// Key of the parent node.
    pub from_key: Key,
    /// Key of the child node.
    pub to_key: Key,
    /// Start x (parent center).
    pub x1: f64,
    /// Start y (bottom of the parent circle).
    pub y1: f64,
    /// End x (child center).
    pub x2: f64,
    /// End y (top of the child circle).
    pub y2: f64,
}

/// Extract edge segments using the default node radius.
///
/// See [`extract_edges_with_radius`].
pub fn extract_edges(tree: &BstTree, layout: &LayoutMapping, offset_x: f64) -> Vec<EdgeSegment> {
    extract_edges_with_radius(tree, layout, offset_x, NODE_RADIUS)
}

/// Extract one segment per parent-child link, in pre-order.
///
/// # Panics
///
/// Panics if `layout` lacks a position for any key of `tree` down to
/// [`MAX_LAYOUT_DEPTH`]. The mapping must come from the same tree value.
pub fn extract_edges_with_radius(
    tree: &BstTree,
    layout: &LayoutMapping,
    offset_x: f64,
    node_radius: f64,
) -> Vec<EdgeSegment> {
    let mut segments = Vec::with_capacity(tree.len().saturating_sub(1));
    if let Some(root) = tree.root() {
        collect(root, 0, layout, offset_x, node_radius, &mut segments);
    }
    segments
}

fn collect(
    node: &BstNode,
    level: u32,
    layout: &LayoutMapping,
    offset_x: f64,
    node_radius: f64,
    segments: &mut Vec<EdgeSegment>,
) {
    let parent = position_of(layout, node.key());
    if level == MAX_LAYOUT_DEPTH {
        return;
    }

    for child in [node.left(), node.right()].into_iter().flatten() {
        let child_pos = position_of(layout, child.key());
        segments.push(EdgeSegment {
            from_key: node.key(),
            to_key: child.key(),
            x1: parent.x + offset_x,
            y1: parent.y + node_radius,
            x2: child_pos.x + offset_x,
            y2: child_pos.y - node_radius,
        });
    }

    for child in [node.left(), node.right()].into_iter().flatten() {
        collect(child, level + 1, layout, offset_x, node_radius, segments);
    }
}

fn position_of(layout: &LayoutMapping, key: Key) -> PositionRecord {
    match layout.get(key) {
        Some(p) => *p,
        None => panic!(
            "layout has no position for key {key}; it was computed from a different tree"
        ),
    }
}
