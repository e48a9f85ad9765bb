//! Layout algorithms for tree visualization.
//!
//! This module turns a tree value into on-canvas geometry: a position per
//! key, a horizontal centering offset, and the parent-to-child segments to
//! draw. Every function here is pure; the layout is always recomputed from
//! scratch for the current tree.

pub mod centering;
pub mod edges;
pub mod slot;

pub use centering::compute_offset;
pub use edges::{EdgeSegment, extract_edges, extract_edges_with_radius};
pub use slot::{
    LayoutMapping, MAX_LAYOUT_DEPTH, PositionRecord, SlotLayout, SlotLayoutConfig, compute_layout,
};
