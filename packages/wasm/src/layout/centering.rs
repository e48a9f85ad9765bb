//! Horizontal centering offset for a computed layout.

use super::slot::LayoutMapping;

/// Compute the x translation that centers the layout's bounding box in a
/// canvas of `canvas_width`.
///
/// Only node centers are considered. Returns 0 for an empty mapping.
pub fn compute_offset(layout: &LayoutMapping, canvas_width: f64) -> f64 {
    let Some((min_x, max_x)) = layout.x_range() else {
        return 0.0;
    };
    let tree_width = max_x - min_x;
    canvas_width / 2.0 - (min_x + tree_width / 2.0)
}
