//! Visualizer configuration and its defaults.

use crate::layout::SlotLayoutConfig;
use crate::tree::Key;

/// Canvas width in layout units.
pub const CANVAS_WIDTH: f64 = 520.0;
/// Canvas height in layout units.
pub const CANVAS_HEIGHT: f64 = 480.0;
/// Vertical distance between tree levels.
pub const LEVEL_SPACING: f64 = 80.0;
/// Y-coordinate of the root node.
pub const TOP_MARGIN: f64 = 20.0;
/// Radius of a drawn node circle.
pub const NODE_RADIUS: f64 = 20.0;
/// Values offered as insert buttons.
pub const DEFAULT_PALETTE: [Key; 7] = [50, 30, 70, 20, 40, 60, 80];

/// Configuration for a visualizer session.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    /// Canvas width (default: 520).
    pub canvas_width: f64,
    /// Canvas height (default: 480).
    pub canvas_height: f64,
    /// Vertical spacing per level (default: 80).
    pub level_spacing: f64,
    /// Root y-coordinate (default: 20).
    pub top_margin: f64,
    /// Node circle radius (default: 20).
    pub node_radius: f64,
    /// Insertable values, in button order.
    pub palette: Vec<Key>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            level_spacing: LEVEL_SPACING,
            top_margin: TOP_MARGIN,
            node_radius: NODE_RADIUS,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl VisualizerConfig {
    /// Default configuration with a different canvas size.
    pub fn with_canvas(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Default::default()
        }
    }

    /// Layout engine configuration derived from this config.
    pub fn slot_layout(&self) -> SlotLayoutConfig {
        SlotLayoutConfig {
            canvas_width: self.canvas_width,
            level_spacing: self.level_spacing,
            top_margin: self.top_margin,
        }
    }

    /// Check if `value` is one of the insertable values.
    pub fn palette_contains(&self, value: Key) -> bool {
        self.palette.contains(&value)
    }
}
