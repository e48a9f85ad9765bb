//! Session - the stateful controller around the pure core.
//!
//! The session owns the current tree value and everything the UI needs
//! between user actions:
//! - The insertion history (drives which palette buttons are disabled)
//! - The horizontal offset, fixed when the first node is inserted
//! - The active color theme
//! - A spatial index for pointer hit testing
//!
//! Every mutation goes through `&mut self`, so insertions are serialized:
//! the tree update and the layout recompute finish before the next one starts.

use serde::Serialize;

use crate::config::VisualizerConfig;
use crate::layout::{
    EdgeSegment, LayoutMapping, SlotLayout, compute_offset, extract_edges_with_radius,
};
use crate::logging::console_log;
use crate::spatial::SpatialIndex;
use crate::theme::{Theme, ThemePalette};
use crate::tree::{BstTree, Key};

/// Result of a user insertion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The value was added to the tree.
    Inserted,
    /// The value was inserted earlier in this session; nothing changed.
    Duplicate,
    /// The value is not offered by the palette; nothing changed.
    NotInPalette,
}

impl InsertOutcome {
    /// Check if the tree changed.
    #[inline]
    pub fn is_inserted(self) -> bool {
        self == Self::Inserted
    }
}

/// State of one palette button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteButton {
    /// Value the button inserts.
    pub value: Key,
    /// False once the value is in the tree.
    pub enabled: bool,
}

/// A node ready to draw, with the session offset applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    /// Node key.
    pub key: Key,
    /// Canvas x of the node center.
    pub x: f64,
    /// Canvas y of the node center.
    pub y: f64,
    /// Depth from the root.
    pub level: u32,
    /// True for the most recently inserted node (animate it in).
    pub is_new: bool,
}

/// Everything the renderer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Nodes in key order.
    pub nodes: Vec<RenderedNode>,
    /// Parent-child segments in pre-order.
    pub edges: Vec<EdgeSegment>,
    /// Horizontal offset already applied to nodes and edges.
    pub offset_x: f64,
    /// Box around the node centers as `[min_x, min_y, max_x, max_y]`,
    /// offset applied. None for an empty tree.
    pub bounds: Option<[f64; 4]>,
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Node circle radius.
    pub node_radius: f64,
    /// Active theme.
    pub theme: Theme,
    /// Color tokens of the active theme.
    pub colors: ThemePalette,
    /// Palette buttons in configured order.
    pub buttons: Vec<PaletteButton>,
}

/// Interactive visualizer session.
#[derive(Debug)]
pub struct Session {
    config: VisualizerConfig,
    layout_engine: SlotLayout,
    tree: BstTree,
    layout: LayoutMapping,
    history: Vec<Key>,
    offset_x: f64,
    theme: Theme,
    last_inserted: Option<Key>,
    spatial: SpatialIndex,
}

impl Session {
    /// Create a session with the given configuration.
    pub fn new(config: VisualizerConfig) -> Self {
        let layout_engine = SlotLayout::new(config.slot_layout());
        Self {
            config,
            layout_engine,
            tree: BstTree::new(),
            layout: LayoutMapping::new(),
            history: Vec::new(),
            offset_x: 0.0,
            theme: Theme::default(),
            last_inserted: None,
            spatial: SpatialIndex::new(),
        }
    }

    /// Create a session with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(VisualizerConfig::default())
    }

    // =========================================================================
    // Tree Operations
    // =========================================================================

    /// Insert a palette value.
    ///
    /// Values already inserted and values outside the palette are skipped
    /// before the tree model is consulted. On success the layout is
    /// recomputed from scratch. The offset is computed only when the tree
    /// goes from empty to one node and then held until [`Session::reset`],
    /// so existing nodes never shift when new ones appear.
    pub fn insert(&mut self, value: Key) -> InsertOutcome {
        if !self.config.palette_contains(value) {
            console_log!("bst: {value} is not in the palette, ignored");
            return InsertOutcome::NotInPalette;
        }
        if self.history.contains(&value) {
            console_log!("bst: {value} already inserted, ignored");
            return InsertOutcome::Duplicate;
        }

        let was_empty = self.tree.is_empty();
        self.tree = self.tree.insert(value);
        self.history.push(value);
        self.layout = self.layout_engine.compute(&self.tree);

        if was_empty {
            self.offset_x = compute_offset(&self.layout, self.config.canvas_width);
        }

        self.spatial.rebuild(&self.layout, self.offset_x);
        self.last_inserted = Some(value);

        console_log!(
            "bst: inserted {value} ({} nodes, height {})",
            self.tree.len(),
            self.tree.height()
        );
        InsertOutcome::Inserted
    }

    /// Clear the tree, the history and the offset.
    pub fn reset(&mut self) {
        self.tree = BstTree::new();
        self.layout = LayoutMapping::new();
        self.history.clear();
        self.offset_x = 0.0;
        self.last_inserted = None;
        self.spatial.clear();
        console_log!("bst: reset");
    }

    /// Get the current tree value.
    pub fn tree(&self) -> &BstTree {
        &self.tree
    }

    /// Get the layout of the current tree.
    pub fn layout(&self) -> &LayoutMapping {
        &self.layout
    }

    /// Get the edge segments of the current tree, offset applied.
    pub fn edges(&self) -> Vec<EdgeSegment> {
        extract_edges_with_radius(
            &self.tree,
            &self.layout,
            self.offset_x,
            self.config.node_radius,
        )
    }

    /// Get the horizontal offset.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Get the inserted values, oldest first.
    pub fn history(&self) -> &[Key] {
        &self.history
    }

    /// Check if a value has been inserted.
    pub fn is_inserted(&self, value: Key) -> bool {
        self.history.contains(&value)
    }

    /// Get the most recently inserted value.
    pub fn last_inserted(&self) -> Option<Key> {
        self.last_inserted
    }

    /// Get the session configuration.
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Get the palette buttons with their enabled state.
    pub fn palette_state(&self) -> Vec<PaletteButton> {
        self.config
            .palette
            .iter()
            .map(|&value| PaletteButton {
                value,
                enabled: !self.is_inserted(value),
            })
            .collect()
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Get the active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set the active theme.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            console_log!("bst: theme {} -> {}", self.theme, theme);
        }
        self.theme = theme;
    }

    /// Switch between dark and light, returning the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    /// Get the color tokens of the active theme.
    pub fn palette_colors(&self) -> ThemePalette {
        self.theme.palette()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Find the node whose circle contains a canvas point.
    pub fn node_at(&self, x: f64, y: f64) -> Option<Key> {
        self.spatial.nearest_within(x, y, self.config.node_radius)
    }

    /// Find the nodes whose centers lie in a canvas rectangle, in key order.
    pub fn nodes_in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<Key> {
        self.spatial.in_rect(min_x, min_y, max_x, max_y)
    }

    /// Get the box around the node centers, offset applied.
    pub fn bounds(&self) -> Option<[f64; 4]> {
        let (min_x, min_y, max_x, max_y) = self.layout.bounds()?;
        Some([min_x + self.offset_x, min_y, max_x + self.offset_x, max_y])
    }

    /// Build the render frame for the current state.
    pub fn frame(&self) -> Frame {
        let nodes = self
            .layout
            .iter()
            .map(|(&key, p)| RenderedNode {
                key,
                x: p.x + self.offset_x,
                y: p.y,
                level: p.level,
                is_new: self.last_inserted == Some(key),
            })
            .collect();

        Frame {
            nodes,
            edges: self.edges(),
            offset_x: self.offset_x,
            bounds: self.bounds(),
            width: self.config.canvas_width,
            height: self.config.canvas_height,
            node_radius: self.config.node_radius,
            theme: self.theme,
            colors: self.palette_colors(),
            buttons: self.palette_state(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::with_defaults()
    }
}
