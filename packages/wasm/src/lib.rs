//! BST Visualizer - WASM Module
//!
//! This module provides the core of an interactive binary search tree
//! visualizer. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen; drawing, buttons and animation
//! live on the JavaScript side and consume the positions and segments
//! computed here.
//!
//! # Architecture
//!
//! - `tree`: Persistent BST with structural sharing
//! - `layout`: Slot-based positions, centering offset, edge segments
//! - `spatial`: R-tree index for pointer hit testing
//! - `session`: Stateful controller (history, offset policy, theme)
//! - `config` / `theme`: Canvas constants and color tokens

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod layout;
mod logging;
pub mod session;
pub mod spatial;
pub mod theme;
pub mod tree;

use config::VisualizerConfig;
use session::Session;
use theme::Theme;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    logging::install_panic_hook();
}

/// Main entry point for the visualizer.
///
/// This struct wraps the internal Session and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct BstVisualizerWasm {
    session: Session,
}

#[wasm_bindgen]
impl BstVisualizerWasm {
    /// Create a visualizer with the default 520x480 canvas.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: Session::with_defaults(),
        }
    }

    /// Create a visualizer for a canvas of a different size.
    #[wasm_bindgen(js_name = withCanvas)]
    pub fn with_canvas(width: f64, height: f64) -> Self {
        Self {
            session: Session::new(VisualizerConfig::with_canvas(width, height)),
        }
    }

    // =========================================================================
    // Tree Operations
    // =========================================================================

    /// Insert a palette value.
    ///
    /// Returns true if the tree changed. Duplicates and values outside the
    /// palette are ignored.
    pub fn insert(&mut self, value: i32) -> bool {
        self.session.insert(value).is_inserted()
    }

    /// Clear the tree, the insertion history and the offset.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Get the number of nodes in the tree.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.session.tree().len() as u32
    }

    /// Get the inserted values, oldest first.
    pub fn history(&self) -> Vec<i32> {
        self.session.history().to_vec()
    }

    /// Check if a value has already been inserted.
    #[wasm_bindgen(js_name = isInserted)]
    pub fn is_inserted(&self, value: i32) -> bool {
        self.session.is_inserted(value)
    }

    /// Get the configured palette values.
    pub fn palette(&self) -> Vec<i32> {
        self.session.config().palette.clone()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the horizontal offset applied to all positions.
    #[wasm_bindgen(js_name = offsetX)]
    pub fn offset_x(&self) -> f64 {
        self.session.offset_x()
    }

    /// Get node positions as a Float32Array.
    ///
    /// Layout is [key0, x0, y0, level0, key1, x1, y1, level1, ...] in key
    /// order, with the offset already applied to x.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float32Array {
        Float32Array::from(&self.positions_flat()[..])
    }

    /// Get edge segments as a Float32Array.
    ///
    /// Layout is [x1, y1, x2, y2, ...] in pre-order, one quadruple per edge.
    #[wasm_bindgen(js_name = getEdges)]
    pub fn get_edges(&self) -> Float32Array {
        Float32Array::from(&self.edges_flat()[..])
    }

    /// Get the full render frame as a JS object.
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.frame()).map_err(JsValue::from)
    }

    /// Find the key of the node under a canvas point.
    #[wasm_bindgen(js_name = nodeAt)]
    pub fn node_at(&self, x: f64, y: f64) -> Option<i32> {
        self.session.node_at(x, y)
    }

    /// Get the keys of the nodes whose centers lie in a canvas rectangle.
    #[wasm_bindgen(js_name = nodesInRect)]
    pub fn nodes_in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<i32> {
        self.session.nodes_in_rect(min_x, min_y, max_x, max_y)
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Get the active theme name.
    pub fn theme(&self) -> String {
        self.session.theme().name().to_string()
    }

    /// Set the theme by name (`"dark"` or `"light"`).
    ///
    /// Returns false for an unknown name.
    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&mut self, name: &str) -> bool {
        match Theme::from_name(name) {
            Some(theme) => {
                self.session.set_theme(theme);
                true
            }
            None => false,
        }
    }

    /// Switch between dark and light. Returns the new theme name.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> String {
        self.session.toggle_theme().name().to_string()
    }

    /// Get the active theme's color tokens as a JS object.
    pub fn colors(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.palette_colors()).map_err(JsValue::from)
    }
}

// Positions are computed in f64; the JS buffers narrow to f32.
impl BstVisualizerWasm {
    fn positions_flat(&self) -> Vec<f32> {
        let layout = self.session.layout();
        let offset_x = self.session.offset_x();
        let mut flat = Vec::with_capacity(layout.len() * 4);
        for (&key, p) in layout {
            flat.push(key as f32);
            flat.push((p.x + offset_x) as f32);
            flat.push(p.y as f32);
            flat.push(p.level as f32);
        }
        flat
    }

    fn edges_flat(&self) -> Vec<f32> {
        let edges = self.session.edges();
        let mut flat = Vec::with_capacity(edges.len() * 4);
        for edge in &edges {
            flat.extend_from_slice(&[
                edge.x1 as f32,
                edge.y1 as f32,
                edge.x2 as f32,
                edge.y2 as f32,
            ]);
        }
        flat
    }
}

impl Default for BstVisualizerWasm {
    fn default() -> Self {
        Self::new()
    }
}
