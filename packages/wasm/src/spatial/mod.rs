//! Spatial indexing for pointer hit testing.
//!
//! This module provides an R-tree over rendered node centers so the
//! presentation layer can map a pointer position back to a node key.

mod rtree;

pub use rtree::{NodePoint, SpatialIndex};
