//! Spatial data structures for monochrome pixel grids

/// Fixed-size packed boolean grid
pub mod grid;

pub use grid::BinaryGrid;
