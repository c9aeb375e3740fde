//! Packed boolean grid addressed by column and row
//!
//! Cells are stored column-major in a single bit vector, so cell `(col, row)`
//! lives at bit `col * height + row`. Comparing two grids of the same shape
//! therefore reduces to a word-parallel XOR over the backing storage.

use bitvec::prelude::*;
use ndarray::Array2;
use std::fmt;

use crate::io::error::{EvolutionError, Result};

/// Monochrome image as a fixed-size two-dimensional array of booleans
///
/// `true` is a lit (white) pixel and `false` a dark one. The shape is set at
/// construction and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryGrid {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl BinaryGrid {
    /// Create a grid with every cell set to `false`
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, false)
    }

    /// Create a grid with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: bool) -> Self {
        Self {
            bits: BitVec::repeat(value, width * height),
            width,
            height,
        }
    }

    /// Create a grid by evaluating `f(col, row)` for every cell
    ///
    /// Cells are visited column by column, top to bottom within a column.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let bits = (0..width)
            .flat_map(|col| (0..height).map(move |row| (col, row)))
            .map(|(col, row)| f(col, row))
            .collect();

        Self {
            bits,
            width,
            height,
        }
    }

    /// Build a grid from an array of shape `(width, height)` indexed `[col, row]`
    pub fn from_array(array: &Array2<bool>) -> Self {
        let (width, height) = array.dim();
        Self::from_fn(width, height, |col, row| {
            array.get((col, row)).copied().unwrap_or(false)
        })
    }

    /// Copy the grid into an array of shape `(width, height)` indexed `[col, row]`
    pub fn to_array(&self) -> Array2<bool> {
        Array2::from_shape_fn((self.width, self.height), |(col, row)| {
            self.get(col, row).unwrap_or(false)
        })
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Shape as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the grid has no cells at all
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` has the same width and height
    pub const fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    const fn index(&self, col: usize, row: usize) -> Option<usize> {
        if col < self.width && row < self.height {
            Some(col * self.height + row)
        } else {
            None
        }
    }

    /// Read a cell, `None` when out of bounds
    pub fn get(&self, col: usize, row: usize) -> Option<bool> {
        let index = self.index(col, row)?;
        self.bits.get(index).as_deref().copied()
    }

    /// Write a cell and return its previous value, `None` when out of bounds
    pub fn set(&mut self, col: usize, row: usize, value: bool) -> Option<bool> {
        let index = self.index(col, row)?;
        let mut bit = self.bits.get_mut(index)?;
        let previous = *bit;
        *bit = value;
        Some(previous)
    }

    /// Invert a cell and return its new value, `None` when out of bounds
    pub fn flip(&mut self, col: usize, row: usize) -> Option<bool> {
        let index = self.index(col, row)?;
        let mut bit = self.bits.get_mut(index)?;
        let flipped = !*bit;
        *bit = flipped;
        Some(flipped)
    }

    /// Number of `true` cells
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Grid with every cell inverted
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            bits: !self.bits.clone(),
            width: self.width,
            height: self.height,
        }
    }

    /// Number of cells where `self` and `other` disagree
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the grids differ in shape
    pub fn mismatch_count(&self, other: &Self) -> Result<usize> {
        self.ensure_same_shape(other)?;
        let mut difference = self.bits.clone();
        difference ^= other.bits.as_bitslice();
        Ok(difference.count_ones())
    }

    /// Overwrite every cell with the contents of `other` without reallocating
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the grids differ in shape
    pub fn copy_from(&mut self, other: &Self) -> Result<()> {
        self.ensure_same_shape(other)?;
        self.bits.copy_from_bitslice(&other.bits);
        Ok(())
    }

    /// Iterate over `(col, row, value)` in storage order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let height = self.height;
        self.bits
            .iter()
            .by_vals()
            .enumerate()
            .map(move |(index, value)| (index / height, index % height, value))
    }

    fn ensure_same_shape(&self, other: &Self) -> Result<()> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(EvolutionError::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            })
        }
    }
}

/// Renders rows top to bottom, `#` for lit cells and `.` for dark ones
impl fmt::Display for BinaryGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.get(col, row).unwrap_or(false) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
