//! Conversion between image files and binary grids
//!
//! Pixel `(x, y)` of an image corresponds to grid cell `(col = x, row = y)`
//! in both directions. Lit (white) pixels are `true`.

use std::path::Path;

use clap::ValueEnum;
use image::imageops::{self, BiLevel};
use image::{GrayImage, Luma};
use ndarray::Array2;

use crate::io::configuration::LUMA_THRESHOLD;
use crate::io::error::{EvolutionError, Result, image_load_error, invalid_parameter};
use crate::spatial::BinaryGrid;

/// How gray levels are reduced to black and white when decoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Quantization {
    /// Floyd-Steinberg error diffusion onto the two-level palette
    #[default]
    Dither,
    /// Plain cut at the mid gray level
    Threshold,
}

/// Read an image file as a monochrome grid using dithering
///
/// # Errors
///
/// Returns `FileNotFound` if nothing exists at `path`, `UnsupportedFormat`
/// if the file cannot be decoded, or `ImageLoad` for other read failures
pub fn decode(path: impl AsRef<Path>) -> Result<BinaryGrid> {
    decode_with(path, Quantization::Dither)
}

/// Read an image file as a monochrome grid with the given quantization
///
/// # Errors
///
/// Returns `FileNotFound` if nothing exists at `path`, `UnsupportedFormat`
/// if the file cannot be decoded, or `ImageLoad` for other read failures
pub fn decode_with(path: impl AsRef<Path>, quantization: Quantization) -> Result<BinaryGrid> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| image_load_error(path, e))?;
    Ok(grid_from_luma(&image.to_luma8(), quantization))
}

/// Quantize a grayscale image into a grid
pub fn grid_from_luma(luma: &GrayImage, quantization: Quantization) -> BinaryGrid {
    let mut levels = luma.clone();
    if quantization == Quantization::Dither {
        imageops::dither(&mut levels, &BiLevel);
    }

    // Array axes are [col, row], so pixel (x, y) lands at index (x, y)
    let lit = Array2::from_shape_fn(
        (levels.width() as usize, levels.height() as usize),
        |(col, row)| {
            levels
                .get_pixel_checked(col as u32, row as u32)
                .is_some_and(|&Luma([level])| level >= LUMA_THRESHOLD)
        },
    );
    BinaryGrid::from_array(&lit)
}

/// Render a grid as an 8-bit grayscale image, lit cells at full white
///
/// # Errors
///
/// Returns `InvalidParameter` if a dimension does not fit in `u32`
pub fn grid_to_luma(grid: &BinaryGrid) -> Result<GrayImage> {
    let width =
        u32::try_from(grid.width()).map_err(|e| invalid_parameter("width", &grid.width(), &e))?;
    let height = u32::try_from(grid.height())
        .map_err(|e| invalid_parameter("height", &grid.height(), &e))?;

    let lit = grid.to_array();
    Ok(GrayImage::from_fn(width, height, |x, y| {
        if lit.get((x as usize, y as usize)).copied().unwrap_or(false) {
            Luma([u8::MAX])
        } else {
            Luma([0])
        }
    }))
}

/// Write a grid as an image file, format chosen by the path's extension
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no pixels
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn encode(path: impl AsRef<Path>, grid: &BinaryGrid) -> Result<()> {
    let path = path.as_ref();
    if grid.is_empty() {
        return Err(invalid_parameter(
            "grid",
            &format!("{}x{}", grid.width(), grid.height()),
            &"cannot encode an image without pixels",
        ));
    }

    let image = grid_to_luma(grid)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EvolutionError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image.save(path).map_err(|e| EvolutionError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
