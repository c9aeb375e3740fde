//! Frame capture and GIF generation for evolution timelapses

use std::path::Path;

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, GrayImage, Luma, Rgba, RgbaImage};

use crate::io::error::{EvolutionError, Result, invalid_parameter};
use crate::io::image::grid_to_luma;
use crate::spatial::BinaryGrid;

/// Captured grid at a given iteration
#[derive(Debug, Clone)]
pub struct RecordedFrame {
    /// Iteration the grid was observed at
    pub iteration: usize,
    /// Grid rendered as grayscale
    pub image: GrayImage,
}

/// Records progress snapshots for a timelapse with bounded memory
///
/// Once `max_frames` frames are held, every other frame is discarded and the
/// recording stride doubles, so the timelapse always spans the whole run.
pub struct FrameRecorder {
    frames: Vec<RecordedFrame>,
    max_frames: usize,
    stride: usize,
    offered: usize,
}

impl FrameRecorder {
    /// Create a recorder holding at most `max_frames` frames (minimum 2)
    pub fn new(max_frames: usize) -> Self {
        let max_frames = max_frames.max(2);
        Self {
            frames: Vec::with_capacity(max_frames),
            max_frames,
            stride: 1,
            offered: 0,
        }
    }

    /// Offer a progress snapshot; kept only if it falls on the current stride
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be rendered
    pub fn record(&mut self, iteration: usize, grid: &BinaryGrid) -> Result<()> {
        let index = self.offered;
        self.offered += 1;

        if index % self.stride != 0 {
            return Ok(());
        }

        if self.frames.len() >= self.max_frames {
            self.thin();
            if index % self.stride != 0 {
                return Ok(());
            }
        }

        self.push(iteration, grid)
    }

    /// Append the final grid regardless of stride
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be rendered
    pub fn record_final(&mut self, iteration: usize, grid: &BinaryGrid) -> Result<()> {
        if self.frames.last().is_some_and(|f| f.iteration == iteration) {
            return Ok(());
        }
        self.push(iteration, grid)
    }

    fn push(&mut self, iteration: usize, grid: &BinaryGrid) -> Result<()> {
        self.frames.push(RecordedFrame {
            iteration,
            image: grid_to_luma(grid)?,
        });
        Ok(())
    }

    fn thin(&mut self) {
        let mut keep = false;
        self.frames.retain(|_| {
            keep = !keep;
            keep
        });
        self.stride *= 2;
    }

    /// Frames currently held, oldest first
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Number of frames currently held
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// The last frame is held for longer so the result is visible.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: impl AsRef<Path>, frame_delay_ms: u32) -> Result<()> {
        let output_path = output_path.as_ref();
        if self.frames.is_empty() {
            return Err(invalid_parameter(
                "frames",
                &0,
                &"no frames captured for the timelapse",
            ));
        }

        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .map(|recorded| render_frame(&recorded.image, frame_delay_ms))
            .collect();

        if let Some(last) = self.frames.last() {
            frames.push(render_frame(&last.image, frame_delay_ms.saturating_mul(25)));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| EvolutionError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| EvolutionError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| EvolutionError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }
}

fn render_frame(image: &GrayImage, delay_ms: u32) -> Frame {
    let rgba = RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let Luma([level]) = *image.get_pixel(x, y);
        Rgba([level, level, level, u8::MAX])
    });
    Frame::from_parts(rgba, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
}
