//! Driver constants and runtime configuration defaults

// File locations used when the command line does not override them
/// Image evolved toward when no input is given
pub const DEFAULT_INPUT_PATH: &str = "input.jpg";
/// Where the monochrome conversion of the input is written
pub const DEFAULT_TARGET_PATH: &str = "target.png";
/// Where periodic progress snapshots are written
pub const DEFAULT_SNAPSHOT_PATH: &str = "out.png";
/// Where the final evolved grid is written
pub const DEFAULT_OUTPUT_PATH: &str = "final_out.png";

/// Similarity the driver evolves toward
pub const DEFAULT_TARGET_FITNESS: f64 = 0.7;

/// Iterations between progress reports (0 disables reporting)
pub const DEFAULT_REPORT_INTERVAL: usize = 5000;

/// Luma level at or above which a pixel counts as lit when thresholding
pub const LUMA_THRESHOLD: u8 = 128;

// Progress bar display settings
/// Progress bar length; fitness is shown in per-mille
pub const FITNESS_BAR_SCALE: u64 = 1000;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Timelapse settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 100;
/// Frames held before the timelapse recorder starts thinning
pub const MAX_RECORDED_FRAMES: usize = 120;
