/// Command-line parsing and the end-to-end driver
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error taxonomy shared by the whole crate
pub mod error;
/// Image file decoding and encoding
pub mod image;
/// Progress bar and snapshot observer
pub mod progress;
/// Timelapse capture and GIF export
pub mod visualization;
