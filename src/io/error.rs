//! Error types for grid evaluation, evolution setup and image I/O

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all crate operations
#[derive(Debug)]
pub enum EvolutionError {
    /// Two grids that must share a shape do not
    ///
    /// Indicates a caller bug rather than a recoverable runtime condition.
    DimensionMismatch {
        /// Shape of the reference grid as `(width, height)`
        expected: (usize, usize),
        /// Shape of the offending grid as `(width, height)`
        found: (usize, usize),
    },

    /// Image file does not exist
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Image file exists but its format cannot be decoded
    UnsupportedFormat {
        /// Path of the image file
        path: PathBuf,
        /// Underlying decoder error
        source: image::ImageError,
    },

    /// Any other failure while loading an image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for EvolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Grid dimensions differ: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::FileNotFound { path } => {
                write!(f, "Image not found: '{}'", path.display())
            }
            Self::UnsupportedFormat { path, source } => {
                write!(
                    f,
                    "Unsupported image format '{}': {source}",
                    path.display()
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for EvolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedFormat { source, .. }
            | Self::ImageLoad { source, .. }
            | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::DimensionMismatch { .. }
            | Self::FileNotFound { .. }
            | Self::InvalidParameter { .. } => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, EvolutionError>;

impl From<image::ImageError> for EvolutionError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for EvolutionError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Classify an error raised while opening the image at `path`
pub fn image_load_error(path: &Path, err: image::ImageError) -> EvolutionError {
    match err {
        image::ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            EvolutionError::FileNotFound {
                path: path.to_path_buf(),
            }
        }
        image::ImageError::Unsupported(_) | image::ImageError::Decoding(_) => {
            EvolutionError::UnsupportedFormat {
                path: path.to_path_buf(),
                source: err,
            }
        }
        other => EvolutionError::ImageLoad {
            path: path.to_path_buf(),
            source: other,
        },
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EvolutionError {
    EvolutionError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
