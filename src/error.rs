use std::path::PathBuf;

/// Errors for inputs that violate the caller contract
#[derive(thiserror::Error, Debug)]
pub enum InspectError {
    /// Width or height of zero
    #[error("image dimensions must be positive (got {width}x{height})")]
    EmptyImage {
        /// Supplied width
        width: usize,
        /// Supplied height
        height: usize,
    },
    /// Buffer length does not match `width * height * 4`
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        /// Supplied width
        width: usize,
        /// Supplied height
        height: usize,
        /// `width * height * 4`
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },
    /// Symbol version outside 1-40
    #[error("symbol version {0} is outside 1..=40")]
    InvalidVersion(usize),
    /// Image file could not be read, decoded or written
    #[error("image i/o failed for {path}: {source}")]
    ImageIo {
        /// Offending path
        path: PathBuf,
        /// Underlying decoder error
        #[source]
        source: image::ImageError,
    },
}

/// Result alias for inspection entry points
pub type Result<T> = std::result::Result<T, InspectError>;
