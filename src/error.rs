use thiserror::Error;

/// Result type alias for operations that may fail with [`TryOnError`].
pub type TryOnResult<T> = std::result::Result<T, TryOnError>;

/// Error types that can occur while composing a try-on image.
///
/// This enum covers image I/O, unusable inputs, and background removal
/// that keeps nothing. Missing or unusable landmarks are never errors;
/// they select a fallback placement instead.
#[derive(Debug, Error)]
pub enum TryOnError {
    /// Image loading, decoding, or encoding error.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An input image with a zero-sized dimension.
    #[error("{role} image has zero area ({width}x{height})")]
    EmptyImage {
        role: &'static str,
        width: u32,
        height: u32,
    },
    /// Background removal found no foreground component to keep.
    #[error("background removal found no foreground component")]
    EmptyForeground,
    /// Landmark data that does not parse as JSON.
    #[error("landmark data is not valid JSON: {0}")]
    LandmarkJson(#[from] serde_json::Error),
}
