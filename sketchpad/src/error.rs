use std::fmt::Display;

/// Raised when a canvas cannot be set up as asked.
///
/// Drawing itself never fails: out-of-range and degenerate input just draws less.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// Width and height must both be positive
    InvalidDimensions { width: i64, height: i64 },
}
impl Display for CanvasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanvasError::InvalidDimensions { width, height } => write!(
                f,
                "CanvasError: canvas must be at least 1x1 pixels, got {width}x{height}"
            ),
        }
    }
}
impl std::error::Error for CanvasError {}
