//! Tile synthesis error types.

use crate::fog::FogError;
use thiserror::Error;

/// Errors that can reject a single tile request.
///
/// There is no fallback placeholder image: a failed synthesis rejects
/// the whole request and the host surfaces it as a failed fetch.
#[derive(Debug, Clone, Error)]
pub enum TileError {
    /// The fog engine rejected the render or was unusable
    #[error(transparent)]
    Fog(#[from] FogError),

    /// The engine returned a buffer that does not match the configured
    /// tile dimension
    #[error("pixel buffer is {actual} bytes, expected {expected} for a {size}x{size} tile")]
    PixelBufferSize {
        size: u32,
        expected: usize,
        actual: usize,
    },

    /// PNG encoding of the raster surface failed
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
