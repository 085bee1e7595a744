use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid surface dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("pixel ({col}, {row}) outside {width}×{height} surface")]
    PixelOutOfBounds {
        col: u32,
        row: u32,
        width: u32,
        height: u32,
    },

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] brotview_core::CoreError),
}
