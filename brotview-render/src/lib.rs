pub mod color;
pub mod error;
pub mod export;
pub mod renderer;
pub mod surface;
pub mod swap_chain;

pub use color::{membership_color, ESCAPED_COLOR, INTERIOR_COLOR};
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use renderer::{render, RenderStats};
pub use surface::{PixelSurface, BYTES_PER_PIXEL};
pub use swap_chain::SwapChain;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
