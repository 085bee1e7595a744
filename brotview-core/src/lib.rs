pub mod complex;
pub mod error;
pub mod escape;
pub mod view;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use escape::{iterate, EscapeParams, Mandelbrot, Membership};
pub use view::{pixel_to_complex, ViewState, PLANE_WIDTH};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
