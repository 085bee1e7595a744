use thiserror::Error;

/// Failures reported by a host's display, allocator or input device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("no display surface available")]
    DisplayUnavailable,

    #[error("failed to allocate {bytes} bytes for the display surface")]
    AllocationFailed { bytes: usize },

    #[error("input read failed: {0}")]
    InputRead(String),
}

/// Top-level errors for the binaries.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Render(#[from] brotview_render::RenderError),

    #[error(transparent)]
    Core(#[from] brotview_core::CoreError),

    #[error("{0}")]
    Usage(String),

    #[error("no frame was presented")]
    NothingPresented,
}
