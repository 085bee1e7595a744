pub mod app;
pub mod error;
pub mod host;
pub mod input;
pub mod preferences;
pub mod presentation;
pub mod relaunch;

pub use error::{AppError, HostError};
pub use input::{DirectionalInput, InputController, InputSettings};
pub use preferences::Preferences;
pub use presentation::{LoopConfig, LoopExit, LoopState, PresentationLoop, TickOutcome};

/// Install the `tracing` subscriber used by the binaries.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
