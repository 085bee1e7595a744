//! Services the presentation loop needs from whatever it runs on.
//!
//! A host owns the physical display, the memory the frame buffers live in,
//! the input device and the lifecycle signals. [`desktop::DesktopHost`] drives
//! an `eframe` window; [`headless::HeadlessHost`] is scripted and used by the
//! snapshot tool and tests.

pub mod desktop;
pub mod headless;

use tracing::debug;

use brotview_render::PixelSurface;

use crate::error::HostError;
use crate::input::DirectionalInput;

/// Pixel dimensions of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Lifecycle signals delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The program owns the display and may draw.
    EnteringForeground,
    /// The display is being taken away; buffers must be released.
    LosingForeground,
    /// The program is being closed.
    Exiting,
}

/// Owner of the physical display.
pub trait DisplaySurfaceProvider {
    /// Take ownership of the display and report its size.
    fn acquire(&mut self) -> Result<SurfaceSize, HostError>;

    /// Publish a completed frame.
    fn present(&mut self, frame: &PixelSurface);

    /// Give the display back. Called once per successful `acquire`.
    fn release(&mut self);
}

/// Source of lifecycle signals, polled once per tick.
pub trait LifecycleSource {
    fn poll_event(&mut self) -> Option<LifecycleEvent>;
}

/// Non-blocking read of the directional buttons.
pub trait InputSource {
    fn poll_input(&mut self) -> Result<DirectionalInput, HostError>;
}

/// Memory for the frame buffers. Every `allocate` is matched by a `free`.
pub trait ResourceAllocator {
    fn allocate(&mut self, bytes: usize) -> Result<Vec<u8>, HostError>;
    fn free(&mut self, memory: Vec<u8>);
}

/// Everything the presentation loop needs from its environment.
pub trait Host: DisplaySurfaceProvider + LifecycleSource + InputSource + ResourceAllocator {}

impl<T> Host for T where
    T: DisplaySurfaceProvider + LifecycleSource + InputSource + ResourceAllocator
{
}

/// Zeroed heap allocation that reports failure instead of aborting.
pub(crate) fn heap_allocate(bytes: usize) -> Result<Vec<u8>, HostError> {
    let mut memory = Vec::new();
    memory
        .try_reserve_exact(bytes)
        .map_err(|_| HostError::AllocationFailed { bytes })?;
    memory.resize(bytes, 0);
    debug!(bytes, "Allocated frame memory");
    Ok(memory)
}
