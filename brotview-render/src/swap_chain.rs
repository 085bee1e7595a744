use tracing::debug;

use crate::surface::PixelSurface;

/// Two equally sized surfaces: the front one is on display, the back one is
/// the render target. [`swap`](Self::swap) exchanges them once a frame is
/// complete.
///
/// Both surfaces are carved out of a single allocation so the owner of the
/// display can hand over and take back one block of memory.
#[derive(Debug)]
pub struct SwapChain {
    surfaces: [PixelSurface; 2],
    front: usize,
    frames_presented: u64,
}

impl SwapChain {
    /// Bytes needed for both buffers of a `width × height` chain, or `None`
    /// if that does not fit in `usize`.
    pub fn byte_size(width: u32, height: u32) -> Option<usize> {
        PixelSurface::byte_size(width, height)?.checked_mul(2)
    }

    /// Split `memory` into a front and back surface. Both start cleared.
    pub fn from_memory(width: u32, height: u32, mut memory: Vec<u8>) -> crate::Result<Self> {
        let expected = Self::byte_size(width, height)
            .ok_or(crate::RenderError::InvalidDimensions { width, height })?;
        if memory.len() != expected {
            return Err(crate::RenderError::BufferSizeMismatch {
                expected,
                actual: memory.len(),
            });
        }
        let back = memory.split_off(expected / 2);
        let mut chain = Self {
            surfaces: [
                PixelSurface::from_raw(width, height, memory)?,
                PixelSurface::from_raw(width, height, back)?,
            ],
            front: 0,
            frames_presented: 0,
        };
        chain.clear();
        Ok(chain)
    }

    /// Reassemble the single block of memory the chain was built from.
    pub fn into_memory(self) -> Vec<u8> {
        let [a, b] = self.surfaces;
        let mut memory = a.into_raw();
        memory.extend_from_slice(&b.into_raw());
        memory
    }

    pub fn width(&self) -> u32 {
        self.surfaces[0].width()
    }

    pub fn height(&self) -> u32 {
        self.surfaces[0].height()
    }

    /// The surface currently on display.
    pub fn front(&self) -> &PixelSurface {
        &self.surfaces[self.front]
    }

    /// The surface to render the next frame into.
    pub fn back_mut(&mut self) -> &mut PixelSurface {
        &mut self.surfaces[1 - self.front]
    }

    /// Promote the back surface to the front.
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
        self.frames_presented += 1;
        debug!(frame = self.frames_presented, "Swapped buffers");
    }

    /// Number of swaps since the chain was created.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Clear both surfaces to opaque black.
    pub fn clear(&mut self) {
        for surface in &mut self.surfaces {
            surface.clear(crate::color::INTERIOR_COLOR);
        }
    }
}
