use crate::error::RenderError;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// One frame of RGBA pixels, row-major, 4 bytes per pixel.
///
/// The backing memory is handed in by whoever owns the display (see
/// [`from_raw`](Self::from_raw)) and handed back with
/// [`into_raw`](Self::into_raw) when the display is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Number of bytes a `width × height` surface occupies, or `None` if that
    /// does not fit in `usize`.
    pub fn byte_size(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(BYTES_PER_PIXEL)
    }

    /// Allocate a new surface cleared to opaque black.
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        let bytes = Self::byte_size(width, height)
            .ok_or(RenderError::InvalidDimensions { width, height })?;
        let mut surface = Self::from_raw(width, height, vec![0; bytes])?;
        surface.clear(crate::color::INTERIOR_COLOR);
        Ok(surface)
    }

    /// Wrap existing memory as a surface. The contents are kept as-is.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let expected = Self::byte_size(width, height)
            .ok_or(RenderError::InvalidDimensions { width, height })?;
        if pixels.len() != expected {
            return Err(RenderError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Give the backing memory back, e.g. to return it to an allocator.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    #[inline]
    fn offset(&self, col: u32, row: u32) -> Option<usize> {
        (col < self.width && row < self.height)
            .then(|| (row as usize * self.width as usize + col as usize) * BYTES_PER_PIXEL)
    }

    /// Write one pixel.
    pub fn set_pixel(&mut self, col: u32, row: u32, rgba: [u8; 4]) -> crate::Result<()> {
        let idx = self.offset(col, row).ok_or(RenderError::PixelOutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        })?;
        self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        Ok(())
    }

    /// Read one pixel, or `None` outside the surface.
    pub fn pixel(&self, col: u32, row: u32) -> Option<[u8; 4]> {
        let idx = self.offset(col, row)?;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[idx..idx + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Fill the whole surface with one colour.
    pub fn clear(&mut self, rgba: [u8; 4]) {
        for chunk in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&rgba);
        }
    }
}
