use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use brotview_core::{Mandelbrot, Membership, ViewState};

use crate::color::membership_color;
use crate::surface::{PixelSurface, BYTES_PER_PIXEL};

/// Summary of one full-frame render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub elapsed: Duration,
    /// Pixels classified as inside the set.
    pub interior_pixels: usize,
}

/// Fill one row of RGBA bytes and return how many of its pixels were interior.
fn render_row(
    line: &mut [u8],
    row: u32,
    width: u32,
    height: u32,
    view: &ViewState,
    mandelbrot: &Mandelbrot,
) -> usize {
    let mut interior = 0;
    for (col, px) in line.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
        let c = view.pixel_to_complex(col as u32, row, width, height);
        let membership = mandelbrot.classify(c);
        if membership == Membership::Interior {
            interior += 1;
        }
        px.copy_from_slice(&membership_color(membership));
    }
    interior
}

/// Render a full frame of `view` into `surface`.
///
/// Every pixel is recomputed. With `parallel` set, rows are spread across the
/// Rayon pool and joined before returning; the bytes written are identical
/// either way.
pub fn render(
    surface: &mut PixelSurface,
    view: &ViewState,
    mandelbrot: &Mandelbrot,
    parallel: bool,
) -> RenderStats {
    let start = Instant::now();
    let (width, height) = (surface.width(), surface.height());
    let stride = surface.stride();

    let interior_pixels: usize = if parallel {
        surface
            .pixels_mut()
            .par_chunks_exact_mut(stride)
            .enumerate()
            .map(|(row, line)| render_row(line, row as u32, width, height, view, mandelbrot))
            .sum()
    } else {
        surface
            .pixels_mut()
            .chunks_exact_mut(stride)
            .enumerate()
            .map(|(row, line)| render_row(line, row as u32, width, height, view, mandelbrot))
            .sum()
    };

    let elapsed = start.elapsed();
    debug!(
        elapsed_ms = elapsed.as_millis(),
        width,
        height,
        interior_pixels,
        max_iter = mandelbrot.params().max_iterations,
        zoom = view.zoom_factor,
        "Render complete"
    );

    RenderStats {
        elapsed,
        interior_pixels,
    }
}
