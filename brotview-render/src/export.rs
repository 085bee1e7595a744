//! PNG export of a presented frame, with the view embedded as tEXt chunks.

use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use brotview_core::{EscapeParams, ViewState};

use crate::surface::PixelSurface;

/// What was on screen when the frame was captured.
pub struct ExportMetadata {
    pub view: ViewState,
    pub max_iterations: u32,
}

impl ExportMetadata {
    /// Rejects an iteration bound no render could have used.
    pub fn new(view: ViewState, max_iterations: u32) -> crate::Result<Self> {
        EscapeParams::new(max_iterations)?;
        Ok(Self {
            view,
            max_iterations,
        })
    }
}

/// Write `surface` to `path` as an 8-bit RGBA PNG.
pub fn export_png(
    surface: &PixelSurface,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, surface.width(), surface.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    encoder.add_text_chunk("Software".to_string(), "BrotView".to_string())?;
    for (key, value) in metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(surface.pixels())?;

    debug!(
        "Exported PNG {}x{} to {}",
        surface.width(),
        surface.height(),
        path.display()
    );
    Ok(())
}

fn metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    vec![
        ("BrotView.CenterX".into(), meta.view.center_offset_x.to_string()),
        ("BrotView.CenterY".into(), meta.view.center_offset_y.to_string()),
        ("BrotView.Zoom".into(), meta.view.zoom_factor.to_string()),
        ("BrotView.MaxIterations".into(), meta.max_iterations.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_pixels_and_text_chunks() {
        let mut surface = PixelSurface::new(3, 2).unwrap();
        surface.set_pixel(1, 1, [255, 255, 255, 255]).unwrap();
        let meta = ExportMetadata {
            view: ViewState::new(-0.5, 0.0, 0.25).unwrap(),
            max_iterations: 200,
        };

        let dir = std::env::temp_dir().join("brotview_test_export");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("frame.png");
        export_png(&surface, &path, &meta).expect("export should succeed");

        let decoder = png::Decoder::new(std::fs::File::open(&path).expect("file should exist"));
        let mut reader = decoder.read_info().expect("should read info");
        {
            let info = reader.info();
            assert_eq!((info.width, info.height), (3, 2));
            let texts = &info.uncompressed_latin1_text;
            assert!(texts.iter().any(|t| t.keyword == "Software" && t.text == "BrotView"));
            assert!(texts.iter().any(|t| t.keyword == "BrotView.Zoom" && t.text == "0.25"));
        }

        let mut data = vec![0u8; reader.output_buffer_size()];
        reader.next_frame(&mut data).expect("should decode frame");
        assert_eq!(&data[..surface.pixels().len()], surface.pixels());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn metadata_rejects_zero_iterations() {
        assert!(matches!(
            ExportMetadata::new(ViewState::default(), 0),
            Err(crate::RenderError::Core(brotview_core::CoreError::InvalidMaxIterations(0)))
        ));
        let meta = ExportMetadata::new(ViewState::default(), 64).unwrap();
        assert_eq!(meta.max_iterations, 64);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let surface = PixelSurface::new(1, 1).unwrap();
        let meta = ExportMetadata {
            view: ViewState::default(),
            max_iterations: 200,
        };
        let path = std::env::temp_dir()
            .join("brotview_no_such_dir")
            .join("nested")
            .join("frame.png");
        assert!(matches!(
            export_png(&surface, &path, &meta),
            Err(crate::RenderError::Io(_))
        ));
    }
}
