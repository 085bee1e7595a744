use crate::complex::Complex;
use crate::error::CoreError;

/// Width of the visible complex plane, in plane units, at `zoom_factor == 1.0`.
pub const PLANE_WIDTH: f64 = 4.0;

/// The pan/zoom state of the viewer.
///
/// The visible region is `PLANE_WIDTH * zoom_factor` units wide and centred
/// on `(center_offset_x, center_offset_y)`. Height follows from the pixel
/// aspect ratio of whatever surface is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ViewState {
    pub center_offset_x: f64,
    pub center_offset_y: f64,

    /// Multiplier on the visible plane width. Smaller values zoom in.
    /// Always `> 0`.
    pub zoom_factor: f64,
}

/// Deserialization goes through [`ViewState::new`] so a stored view can never
/// carry a non-positive zoom.
impl<'de> serde::Deserialize<'de> for ViewState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            center_offset_x: f64,
            center_offset_y: f64,
            zoom_factor: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.center_offset_x, raw.center_offset_y, raw.zoom_factor)
            .map_err(serde::de::Error::custom)
    }
}

impl ViewState {
    pub const DEFAULT_ZOOM_FACTOR: f64 = 1.0;

    pub fn new(
        center_offset_x: f64,
        center_offset_y: f64,
        zoom_factor: f64,
    ) -> crate::Result<Self> {
        if !center_offset_x.is_finite() || !center_offset_y.is_finite() {
            return Err(CoreError::InvalidCenterOffset {
                x: center_offset_x,
                y: center_offset_y,
            });
        }
        if zoom_factor <= 0.0 || !zoom_factor.is_finite() {
            return Err(CoreError::InvalidZoomFactor(zoom_factor));
        }
        Ok(Self {
            center_offset_x,
            center_offset_y,
            zoom_factor,
        })
    }

    /// Map a pixel of a `width × height` surface to a point on the complex plane.
    ///
    /// Both axes divide by `width`, so pixels stay square. Row 0 is the top of
    /// the surface and the imaginary part grows with the row index.
    #[inline]
    pub fn pixel_to_complex(&self, col: u32, row: u32, width: u32, height: u32) -> Complex {
        let w = width as f64;
        let units_per_pixel = PLANE_WIDTH * self.zoom_factor / w;
        Complex::new(
            (col as f64 - w / 2.0) * units_per_pixel + self.center_offset_x,
            (row as f64 - height as f64 / 2.0) * units_per_pixel + self.center_offset_y,
        )
    }

    /// Visible extent of the plane along the real axis.
    pub fn plane_width(&self) -> f64 {
        PLANE_WIDTH * self.zoom_factor
    }

    /// Centre of the view as a complex number.
    pub fn center(&self) -> Complex {
        Complex::new(self.center_offset_x, self.center_offset_y)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center_offset_x: 0.0,
            center_offset_y: 0.0,
            zoom_factor: Self::DEFAULT_ZOOM_FACTOR,
        }
    }
}

/// Free-function form of [`ViewState::pixel_to_complex`].
#[inline]
pub fn pixel_to_complex(col: u32, row: u32, width: u32, height: u32, view: &ViewState) -> Complex {
    view.pixel_to_complex(col, row, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn default_view() {
        let view = ViewState::default();
        assert_eq!(view.center_offset_x, 0.0);
        assert_eq!(view.center_offset_y, 0.0);
        assert_eq!(view.zoom_factor, 1.0);
        assert!((view.plane_width() - 4.0).abs() < EPSILON);
    }

    #[test]
    fn center_pixel_maps_to_offset() {
        let view = ViewState::new(-0.5, 0.25, 1.0).unwrap();
        let c = view.pixel_to_complex(50, 40, 100, 80);
        assert!((c.re - (-0.5)).abs() < EPSILON);
        assert!((c.im - 0.25).abs() < EPSILON);
    }

    #[test]
    fn top_left_spans_half_plane() {
        let view = ViewState::default();
        let c = view.pixel_to_complex(0, 0, 100, 100);
        assert!((c.re - (-2.0)).abs() < EPSILON);
        assert!((c.im - (-2.0)).abs() < EPSILON);
    }

    #[test]
    fn imaginary_axis_grows_downward() {
        let view = ViewState::default();
        let top = view.pixel_to_complex(10, 0, 100, 100);
        let bottom = view.pixel_to_complex(10, 99, 100, 100);
        assert!(bottom.im > top.im);
    }

    #[test]
    fn zoom_scales_extent() {
        let view = ViewState::new(0.0, 0.0, 0.5).unwrap();
        let c = view.pixel_to_complex(0, 50, 100, 100);
        assert!((c.re - (-1.0)).abs() < EPSILON);
    }

    #[test]
    fn invalid_zoom() {
        assert_eq!(
            ViewState::new(0.0, 0.0, 0.0),
            Err(CoreError::InvalidZoomFactor(0.0))
        );
        assert!(ViewState::new(0.0, 0.0, -1.0).is_err());
        assert!(ViewState::new(0.0, 0.0, f64::NAN).is_err());
        assert!(ViewState::new(0.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn invalid_offset() {
        assert!(ViewState::new(f64::NAN, 0.0, 1.0).is_err());
        assert!(ViewState::new(0.0, f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn deserialize_rejects_non_positive_zoom() {
        let json = r#"{"center_offset_x":0.0,"center_offset_y":0.0,"zoom_factor":-2.0}"#;
        assert!(serde_json::from_str::<ViewState>(json).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let view = ViewState::new(-0.75, 0.1, 0.01).unwrap();
        let json = serde_json::to_string(&view).unwrap();
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
