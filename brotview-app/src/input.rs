use brotview_core::ViewState;

/// Directional buttons held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionalInput {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Step sizes applied per tick while a button is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSettings {
    /// Horizontal pan per tick, as a fraction of the current zoom factor.
    pub pan_step: f64,
    /// Multiplier applied to the zoom factor while `up` is held.
    pub zoom_in_factor: f64,
    /// Multiplier applied to the zoom factor while `down` is held.
    pub zoom_out_factor: f64,
    /// Optional lower bound on the zoom factor. `None` leaves zoom-in unbounded
    /// down to the smallest normal `f64`.
    pub min_zoom_factor: Option<f64>,
}

impl InputSettings {
    pub const DEFAULT_PAN_STEP: f64 = 0.1;
    pub const DEFAULT_ZOOM_IN: f64 = 0.90;
    pub const DEFAULT_ZOOM_OUT: f64 = 1.10;
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            pan_step: Self::DEFAULT_PAN_STEP,
            zoom_in_factor: Self::DEFAULT_ZOOM_IN,
            zoom_out_factor: Self::DEFAULT_ZOOM_OUT,
            min_zoom_factor: None,
        }
    }
}

/// Turns held buttons into pan/zoom changes on a [`ViewState`].
#[derive(Debug, Clone, Default)]
pub struct InputController {
    settings: InputSettings,
}

impl InputController {
    pub fn new(settings: InputSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    /// Apply one tick of `input` to `view`. Returns `true` if anything was held,
    /// meaning the frame on screen is now stale.
    ///
    /// Each button acts independently, in the order right, left, up, down.
    /// Pan distance scales with the zoom factor so motion looks the same at
    /// every depth.
    pub fn update(&self, view: &mut ViewState, input: DirectionalInput) -> bool {
        if input.right {
            view.center_offset_x += self.settings.pan_step * view.zoom_factor;
        }
        if input.left {
            view.center_offset_x -= self.settings.pan_step * view.zoom_factor;
        }
        if input.up {
            self.scale_zoom(view, self.settings.zoom_in_factor);
        }
        if input.down {
            self.scale_zoom(view, self.settings.zoom_out_factor);
        }
        !input.is_empty()
    }

    fn scale_zoom(&self, view: &mut ViewState, factor: f64) {
        let mut zoom = view.zoom_factor * factor;
        if let Some(floor) = self.settings.min_zoom_factor {
            zoom = zoom.max(floor);
        }
        // Keep the zoom strictly positive and finite.
        if zoom.is_normal() {
            view.zoom_factor = zoom;
        }
    }
}
