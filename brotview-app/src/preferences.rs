use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use brotview_core::{EscapeParams, ViewState};

use crate::input::InputSettings;
use crate::presentation::LoopConfig;

/// User-editable settings, stored as JSON next to the executable.
///
/// Missing fields take their defaults, so older or hand-trimmed files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Frame buffer size in pixels.
    #[serde(default = "default_surface_width")]
    pub surface_width: u32,
    #[serde(default = "default_surface_height")]
    pub surface_height: u32,
    /// Window size is the frame size times this factor.
    #[serde(default = "default_window_scale")]
    pub window_scale: f32,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default)]
    pub initial_view: ViewState,

    #[serde(default = "default_pan_step")]
    pub pan_step: f64,
    #[serde(default = "default_zoom_in_factor")]
    pub zoom_in_factor: f64,
    #[serde(default = "default_zoom_out_factor")]
    pub zoom_out_factor: f64,
    /// Lower bound on the zoom factor. Unset means zoom-in is unbounded.
    #[serde(default)]
    pub min_zoom_factor: Option<f64>,

    #[serde(default = "default_true")]
    pub parallel_render: bool,
    /// Start the program again after the window is closed.
    #[serde(default)]
    pub relaunch_on_exit: bool,
}

fn default_surface_width() -> u32 {
    480
}
fn default_surface_height() -> u32 {
    272
}
fn default_window_scale() -> f32 {
    2.0
}
fn default_max_iterations() -> u32 {
    EscapeParams::DEFAULT_MAX_ITERATIONS
}
fn default_pan_step() -> f64 {
    InputSettings::DEFAULT_PAN_STEP
}
fn default_zoom_in_factor() -> f64 {
    InputSettings::DEFAULT_ZOOM_IN
}
fn default_zoom_out_factor() -> f64 {
    InputSettings::DEFAULT_ZOOM_OUT
}
fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            window_scale: default_window_scale(),
            max_iterations: default_max_iterations(),
            initial_view: ViewState::default(),
            pan_step: default_pan_step(),
            zoom_in_factor: default_zoom_in_factor(),
            zoom_out_factor: default_zoom_out_factor(),
            min_zoom_factor: None,
            parallel_render: true,
            relaunch_on_exit: false,
        }
    }
}

impl Preferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Persist preferences next to the executable.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Preferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    return prefs;
                }
                Err(e) => error!("Failed to parse preferences: {e}"),
            },
            Err(e) => error!("Failed to read preferences file: {e}"),
        }
        Self::default()
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Step sizes for the input controller. Out-of-range values fall back to
    /// their defaults.
    pub fn input_settings(&self) -> InputSettings {
        let defaults = InputSettings::default();
        let positive = |v: f64, fallback: f64, name: &str| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                warn!("Ignoring invalid {name}: {v}");
                fallback
            }
        };
        InputSettings {
            pan_step: positive(self.pan_step, defaults.pan_step, "pan_step"),
            zoom_in_factor: positive(
                self.zoom_in_factor,
                defaults.zoom_in_factor,
                "zoom_in_factor",
            ),
            zoom_out_factor: positive(
                self.zoom_out_factor,
                defaults.zoom_out_factor,
                "zoom_out_factor",
            ),
            min_zoom_factor: self.min_zoom_factor.filter(|v| v.is_normal() && *v > 0.0),
        }
    }

    pub fn escape_params(&self) -> EscapeParams {
        EscapeParams::new(self.max_iterations).unwrap_or_else(|e| {
            warn!("{e}; using default");
            EscapeParams::default()
        })
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            initial_view: self.initial_view,
            escape: self.escape_params(),
            input: self.input_settings(),
            parallel_render: self.parallel_render,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("preferences.json")
}
