use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use eframe::egui;
use tracing::info;

use crate::host::desktop::DesktopHost;
use crate::host::SurfaceSize;
use crate::preferences::Preferences;
use crate::presentation::{LoopExit, PresentationLoop, TickOutcome};

/// The `eframe` application: one presentation-loop tick per egui frame, then
/// draw whatever the host was last given.
pub struct ViewerApp {
    presentation: PresentationLoop<DesktopHost>,
    window_scale: f32,
    relaunch_requested: Arc<AtomicBool>,
}

impl ViewerApp {
    pub fn new(
        ctx: &egui::Context,
        prefs: &Preferences,
        relaunch_requested: Arc<AtomicBool>,
    ) -> Self {
        let size = SurfaceSize {
            width: prefs.surface_width,
            height: prefs.surface_height,
        };
        Self {
            presentation: PresentationLoop::new(
                DesktopHost::new(ctx.clone(), size),
                prefs.loop_config(),
            ),
            window_scale: prefs.window_scale.max(1.0),
            relaunch_requested,
        }
    }

    fn draw_frame(&self, ui: &mut egui::Ui) {
        let Some(texture) = self.presentation.host().texture() else {
            return;
        };
        let size = texture.size_vec2() * self.window_scale;
        let rect = egui::Rect::from_center_size(ui.max_rect().center(), size);
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter().image(texture.id(), rect, uv, egui::Color32::WHITE);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.presentation.tick() {
            TickOutcome::Exit(LoopExit::Relaunch) => {
                if !self.relaunch_requested.swap(true, Ordering::SeqCst) {
                    info!("Presentation loop finished, relaunch requested");
                }
            }
            TickOutcome::Presented(stats) => {
                let view = self.presentation.view();
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                    "BrotView | ({:.6}, {:.6}) zoom {:.3e} | {} ms",
                    view.center_offset_x,
                    view.center_offset_y,
                    view.zoom_factor,
                    stats.elapsed.as_millis()
                )));
            }
            TickOutcome::Idle | TickOutcome::Unchanged => {}
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| self.draw_frame(ui));

        // Held keys produce no new events, so keep ticking while they are down.
        if self.presentation.host().input_held() {
            ctx.request_repaint();
        }
    }
}
