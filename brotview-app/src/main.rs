use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use eframe::egui;
use tracing::{error, info};

use brotview_app::app::ViewerApp;
use brotview_app::relaunch::relaunch_current_exe;
use brotview_app::Preferences;

fn main() -> eframe::Result {
    brotview_app::init_tracing();

    info!("Starting BrotView");

    let prefs = Preferences::load();
    // Rewrite so fields added since the file was created show up in it.
    prefs.save();
    let relaunch_requested = Arc::new(AtomicBool::new(false));

    let scale = prefs.window_scale.max(1.0);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BrotView")
            .with_inner_size([
                prefs.surface_width as f32 * scale,
                prefs.surface_height as f32 * scale,
            ]),
        ..Default::default()
    };

    let app_prefs = prefs.clone();
    let app_relaunch = Arc::clone(&relaunch_requested);
    eframe::run_native(
        "BrotView",
        options,
        Box::new(move |cc| {
            Ok(Box::new(ViewerApp::new(
                &cc.egui_ctx,
                &app_prefs,
                app_relaunch,
            )))
        }),
    )?;

    if relaunch_requested.load(Ordering::SeqCst) && prefs.relaunch_on_exit {
        if let Err(e) = relaunch_current_exe() {
            error!("Failed to relaunch: {e}");
        }
    } else {
        info!("Exiting without relaunch");
    }
    Ok(())
}
