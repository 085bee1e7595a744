//! Render one frame headlessly and write it as a PNG.
//!
//! Usage: `brotview-snapshot [OUT.png] [WIDTH HEIGHT]`

use std::path::PathBuf;

use tracing::info;

use brotview_app::host::headless::HeadlessHost;
use brotview_app::host::LifecycleEvent;
use brotview_app::{AppError, Preferences, PresentationLoop, TickOutcome};
use brotview_render::{export_png, ExportMetadata};

fn parse_args(prefs: &Preferences) -> Result<(PathBuf, u32, u32), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let out = PathBuf::from(args.first().map(String::as_str).unwrap_or("brotview.png"));
    match &args[1.min(args.len())..] {
        [] => Ok((out, prefs.surface_width, prefs.surface_height)),
        [w, h] => {
            let parse = |s: &str| {
                s.parse::<u32>()
                    .map_err(|e| AppError::Usage(format!("invalid dimension {s:?}: {e}")))
            };
            Ok((out, parse(w.as_str())?, parse(h.as_str())?))
        }
        _ => Err(AppError::Usage(
            "usage: brotview-snapshot [OUT.png] [WIDTH HEIGHT]".into(),
        )),
    }
}

fn main() -> Result<(), AppError> {
    brotview_app::init_tracing();

    let prefs = Preferences::load();
    let (out, width, height) = parse_args(&prefs)?;
    let config = prefs.loop_config();

    let mut host = HeadlessHost::new(width, height);
    host.push_lifecycle(LifecycleEvent::EnteringForeground);
    let mut presentation = PresentationLoop::new(host, config);

    let TickOutcome::Presented(stats) = presentation.tick() else {
        return Err(AppError::NothingPresented);
    };
    let frame = presentation
        .host()
        .last_frame()
        .ok_or(AppError::NothingPresented)?;

    let metadata = ExportMetadata::new(config.initial_view, config.escape.max_iterations)?;
    export_png(frame, &out, &metadata)?;
    info!(
        elapsed_ms = stats.elapsed.as_millis(),
        "Wrote {}x{} snapshot to {}",
        width,
        height,
        out.display()
    );

    presentation.host_mut().push_lifecycle(LifecycleEvent::Exiting);
    presentation.run();
    Ok(())
}
