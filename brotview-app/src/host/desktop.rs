use eframe::egui;
use tracing::{debug, info};

use brotview_render::PixelSurface;

use super::{
    heap_allocate, DisplaySurfaceProvider, InputSource, LifecycleEvent, LifecycleSource,
    ResourceAllocator, SurfaceSize,
};
use crate::error::HostError;
use crate::input::DirectionalInput;

/// Host backed by an `eframe` window.
///
/// - window shown / minimized → entering / losing the foreground
/// - close button → exiting
/// - arrow keys → directional input
/// - presented frames are uploaded to a nearest-filtered texture
pub struct DesktopHost {
    ctx: egui::Context,
    size: SurfaceSize,
    texture: Option<egui::TextureHandle>,
    visible: bool,
    exit_sent: bool,
    last_input: DirectionalInput,
}

impl DesktopHost {
    pub fn new(ctx: egui::Context, size: SurfaceSize) -> Self {
        Self {
            ctx,
            size,
            texture: None,
            visible: false,
            exit_sent: false,
            last_input: DirectionalInput::NONE,
        }
    }

    /// The texture holding the last presented frame, while the display is held.
    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }

    /// Whether any button was held at the last poll.
    pub fn input_held(&self) -> bool {
        !self.last_input.is_empty()
    }
}

impl DisplaySurfaceProvider for DesktopHost {
    fn acquire(&mut self) -> Result<SurfaceSize, HostError> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(HostError::DisplayUnavailable);
        }
        Ok(self.size)
    }

    fn present(&mut self, frame: &PixelSurface) {
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width() as usize, frame.height() as usize],
            frame.pixels(),
        );
        match self.texture.as_mut() {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(self.ctx.load_texture("frame", image, egui::TextureOptions::NEAREST));
            }
        }
    }

    fn release(&mut self) {
        self.texture = None;
    }
}

impl LifecycleSource for DesktopHost {
    fn poll_event(&mut self) -> Option<LifecycleEvent> {
        if self.exit_sent {
            return None;
        }
        let (close_requested, minimized) = self.ctx.input(|i| {
            let viewport = i.viewport();
            (viewport.close_requested(), viewport.minimized.unwrap_or(false))
        });

        if close_requested {
            info!("Window close requested");
            self.exit_sent = true;
            return Some(LifecycleEvent::Exiting);
        }

        match (self.visible, minimized) {
            (false, false) => {
                self.visible = true;
                Some(LifecycleEvent::EnteringForeground)
            }
            (true, true) => {
                self.visible = false;
                Some(LifecycleEvent::LosingForeground)
            }
            _ => None,
        }
    }
}

impl InputSource for DesktopHost {
    fn poll_input(&mut self) -> Result<DirectionalInput, HostError> {
        let input = self.ctx.input(|i| DirectionalInput {
            left: i.key_down(egui::Key::ArrowLeft),
            right: i.key_down(egui::Key::ArrowRight),
            up: i.key_down(egui::Key::ArrowUp),
            down: i.key_down(egui::Key::ArrowDown),
        });
        if input != self.last_input {
            debug!(?input, "Input changed");
        }
        self.last_input = input;
        Ok(input)
    }
}

impl ResourceAllocator for DesktopHost {
    fn allocate(&mut self, bytes: usize) -> Result<Vec<u8>, HostError> {
        heap_allocate(bytes)
    }

    fn free(&mut self, memory: Vec<u8>) {
        debug!(bytes = memory.len(), "Freeing frame memory");
    }
}
