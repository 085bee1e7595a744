use tracing::{debug, info, warn};

use brotview_core::{EscapeParams, Mandelbrot, ViewState};
use brotview_render::{render, PixelSurface, RenderStats, SwapChain};

use crate::host::{Host, LifecycleEvent, SurfaceSize};
use crate::input::{DirectionalInput, InputController, InputSettings};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything the loop needs to know up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    pub initial_view: ViewState,
    pub escape: EscapeParams,
    pub input: InputSettings,
    /// Spread rows across the Rayon pool when rendering.
    pub parallel_render: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            initial_view: ViewState::default(),
            escape: EscapeParams::default(),
            input: InputSettings::default(),
            parallel_render: true,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Frame buffers held while the program owns the display.
#[derive(Debug)]
pub struct ActiveSession {
    size: SurfaceSize,
    chain: SwapChain,
}

impl ActiveSession {
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// The frame currently on display.
    pub fn front(&self) -> &PixelSurface {
        self.chain.front()
    }

    pub fn frames_presented(&self) -> u64 {
        self.chain.frames_presented()
    }
}

#[derive(Debug)]
pub enum LoopState {
    /// No display surface; nothing is drawn.
    Idle,
    /// Display acquired and buffers allocated.
    Active(ActiveSession),
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Teardown finished; the program should start itself again.
    Relaunch,
}

/// What a single [`PresentationLoop::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No display surface is held.
    Idle,
    /// Active, but the frame on screen is still current.
    Unchanged,
    /// A new frame was rendered and presented.
    Presented(RenderStats),
    /// An exit signal was handled; no further frames will be drawn.
    Exit(LoopExit),
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

/// Drives input → render → present against a [`Host`].
///
/// Redraws only when the view is stale. Frame buffers are returned to the
/// host on losing the foreground, on exit, and when the loop is dropped.
pub struct PresentationLoop<H: Host> {
    host: H,
    state: LoopState,
    view: ViewState,
    needs_redraw: bool,
    controller: InputController,
    mandelbrot: Mandelbrot,
    parallel_render: bool,
    exit: Option<LoopExit>,
}

impl<H: Host> PresentationLoop<H> {
    pub fn new(host: H, config: LoopConfig) -> Self {
        Self {
            host,
            state: LoopState::Idle,
            view: config.initial_view,
            needs_redraw: true,
            controller: InputController::new(config.input),
            mandelbrot: Mandelbrot::new(config.escape),
            parallel_render: config.parallel_render,
            exit: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, LoopState::Active(_))
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Run one iteration: handle at most one lifecycle event, then, if the
    /// display is held, apply input and redraw when the view is stale.
    ///
    /// A render always runs to completion and is presented before the next
    /// lifecycle event is looked at.
    pub fn tick(&mut self) -> TickOutcome {
        if let Some(exit) = self.exit {
            return TickOutcome::Exit(exit);
        }

        match self.host.poll_event() {
            Some(LifecycleEvent::EnteringForeground) => self.enter_foreground(),
            Some(LifecycleEvent::LosingForeground) => self.release_session(),
            Some(LifecycleEvent::Exiting) => {
                info!("Exit requested, tearing down");
                self.release_session();
                self.exit = Some(LoopExit::Relaunch);
                return TickOutcome::Exit(LoopExit::Relaunch);
            }
            None => {}
        }

        let LoopState::Active(session) = &mut self.state else {
            return TickOutcome::Idle;
        };

        let input = match self.host.poll_input() {
            Ok(input) => input,
            Err(e) => {
                debug!("Ignoring input this tick: {e}");
                DirectionalInput::NONE
            }
        };
        if self.controller.update(&mut self.view, input) {
            self.needs_redraw = true;
        }
        if !self.needs_redraw {
            return TickOutcome::Unchanged;
        }

        let stats = render(
            session.chain.back_mut(),
            &self.view,
            &self.mandelbrot,
            self.parallel_render,
        );
        session.chain.swap();
        self.host.present(session.chain.front());
        self.needs_redraw = false;

        TickOutcome::Presented(stats)
    }

    /// Tick until an exit signal has been handled.
    pub fn run(&mut self) -> LoopExit {
        loop {
            if let TickOutcome::Exit(exit) = self.tick() {
                return exit;
            }
        }
    }

    fn enter_foreground(&mut self) {
        if self.is_active() {
            debug!("Already in foreground");
            return;
        }

        let size = match self.host.acquire() {
            Ok(size) => size,
            Err(e) => {
                warn!("Display acquisition failed, staying idle: {e}");
                return;
            }
        };

        let Some(bytes) = SwapChain::byte_size(size.width, size.height) else {
            warn!(
                width = size.width,
                height = size.height,
                "Display too large for frame buffers, staying idle"
            );
            self.host.release();
            return;
        };
        info!(
            width = size.width,
            height = size.height,
            bytes,
            "Initializing screen"
        );

        let memory = match self.host.allocate(bytes) {
            Ok(memory) if memory.len() == bytes => memory,
            Ok(memory) => {
                warn!(got = memory.len(), bytes, "Allocator returned wrong size");
                self.host.free(memory);
                self.host.release();
                return;
            }
            Err(e) => {
                warn!("Frame buffer allocation failed, staying idle: {e}");
                self.host.release();
                return;
            }
        };

        match SwapChain::from_memory(size.width, size.height, memory) {
            Ok(chain) => {
                self.state = LoopState::Active(ActiveSession { size, chain });
                // Fresh buffers are blank.
                self.needs_redraw = true;
                info!("Screen initialized");
            }
            Err(e) => {
                warn!("Could not build frame buffers, staying idle: {e}");
                self.host.release();
            }
        }
    }

    /// Clear and hand back the frame buffers. No-op while idle.
    fn release_session(&mut self) {
        let LoopState::Active(mut session) = std::mem::replace(&mut self.state, LoopState::Idle)
        else {
            debug!("Release requested while idle");
            return;
        };

        session.chain.clear();
        self.host.present(session.chain.front());
        self.host.release();
        let frames = session.chain.frames_presented();
        self.host.free(session.chain.into_memory());
        info!(frames, "Screen released");
    }
}

impl<H: Host> Drop for PresentationLoop<H> {
    fn drop(&mut self) {
        self.release_session();
    }
}
