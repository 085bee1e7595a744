use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

use brotview_render::PixelSurface;

use super::{
    heap_allocate, DisplaySurfaceProvider, InputSource, LifecycleEvent, LifecycleSource,
    ResourceAllocator, SurfaceSize,
};
use crate::error::HostError;
use crate::input::DirectionalInput;

/// Resource accounting for a [`HeadlessHost`].
///
/// Shared through an `Arc` so it can still be inspected after the host has
/// been moved into (and dropped with) a presentation loop.
#[derive(Debug, Default)]
pub struct HostLedger {
    outstanding_bytes: AtomicUsize,
    display_held: AtomicBool,
    acquisitions: AtomicU64,
    releases: AtomicU64,
    frames_presented: AtomicU64,
}

impl HostLedger {
    /// Bytes allocated and not yet freed.
    pub fn outstanding_bytes(&self) -> usize {
        self.outstanding_bytes.load(Ordering::SeqCst)
    }

    pub fn display_held(&self) -> bool {
        self.display_held.load(Ordering::SeqCst)
    }

    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> u64 {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented.load(Ordering::SeqCst)
    }
}

/// A host with no window: lifecycle events and input are scripted, and every
/// presented frame is kept as a copy.
#[derive(Debug)]
pub struct HeadlessHost {
    size: SurfaceSize,
    lifecycle: VecDeque<LifecycleEvent>,
    inputs: VecDeque<Result<DirectionalInput, HostError>>,
    failing_acquisitions: usize,
    failing_allocations: usize,
    last_frame: Option<PixelSurface>,
    ledger: Arc<HostLedger>,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize { width, height },
            lifecycle: VecDeque::new(),
            inputs: VecDeque::new(),
            failing_acquisitions: 0,
            failing_allocations: 0,
            last_frame: None,
            ledger: Arc::new(HostLedger::default()),
        }
    }

    /// Queue a lifecycle event; one is delivered per tick.
    pub fn push_lifecycle(&mut self, event: LifecycleEvent) {
        self.lifecycle.push_back(event);
    }

    /// Queue the buttons held for one tick. Ticks with nothing queued see no input.
    pub fn push_input(&mut self, input: DirectionalInput) {
        self.inputs.push_back(Ok(input));
    }

    /// Queue a failed input read for one tick.
    pub fn push_input_error(&mut self, reason: &str) {
        self.inputs.push_back(Err(HostError::InputRead(reason.to_string())));
    }

    /// Make the next `count` display acquisitions fail.
    pub fn fail_acquisitions(&mut self, count: usize) {
        self.failing_acquisitions = count;
    }

    /// Make the next `count` allocations fail.
    pub fn fail_allocations(&mut self, count: usize) {
        self.failing_allocations = count;
    }

    /// Copy of the most recently presented frame.
    pub fn last_frame(&self) -> Option<&PixelSurface> {
        self.last_frame.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.ledger.frames_presented()
    }

    pub fn ledger(&self) -> Arc<HostLedger> {
        Arc::clone(&self.ledger)
    }
}

impl DisplaySurfaceProvider for HeadlessHost {
    fn acquire(&mut self) -> Result<SurfaceSize, HostError> {
        if self.failing_acquisitions > 0 {
            self.failing_acquisitions -= 1;
            return Err(HostError::DisplayUnavailable);
        }
        self.ledger.display_held.store(true, Ordering::SeqCst);
        self.ledger.acquisitions.fetch_add(1, Ordering::SeqCst);
        Ok(self.size)
    }

    fn present(&mut self, frame: &PixelSurface) {
        self.ledger.frames_presented.fetch_add(1, Ordering::SeqCst);
        self.last_frame = Some(frame.clone());
    }

    fn release(&mut self) {
        self.ledger.display_held.store(false, Ordering::SeqCst);
        self.ledger.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl LifecycleSource for HeadlessHost {
    fn poll_event(&mut self) -> Option<LifecycleEvent> {
        self.lifecycle.pop_front()
    }
}

impl InputSource for HeadlessHost {
    fn poll_input(&mut self) -> Result<DirectionalInput, HostError> {
        self.inputs.pop_front().unwrap_or(Ok(DirectionalInput::NONE))
    }
}

impl ResourceAllocator for HeadlessHost {
    fn allocate(&mut self, bytes: usize) -> Result<Vec<u8>, HostError> {
        if self.failing_allocations > 0 {
            self.failing_allocations -= 1;
            return Err(HostError::AllocationFailed { bytes });
        }
        let memory = heap_allocate(bytes)?;
        self.ledger.outstanding_bytes.fetch_add(bytes, Ordering::SeqCst);
        Ok(memory)
    }

    fn free(&mut self, memory: Vec<u8>) {
        debug!(bytes = memory.len(), "Freeing frame memory");
        self.ledger
            .outstanding_bytes
            .fetch_sub(memory.len(), Ordering::SeqCst);
    }
}
