use brotview_app::host::headless::HeadlessHost;
use brotview_app::host::LifecycleEvent;
use brotview_app::{DirectionalInput, LoopConfig, LoopExit, PresentationLoop, TickOutcome};

const RIGHT: DirectionalInput = DirectionalInput {
    left: false,
    right: true,
    up: false,
    down: false,
};

fn foreground_loop(width: u32, height: u32) -> PresentationLoop<HeadlessHost> {
    let mut host = HeadlessHost::new(width, height);
    host.push_lifecycle(LifecycleEvent::EnteringForeground);
    PresentationLoop::new(host, LoopConfig::default())
}

#[test]
fn end_to_end_reference_frame() {
    let mut lp = foreground_loop(480, 272);
    assert!(matches!(lp.tick(), TickOutcome::Presented(_)));

    let frame = lp.host().last_frame().expect("a frame was presented");
    assert_eq!((frame.width(), frame.height()), (480, 272));
    assert_eq!(frame.pixel(240, 136), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn redraws_only_when_dirty() {
    let mut lp = foreground_loop(40, 30);
    assert!(lp.needs_redraw());
    assert!(matches!(lp.tick(), TickOutcome::Presented(_)));
    assert!(!lp.needs_redraw());

    for _ in 0..5 {
        assert_eq!(lp.tick(), TickOutcome::Unchanged);
    }
    assert_eq!(lp.host().frames_presented(), 1);

    lp.host_mut().push_input(RIGHT);
    assert!(matches!(lp.tick(), TickOutcome::Presented(_)));
    assert!(!lp.needs_redraw());
    assert_eq!(lp.view().center_offset_x, 0.1);
    assert_eq!(lp.host().frames_presented(), 2);
}

#[test]
fn panning_changes_presented_frame() {
    let mut lp = foreground_loop(64, 48);
    lp.tick();
    let before = lp.host().last_frame().cloned().expect("frame");

    lp.host_mut().push_input(RIGHT);
    lp.tick();
    let after = lp.host().last_frame().expect("frame");

    assert_ne!(before.pixels(), after.pixels());
}

#[test]
fn input_read_error_counts_as_no_input() {
    let mut lp = foreground_loop(16, 16);
    lp.tick();
    lp.host_mut().push_input_error("controller disconnected");
    assert_eq!(lp.tick(), TickOutcome::Unchanged);
    assert_eq!(lp.view().center_offset_x, 0.0);
    assert!(lp.is_active());
}

#[test]
fn acquisition_failure_stays_idle_until_retry() {
    let mut host = HeadlessHost::new(16, 16);
    host.fail_acquisitions(1);
    host.push_lifecycle(LifecycleEvent::EnteringForeground);
    host.push_lifecycle(LifecycleEvent::EnteringForeground);
    let mut lp = PresentationLoop::new(host, LoopConfig::default());

    assert_eq!(lp.tick(), TickOutcome::Idle);
    assert!(!lp.is_active());
    assert!(lp.needs_redraw());

    assert!(matches!(lp.tick(), TickOutcome::Presented(_)));
    assert!(lp.is_active());
}

#[test]
fn allocation_failure_gives_display_back() {
    let mut host = HeadlessHost::new(16, 16);
    host.fail_allocations(1);
    host.push_lifecycle(LifecycleEvent::EnteringForeground);
    let ledger = host.ledger();
    let mut lp = PresentationLoop::new(host, LoopConfig::default());

    assert_eq!(lp.tick(), TickOutcome::Idle);
    assert!(!ledger.display_held());
    assert_eq!(ledger.acquisitions(), ledger.releases());
    assert_eq!(ledger.outstanding_bytes(), 0);
}

#[test]
fn oversized_display_stays_idle() {
    let mut host = HeadlessHost::new(u32::MAX, u32::MAX);
    host.push_lifecycle(LifecycleEvent::EnteringForeground);
    let ledger = host.ledger();
    let mut lp = PresentationLoop::new(host, LoopConfig::default());

    assert_eq!(lp.tick(), TickOutcome::Idle);
    assert!(!lp.is_active());
    assert!(!ledger.display_held());
    assert_eq!(ledger.acquisitions(), 1);
    assert_eq!(ledger.releases(), 1);
    assert_eq!(ledger.outstanding_bytes(), 0);
}

#[test]
fn losing_foreground_while_idle_is_a_no_op() {
    let mut host = HeadlessHost::new(16, 16);
    host.push_lifecycle(LifecycleEvent::LosingForeground);
    let ledger = host.ledger();
    let mut lp = PresentationLoop::new(host, LoopConfig::default());

    assert_eq!(lp.tick(), TickOutcome::Idle);
    assert_eq!(ledger.releases(), 0);
}

#[test]
fn background_round_trip_releases_and_redraws() {
    let mut lp = foreground_loop(32, 32);
    let ledger = lp.host().ledger();
    lp.tick();
    assert_eq!(ledger.outstanding_bytes(), 32 * 32 * 4 * 2);

    lp.host_mut().push_lifecycle(LifecycleEvent::LosingForeground);
    assert_eq!(lp.tick(), TickOutcome::Idle);
    assert!(!ledger.display_held());
    assert_eq!(ledger.outstanding_bytes(), 0);

    // Queued input waits until the display is held again.
    lp.host_mut().push_input(RIGHT);
    assert_eq!(lp.tick(), TickOutcome::Idle);

    lp.host_mut().push_lifecycle(LifecycleEvent::EnteringForeground);
    assert!(matches!(lp.tick(), TickOutcome::Presented(_)));
    assert_eq!(ledger.acquisitions(), 2);
    assert_eq!(lp.view().center_offset_x, 0.1);
}

#[test]
fn repeated_foreground_is_idempotent() {
    let mut lp = foreground_loop(16, 16);
    let ledger = lp.host().ledger();
    lp.tick();

    lp.host_mut().push_lifecycle(LifecycleEvent::EnteringForeground);
    assert_eq!(lp.tick(), TickOutcome::Unchanged);
    assert_eq!(ledger.acquisitions(), 1);
}

#[test]
fn exit_tears_down_and_requests_relaunch() {
    let mut lp = foreground_loop(24, 24);
    let ledger = lp.host().ledger();
    lp.tick();

    lp.host_mut().push_input(RIGHT);
    lp.host_mut().push_lifecycle(LifecycleEvent::Exiting);
    assert_eq!(lp.run(), LoopExit::Relaunch);

    assert!(!lp.is_active());
    assert!(!ledger.display_held());
    assert_eq!(ledger.outstanding_bytes(), 0);
    assert_eq!(ledger.acquisitions(), ledger.releases());
}

#[test]
fn teardown_presents_cleared_frame() {
    let mut lp = foreground_loop(480, 272);
    lp.tick();
    lp.host_mut().push_lifecycle(LifecycleEvent::Exiting);
    lp.tick();

    let frame = lp.host().last_frame().expect("cleared frame presented");
    assert!(frame.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}
