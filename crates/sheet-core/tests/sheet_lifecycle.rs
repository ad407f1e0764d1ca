//! End-to-end behaviour of the sheet controller.

use sheet_core::{
    DragFrame, DragRecognizer, PointerSample, SettledThreshold, SheetConfig, SheetController,
    SheetEvent, SheetPhase, Size, SnapOffsets, Thresholds, ViewportSnapshot, rescale_offset,
};

const FRAME: f64 = 1.0 / 60.0;
const HEIGHT: f64 = 800.0;

fn run(controller: &mut SheetController) -> Vec<SheetEvent> {
    let mut events = Vec::new();
    for _ in 0..600 {
        if !controller.needs_frame() {
            break;
        }
        events.extend(controller.advance(FRAME));
    }
    events
}

fn opened_sheet(height: f64) -> SheetController {
    let mut controller = SheetController::new(SheetConfig::default());
    controller.resize(Size::new(390.0, height)).unwrap();
    controller.open();
    controller.surface_ready().unwrap();
    assert_eq!(run(&mut controller), vec![SheetEvent::Opened]);
    controller
}

fn moving(movement_y: f64, velocity_y: f64) -> DragFrame {
    DragFrame {
        movement_y,
        velocity_y,
        direction_y: movement_y.signum(),
        ..Default::default()
    }
}

fn started(movement_y: f64) -> DragFrame {
    DragFrame {
        first: true,
        ..moving(movement_y, 0.5)
    }
}

fn released(movement_y: f64, velocity_y: f64) -> DragFrame {
    DragFrame {
        last: true,
        ..moving(movement_y, velocity_y)
    }
}

#[test]
fn test_offsets_follow_thresholds() {
    for height in [1.0, 390.0, 844.0, 2160.0] {
        for (bottom, top) in [(0.0, 1.0), (0.1, 0.9), (0.25, 0.25)] {
            let thresholds =
                Thresholds::new(bottom, sheet_core::MiddleThreshold::Auto, top).unwrap();
            let offsets = thresholds.offsets(height);
            assert_eq!(offsets.close, -height * bottom);
            assert_eq!(offsets.full, -height * top);
            assert!(offsets.full <= offsets.close);
        }
    }
    assert_eq!(Thresholds::default().offsets(0.0), SnapOffsets::ZERO);
}

#[test]
fn test_settled_threshold_through_a_cycle() {
    let mut controller = SheetController::new(SheetConfig::default());
    assert_eq!(controller.settled(), SettledThreshold::Close);
    controller.resize(Size::new(390.0, HEIGHT)).unwrap();
    controller.open();
    controller.surface_ready().unwrap();
    run(&mut controller);
    assert_eq!(controller.settled(), SettledThreshold::Full);

    controller.close().unwrap();
    run(&mut controller);
    assert_eq!(controller.settled(), SettledThreshold::Default);
}

#[test]
fn test_quick_downward_drag_closes_once() {
    let mut controller = opened_sheet(HEIGHT);
    controller.drag(&started(20.0)).unwrap();
    assert_eq!(controller.offset(), -780.0);
    controller.drag(&released(80.0, 3.0)).unwrap();
    assert!(matches!(controller.phase(), SheetPhase::Closing(_)));

    assert_eq!(run(&mut controller), vec![SheetEvent::Closed]);
    assert_eq!(controller.offset(), 0.0);
    assert_eq!(controller.phase(), SheetPhase::Closed);
}

#[test]
fn test_short_downward_drag_resettles() {
    let mut controller = opened_sheet(HEIGHT);
    controller.drag(&started(5.0)).unwrap();
    controller.drag(&moving(10.0, 0.1)).unwrap();
    controller.drag(&released(10.0, 0.0)).unwrap();

    assert!(run(&mut controller).is_empty());
    assert_eq!(controller.offset(), -HEIGHT);
    assert_eq!(controller.settled(), SettledThreshold::Full);
    assert_eq!(controller.phase(), SheetPhase::Open);
}

#[test]
fn test_upward_flick_expands() {
    let mut controller = opened_sheet(HEIGHT);
    controller.set_draggable(true);
    controller.drag(&started(200.0)).unwrap();
    controller.drag(&released(300.0, 0.0)).unwrap();
    assert_eq!(controller.offset(), -500.0);
    controller.set_draggable(false);

    controller.drag(&started(-5.0)).unwrap();
    controller.drag(&released(-10.0, 0.5)).unwrap();
    assert_eq!(controller.driver().target(), Some(-HEIGHT));
    run(&mut controller);
    assert_eq!(controller.offset(), -HEIGHT);
}

#[test]
fn test_rescale_keeps_fraction() {
    let mut controller = opened_sheet(1000.0);
    controller.set_draggable(true);
    controller.drag(&started(400.0)).unwrap();
    controller.drag(&released(400.0, 0.0)).unwrap();
    assert_eq!(controller.offset(), -600.0);

    controller.resize(Size::new(390.0, 700.0)).unwrap();
    assert!((controller.offset() - -420.0).abs() < 1e-9);

    let snapshot = ViewportSnapshot {
        previous: Some(Size::new(390.0, 1000.0)),
        current: Size::new(390.0, 700.0),
    };
    assert_eq!(rescale_offset(-1200.0, &snapshot), Some(-700.0));
}

#[test]
fn test_veto_leaves_offset_in_place() {
    let mut controller = opened_sheet(HEIGHT);
    controller.drag(&started(-10.0)).unwrap();
    assert_eq!(controller.offset(), -810.0);

    let response = controller.drag(&moving(-50.0, 1.0)).unwrap();
    assert!(response.veto);
    assert_eq!(controller.offset(), -810.0);
    assert!(!controller.needs_frame());

    let response = controller.drag(&released(-90.0, 1.0)).unwrap();
    assert!(!response.veto);
    assert_eq!(controller.offset(), -810.0);
    assert!(!controller.needs_frame());
}

#[test]
fn test_double_close_fires_once() {
    let mut controller = opened_sheet(HEIGHT);
    controller.close().unwrap();
    controller.advance(FRAME);
    controller.close().unwrap();
    let events = run(&mut controller);
    assert_eq!(events, vec![SheetEvent::Closed]);
    assert_eq!(controller.unmount(), None);
}

#[test]
fn test_draggable_mode_clamps_at_full() {
    let mut controller = opened_sheet(HEIGHT);
    controller.set_draggable(true);
    controller.drag(&started(300.0)).unwrap();
    controller.drag(&released(300.0, 0.0)).unwrap();
    assert_eq!(controller.offset(), -500.0);

    controller.drag(&started(-100.0)).unwrap();
    controller.drag(&moving(-450.0, 2.0)).unwrap();
    assert_eq!(controller.offset(), -HEIGHT);
    controller.drag(&released(-600.0, 4.0)).unwrap();
    assert_eq!(controller.offset(), -HEIGHT);
    assert!(!controller.needs_frame());
}

#[test]
fn test_pointer_pipeline_with_veto() {
    let mut controller = opened_sheet(HEIGHT);
    let mut recognizer = DragRecognizer::new();

    recognizer.press(PointerSample::new(100.0, 0.0));
    let mut vetoed = false;
    for (step, y) in [95.0, 80.0, 60.0, 40.0].into_iter().enumerate() {
        let sample = PointerSample::new(y, 16.0 * (step as f64 + 1.0));
        if let Some(frame) = recognizer.moved(sample, controller.offset()) {
            if controller.drag(&frame).unwrap().veto {
                recognizer.cancel();
                vetoed = true;
            }
        }
    }
    assert!(vetoed);
    let offset = controller.offset();
    assert_eq!(recognizer.release(PointerSample::new(40.0, 90.0)), None);
    assert_eq!(controller.offset(), offset);
    assert!(!controller.needs_frame());
}

#[test]
fn test_pointer_pipeline_closes() {
    let mut controller = opened_sheet(HEIGHT);
    let mut recognizer = DragRecognizer::new();

    recognizer.press(PointerSample::new(100.0, 0.0));
    for (step, y) in [110.0, 150.0, 200.0].into_iter().enumerate() {
        let sample = PointerSample::new(y, 10.0 * (step as f64 + 1.0));
        if let Some(frame) = recognizer.moved(sample, controller.offset()) {
            controller.drag(&frame).unwrap();
        }
    }
    let frame = recognizer.release(PointerSample::new(230.0, 40.0)).unwrap();
    assert_eq!(frame.velocity_y, 3.0);
    controller.drag(&frame).unwrap();
    assert_eq!(run(&mut controller), vec![SheetEvent::Closed]);
}

#[test]
fn test_tap_does_not_move_sheet() {
    let mut controller = opened_sheet(HEIGHT);
    let mut recognizer = DragRecognizer::new();
    recognizer.press(PointerSample::new(300.0, 0.0));
    let frame = recognizer.release(PointerSample::new(301.0, 50.0)).unwrap();
    assert!(frame.tap);
    controller.drag(&frame).unwrap();
    assert_eq!(controller.offset(), -HEIGHT);
    assert!(!controller.needs_frame());
}

#[test]
fn test_unmount_while_open_reports_close() {
    let mut controller = opened_sheet(HEIGHT);
    assert_eq!(controller.unmount(), Some(SheetEvent::Closed));
}
