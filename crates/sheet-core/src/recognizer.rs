//! Pointer drag recognition.
//!
//! Turns raw pointer samples into [`DragFrame`]s:
//! - a press becomes a drag after [`DRAG_DELAY_MS`] or as soon as the
//!   pointer travels past [`TAP_THRESHOLD`], whichever comes first
//! - presses that never travel past the threshold are reported as taps
//! - movement past the bottom bound ([`MAX_OFFSET`]) is rubber-banded while
//!   dragging and clamped on release
//!
//! Velocity is in px/ms, measured between the last two samples.

use crate::config::pointer::{DRAG_DELAY_MS, MAX_OFFSET, RUBBERBAND, TAP_THRESHOLD};

/// Pause (ms) before release after which the release carries no velocity.
const STALE_RELEASE_MS: f64 = 32.0;

/// One pointer position, in CSS pixels and milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub y: f64,
    pub time_ms: f64,
}

impl PointerSample {
    pub const fn new(y: f64, time_ms: f64) -> Self {
        Self { y, time_ms }
    }
}

/// One event of a drag session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragFrame {
    /// Vertical movement since the drag started (bounded).
    pub movement_y: f64,
    /// Vertical speed in px/ms (always non-negative).
    pub velocity_y: f64,
    /// Sign of the last non-zero vertical delta (`1.0` is downward).
    pub direction_y: f64,
    /// First frame of the session.
    pub first: bool,
    /// Last frame of the session.
    pub last: bool,
    /// The session was canceled by the platform.
    pub canceled: bool,
    /// The press never became a real drag.
    pub tap: bool,
}

#[derive(Debug, Clone, Copy)]
struct Tracking {
    origin: PointerSample,
    latest: PointerSample,
    anchor: f64,
    velocity: f64,
    direction: f64,
    travelled: f64,
}

#[derive(Debug, Clone, Copy, Default)]
enum State {
    #[default]
    Idle,
    Pending(PointerSample),
    Active(Tracking),
    Canceled,
}

/// Recognizes drags from pointer samples.
#[derive(Debug, Clone, Default)]
pub struct DragRecognizer {
    state: State,
}

impl DragRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag session has started and not yet ended.
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active(_))
    }

    /// Whether a pointer is down (pending, active or canceled session).
    pub fn is_pressed(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Pointer went down. Nothing is emitted until the drag starts.
    pub fn press(&mut self, sample: PointerSample) {
        self.state = State::Pending(sample);
    }

    /// Checks the start delay. `offset` is the sheet offset at this instant
    /// and becomes the anchor of the session if it starts now.
    pub fn poll(&mut self, now_ms: f64, offset: f64) -> Option<DragFrame> {
        let State::Pending(origin) = self.state else {
            return None;
        };
        if now_ms - origin.time_ms < DRAG_DELAY_MS {
            return None;
        }
        let tracking = Tracking {
            origin,
            latest: origin,
            anchor: offset,
            velocity: 0.0,
            direction: 0.0,
            travelled: 0.0,
        };
        self.state = State::Active(tracking);
        Some(DragFrame {
            first: true,
            ..Default::default()
        })
    }

    /// Pointer moved. `offset` is only used if the drag starts with this move.
    pub fn moved(&mut self, sample: PointerSample, offset: f64) -> Option<DragFrame> {
        match self.state {
            State::Pending(origin) => {
                if (sample.y - origin.y).abs() < TAP_THRESHOLD {
                    return None;
                }
                let mut tracking = Tracking {
                    origin,
                    latest: origin,
                    anchor: offset,
                    velocity: 0.0,
                    direction: 0.0,
                    travelled: 0.0,
                };
                tracking.update(sample);
                self.state = State::Active(tracking);
                Some(DragFrame {
                    first: true,
                    ..tracking.frame(false)
                })
            }
            State::Active(mut tracking) => {
                tracking.update(sample);
                self.state = State::Active(tracking);
                Some(tracking.frame(false))
            }
            State::Idle | State::Canceled => None,
        }
    }

    /// Pointer went up. Emits the last frame of the session, or a tap.
    pub fn release(&mut self, sample: PointerSample) -> Option<DragFrame> {
        let state = std::mem::take(&mut self.state);
        match state {
            State::Pending(_) => Some(DragFrame {
                first: true,
                last: true,
                tap: true,
                ..Default::default()
            }),
            State::Active(mut tracking) => {
                tracking.finish(sample);
                let mut frame = tracking.frame(true);
                frame.tap = tracking.travelled < TAP_THRESHOLD;
                Some(frame)
            }
            State::Idle | State::Canceled => None,
        }
    }

    /// The platform took the pointer away (e.g. `pointercancel`).
    pub fn interrupt(&mut self) -> Option<DragFrame> {
        match std::mem::take(&mut self.state) {
            State::Active(tracking) => Some(DragFrame {
                canceled: true,
                ..tracking.frame(true)
            }),
            _ => None,
        }
    }

    /// Abandons the session without a final frame. Later samples of the same
    /// press are ignored.
    pub fn cancel(&mut self) {
        if self.is_pressed() {
            self.state = State::Canceled;
        }
    }
}

impl Tracking {
    fn update(&mut self, sample: PointerSample) {
        let dy = sample.y - self.latest.y;
        let dt = sample.time_ms - self.latest.time_ms;
        if dt > 0.0 {
            self.velocity = dy.abs() / dt;
        }
        if dy != 0.0 {
            self.direction = dy.signum();
        }
        self.travelled = self.travelled.max((sample.y - self.origin.y).abs());
        self.latest = sample;
    }

    fn finish(&mut self, sample: PointerSample) {
        let dt = sample.time_ms - self.latest.time_ms;
        if sample.y != self.latest.y {
            self.update(sample);
        } else if dt > STALE_RELEASE_MS {
            self.velocity = 0.0;
        }
    }

    fn frame(&self, last: bool) -> DragFrame {
        let raw = self.latest.y - self.origin.y;
        let position = self.anchor + raw;
        let bounded = if position <= MAX_OFFSET {
            position
        } else if last {
            MAX_OFFSET
        } else {
            MAX_OFFSET + rubberband(position - MAX_OFFSET, f64::INFINITY, RUBBERBAND)
        };
        DragFrame {
            movement_y: bounded - self.anchor,
            velocity_y: self.velocity,
            direction_y: self.direction,
            first: false,
            last,
            canceled: false,
            tap: false,
        }
    }
}

/// Elastic displacement for `distance` px past a bound.
///
/// With an unbounded `dimension` the curve is `distance^(5 * constant)`.
pub fn rubberband(distance: f64, dimension: f64, constant: f64) -> f64 {
    if dimension == 0.0 || dimension.is_infinite() {
        distance.powf(constant * 5.0)
    } else {
        (distance * dimension * constant) / (dimension + constant * distance)
    }
}
