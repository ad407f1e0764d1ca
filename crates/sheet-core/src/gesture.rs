//! Drag gesture interpretation.
//!
//! The interpreter turns each [`DragFrame`] into a [`GestureDecision`] for the
//! controller. It never touches the offset itself.
//!
//! Rules, in precedence order, outside draggable mode:
//! 1. Overshoot veto: an upward drag of more than
//!    [`UPWARD_DISTANCE`](crate::config::gesture::UPWARD_DISTANCE) from a
//!    settled `default` or `full` state cancels the gesture.
//! 2. Live follow: every frame before release follows the pointer exactly.
//! 3. Release: upward flicks or long upward drags expand; downward releases
//!    close when low enough or fast enough; everything else re-snaps.
//!
//! In draggable mode every frame follows the pointer, clamped at the full
//! offset. A release that leaves the sheet low enough, or ends a quick
//! downward drag, still closes it.

use crate::config::gesture::{
    CLOSE_FRACTION, FLICK_VELOCITY, QUICK_CLOSE_DISTANCE, QUICK_CLOSE_VELOCITY, UPWARD_DISTANCE,
};
use crate::recognizer::DragFrame;
use crate::settle::SettledThreshold;
use crate::thresholds::SnapOffsets;

/// Vertical direction of a frame. A zero delta counts as upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn of(frame: &DragFrame) -> Self {
        if frame.direction_y > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

/// Where the interpreter is in the current (or last) drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Session started, no movement interpreted yet.
    Dragging,
    /// Offset follows the pointer.
    Following,
    /// Released toward a threshold.
    Snapping,
    /// Released toward the close offset.
    Closing,
    /// The gesture was vetoed; remaining frames are ignored.
    Vetoed,
}

/// Sheet state the interpreter reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Current offset.
    pub offset: f64,
    pub offsets: SnapOffsets,
    pub settled: SettledThreshold,
    pub viewport_height: f64,
    pub draggable: bool,
}

/// Which threshold a re-snap returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResnapBranch {
    /// Re-confirm the full threshold.
    Full,
    /// No explicit re-snap exists for this settled state; the offset is
    /// left where the drag put it.
    Unresolved(SettledThreshold),
}

/// What the controller should do with the offset for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureDecision {
    /// Not a drag (tap or swallowed frame).
    Ignore,
    /// Cancel the gesture; leave the offset where it is.
    Veto,
    /// Jump the offset to this value.
    Follow(f64),
    /// Animate to the full offset.
    Expand { canceled: bool },
    /// Animate to the close offset, launched with `velocity` px/ms.
    Close { velocity: f64 },
    /// Animate back to the settled threshold.
    Resnap { branch: ResnapBranch, canceled: bool },
}

/// Stateful drag interpreter.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    /// Offset recorded at drag start. Deltas compose on top of it.
    anchor: f64,
    phase: GesturePhase,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn anchor(&self) -> f64 {
        self.anchor
    }

    #[inline]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether a drag is currently writing the offset.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging | GesturePhase::Following)
    }

    /// Whether a session is open, including a vetoed one.
    fn in_session(&self) -> bool {
        self.is_dragging() || self.phase == GesturePhase::Vetoed
    }

    /// Scales the stored anchor after a viewport change.
    pub fn rescale_anchor(&mut self, anchor: f64) {
        self.anchor = anchor;
    }

    /// The animation started by the last release has settled.
    pub fn settled(&mut self) {
        if !self.in_session() {
            self.phase = GesturePhase::Idle;
        }
    }

    /// Drops any session and resets the anchor (sheet closed).
    pub fn reset(&mut self) {
        self.anchor = 0.0;
        self.phase = GesturePhase::Idle;
    }

    /// Interprets one frame.
    pub fn interpret(&mut self, frame: &DragFrame, ctx: &GestureContext) -> GestureDecision {
        if frame.tap {
            if frame.last && self.in_session() {
                self.phase = GesturePhase::Idle;
            }
            return GestureDecision::Ignore;
        }

        if frame.first || !self.in_session() {
            self.anchor = ctx.offset;
            self.phase = GesturePhase::Dragging;
        }

        if self.phase == GesturePhase::Vetoed {
            if frame.last {
                self.phase = GesturePhase::Idle;
            }
            return GestureDecision::Ignore;
        }

        if ctx.draggable {
            return self.follow_freely(frame, ctx);
        }

        let direction = Direction::of(frame);
        if direction == Direction::Up
            && matches!(
                ctx.settled,
                SettledThreshold::Default | SettledThreshold::Full
            )
            && frame.movement_y < -UPWARD_DISTANCE
        {
            log::debug!(
                "drag vetoed: {:.1}px upward from {}",
                frame.movement_y,
                ctx.settled.as_str()
            );
            self.phase = if frame.last {
                GesturePhase::Idle
            } else {
                GesturePhase::Vetoed
            };
            return GestureDecision::Veto;
        }

        if !frame.last {
            self.phase = GesturePhase::Following;
            return GestureDecision::Follow(frame.movement_y + self.anchor);
        }

        match direction {
            Direction::Up => self.release_upward(frame, ctx),
            Direction::Down => self.release_downward(frame, ctx),
        }
    }

    fn follow_freely(&mut self, frame: &DragFrame, ctx: &GestureContext) -> GestureDecision {
        let target = (frame.movement_y + self.anchor).max(ctx.offsets.full);
        if !frame.last {
            self.phase = GesturePhase::Following;
            return GestureDecision::Follow(target);
        }

        let released = GestureContext {
            offset: target,
            ..*ctx
        };
        if should_close(frame, &released) {
            self.phase = GesturePhase::Closing;
            return GestureDecision::Close {
                velocity: frame.velocity_y,
            };
        }
        self.phase = GesturePhase::Idle;
        GestureDecision::Follow(target)
    }

    fn release_upward(&mut self, frame: &DragFrame, ctx: &GestureContext) -> GestureDecision {
        let is_flick = frame.velocity_y > FLICK_VELOCITY;
        let far_enough = frame.movement_y < -UPWARD_DISTANCE;
        if is_flick || far_enough {
            self.phase = GesturePhase::Snapping;
            GestureDecision::Expand {
                canceled: frame.canceled,
            }
        } else {
            self.resnap(frame, ctx)
        }
    }

    fn release_downward(&mut self, frame: &DragFrame, ctx: &GestureContext) -> GestureDecision {
        if should_close(frame, ctx) {
            self.phase = GesturePhase::Closing;
            GestureDecision::Close {
                velocity: frame.velocity_y,
            }
        } else {
            self.resnap(frame, ctx)
        }
    }

    fn resnap(&mut self, frame: &DragFrame, ctx: &GestureContext) -> GestureDecision {
        let branch = match ctx.settled {
            SettledThreshold::Full => ResnapBranch::Full,
            other => ResnapBranch::Unresolved(other),
        };
        self.phase = match branch {
            ResnapBranch::Full => GesturePhase::Snapping,
            ResnapBranch::Unresolved(_) => GesturePhase::Idle,
        };
        GestureDecision::Resnap {
            branch,
            canceled: frame.canceled,
        }
    }
}

/// Whether a downward release closes the sheet: the sheet sits in the
/// bottom fifth of the viewport, or the drag was a long, fast swipe.
pub fn should_close(frame: &DragFrame, ctx: &GestureContext) -> bool {
    let low_enough = ctx.offset > -ctx.viewport_height * CLOSE_FRACTION;
    let quick_drag =
        frame.velocity_y >= QUICK_CLOSE_VELOCITY && frame.movement_y > QUICK_CLOSE_DISTANCE;
    low_enough || quick_drag
}
