//! Panel controller.
//!
//! [`SheetController`] owns the [`SpringDriver`] and sequences everything that
//! wants to move the sheet: opening, closing, drag frames, viewport changes
//! and header actions. Callers submit requests; only the driver writes the
//! offset, and the settled threshold is re-derived from every write.
//!
//! The controller is clock-free. The host advances it with
//! [`advance`](SheetController::advance) once per animation frame.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::SheetConfig;
use crate::error::SheetError;
use crate::gesture::{GestureContext, GestureDecision, GestureInterpreter, ResnapBranch};
use crate::recognizer::DragFrame;
use crate::settle::{SettledThreshold, anchors, settle};
use crate::spring::{AnimationId, Motion, Release, SpringDriver, SpringProfile};
use crate::thresholds::SnapOffsets;
use crate::viewport::{Size, ViewportTracker, rescale_ratio};

/// Progress of an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStage {
    /// Waiting for the render surface to mount and report its size.
    AwaitingSurface,
    /// Animating toward the full offset.
    Animating(AnimationId),
}

/// Lifecycle of the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SheetPhase {
    #[default]
    Closed,
    Opening(OpenStage),
    Open,
    /// Animating toward the close offset.
    Closing(AnimationId),
}

/// Notifications produced by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    /// The opening animation settled.
    Opened,
    /// A close cycle completed. Emitted at most once per cycle.
    Closed,
}

/// What the input layer must do after a drag frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragResponse {
    /// Abandon the rest of this drag session.
    pub veto: bool,
}

/// Sequencer for one bottom sheet.
#[derive(Debug)]
pub struct SheetController {
    config: SheetConfig,
    driver: SpringDriver,
    gesture: GestureInterpreter,
    viewport: ViewportTracker,
    content: Size,
    draggable: bool,
    phase: SheetPhase,
    offsets: Rc<Cell<SnapOffsets>>,
    settled: Rc<Cell<SettledThreshold>>,
}

impl SheetController {
    pub fn new(config: SheetConfig) -> Self {
        let offsets = Rc::new(Cell::new(SnapOffsets::ZERO));
        let settled = Rc::new(Cell::new(SettledThreshold::default()));

        let mut driver = SpringDriver::new(0.0);
        driver.observe({
            let offsets = Rc::clone(&offsets);
            let settled = Rc::clone(&settled);
            move |value| {
                let previous = settled.get();
                let next = settle(&anchors(offsets.get()), value, previous);
                if next != previous {
                    log::debug!("settled {} -> {}", previous.as_str(), next.as_str());
                    settled.set(next);
                }
            }
        });

        let phase = if config.open {
            SheetPhase::Opening(OpenStage::AwaitingSurface)
        } else {
            SheetPhase::Closed
        };

        Self {
            draggable: config.draggable,
            config,
            driver,
            gesture: GestureInterpreter::new(),
            viewport: ViewportTracker::new(),
            content: Size::default(),
            phase,
            offsets,
            settled,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// The current offset.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.driver.value()
    }

    #[inline]
    pub fn offsets(&self) -> SnapOffsets {
        self.offsets.get()
    }

    #[inline]
    pub fn settled(&self) -> SettledThreshold {
        self.settled.get()
    }

    #[inline]
    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// Whether the render surface should be mounted.
    pub fn is_shown(&self) -> bool {
        self.phase != SheetPhase::Closed
    }

    #[inline]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Whether a drag session is open.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Whether the host must keep calling [`advance`](Self::advance).
    pub fn needs_frame(&self) -> bool {
        self.driver.is_animating()
    }

    /// Latest viewport height.
    pub fn viewport_height(&self) -> f64 {
        self.viewport.height()
    }

    pub fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    pub fn content_size(&self) -> Size {
        self.content
    }

    pub fn driver(&self) -> &SpringDriver {
        &self.driver
    }

    pub fn gesture(&self) -> &GestureInterpreter {
        &self.gesture
    }

    // =========================================================================
    // Measurements
    // =========================================================================

    /// Records a viewport measurement and rescales the offset so the sheet
    /// keeps its visual fraction of the screen.
    ///
    /// The rescale is skipped while a drag session is open, and whenever the
    /// previous height is unknown or unusable.
    pub fn resize(&mut self, size: Size) -> Result<(), SheetError> {
        let snapshot = self.viewport.record(size);
        self.offsets.set(self.config.threshold.offsets(size.height));

        if snapshot.previous.is_none() {
            return Ok(());
        }
        if self.gesture.is_dragging() {
            log::debug!("viewport changed mid-drag, offset left to the drag");
            return Ok(());
        }
        let Some(ratio) = rescale_ratio(&snapshot) else {
            log::warn!("skipping rescale for viewport {snapshot:?}");
            return Ok(());
        };

        let floor = -size.height;
        self.driver.rescale(ratio, floor)?;
        self.gesture
            .rescale_anchor((self.gesture.anchor() * ratio).max(floor));
        Ok(())
    }

    /// Records the rendered content size of the surface.
    pub fn set_content_size(&mut self, size: Size) {
        self.content = size;
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    /// Requests the sheet to open. The animation starts once
    /// [`surface_ready`](Self::surface_ready) is called.
    pub fn open(&mut self) {
        match self.phase {
            SheetPhase::Closed | SheetPhase::Closing(_) => {
                log::debug!("opening, waiting for surface");
                self.phase = SheetPhase::Opening(OpenStage::AwaitingSurface);
            }
            SheetPhase::Opening(_) | SheetPhase::Open => {}
        }
    }

    /// The render surface is mounted and measured.
    pub fn surface_ready(&mut self) -> Result<(), SheetError> {
        if self.phase != SheetPhase::Opening(OpenStage::AwaitingSurface) {
            return Ok(());
        }
        let config = self.config.open_profile.config(Release::default());
        let id = self
            .driver
            .drive_to(self.offsets.get().full, Motion::Animated(config))?;
        self.phase = SheetPhase::Opening(OpenStage::Animating(id));
        Ok(())
    }

    /// Requests the sheet to close. Calling it again while the sheet is
    /// closing or closed does nothing.
    pub fn close(&mut self) -> Result<(), SheetError> {
        self.begin_close(Release::default())
    }

    /// Applies the host's `open` flag.
    pub fn set_open(&mut self, open: bool) -> Result<(), SheetError> {
        if open {
            self.open();
            Ok(())
        } else {
            self.close()
        }
    }

    /// The host removed the sheet. Returns the close notification if the
    /// sheet had not completed a close cycle.
    pub fn unmount(&mut self) -> Option<SheetEvent> {
        let was_shown = self.is_shown();
        self.phase = SheetPhase::Closed;
        self.gesture.reset();
        self.viewport.reset();
        was_shown.then_some(SheetEvent::Closed)
    }

    fn begin_close(&mut self, release: Release) -> Result<(), SheetError> {
        if matches!(self.phase, SheetPhase::Closed | SheetPhase::Closing(_)) {
            return Ok(());
        }
        let config = SpringProfile::Close.config(release);
        let id = self
            .driver
            .drive_to(self.offsets.get().close, Motion::Animated(config))?;
        log::debug!("closing with release velocity {}", release.velocity);
        self.phase = SheetPhase::Closing(id);
        Ok(())
    }

    // =========================================================================
    // Gestures and header actions
    // =========================================================================

    /// Feeds one drag frame through the gesture rules.
    ///
    /// Drags are vetoed while a close is animating; the close cycle always
    /// completes.
    pub fn drag(&mut self, frame: &DragFrame) -> Result<DragResponse, SheetError> {
        if let SheetPhase::Closing(_) = self.phase {
            log::debug!("drag vetoed while closing");
            return Ok(DragResponse { veto: true });
        }
        if matches!(
            self.phase,
            SheetPhase::Closed | SheetPhase::Opening(OpenStage::AwaitingSurface)
        ) {
            return Ok(DragResponse::default());
        }

        let context = GestureContext {
            offset: self.driver.value(),
            offsets: self.offsets.get(),
            settled: self.settled.get(),
            viewport_height: self.viewport.height(),
            draggable: self.draggable,
        };
        let offsets = context.offsets;

        match self.gesture.interpret(frame, &context) {
            GestureDecision::Ignore => return Ok(DragResponse::default()),
            GestureDecision::Veto => return Ok(DragResponse { veto: true }),
            GestureDecision::Follow(offset) => self.driver.jump_to(offset)?,
            GestureDecision::Expand { canceled } => {
                self.snap(offsets.full, SpringProfile::Full, canceled)?;
            }
            GestureDecision::Close { velocity } => {
                return self
                    .begin_close(Release {
                        canceled: frame.canceled,
                        velocity,
                    })
                    .map(|()| DragResponse::default());
            }
            GestureDecision::Resnap {
                branch: ResnapBranch::Full,
                canceled,
            } => self.snap(offsets.full, SpringProfile::Full, canceled)?,
            GestureDecision::Resnap {
                branch: ResnapBranch::Unresolved(settled),
                ..
            } => {
                log::debug!("no re-snap path from {}, offset kept", settled.as_str());
            }
        }

        self.phase = SheetPhase::Open;
        Ok(DragResponse::default())
    }

    /// Header expand toggle: re-confirms the full offset when settled there.
    pub fn toggle_expand(&mut self) -> Result<(), SheetError> {
        if self.settled.get() != SettledThreshold::Full {
            log::debug!("expand toggle ignored at {}", self.settled.get().as_str());
            return Ok(());
        }
        self.snap(self.offsets.get().full, SpringProfile::Full, false)
    }

    /// Flips draggable mode and returns the new value. The offset is not
    /// touched.
    pub fn toggle_draggable(&mut self) -> bool {
        self.set_draggable(!self.draggable);
        self.draggable
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    fn snap(
        &mut self,
        target: f64,
        profile: SpringProfile,
        canceled: bool,
    ) -> Result<(), SheetError> {
        let config = profile.config(Release {
            canceled,
            velocity: 0.0,
        });
        self.driver.drive_to(target, Motion::Animated(config))?;
        Ok(())
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advances animations by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> Option<SheetEvent> {
        let finished = self.driver.advance(dt)?;
        self.gesture.settled();

        match self.phase {
            SheetPhase::Closing(id) if id == finished => {
                self.phase = SheetPhase::Closed;
                self.gesture.reset();
                log::debug!("closed");
                Some(SheetEvent::Closed)
            }
            SheetPhase::Opening(OpenStage::Animating(id)) if id == finished => {
                self.phase = SheetPhase::Open;
                log::debug!("opened");
                Some(SheetEvent::Opened)
            }
            _ => None,
        }
    }
}

impl Default for SheetController {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}
