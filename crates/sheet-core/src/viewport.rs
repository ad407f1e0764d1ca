//! Viewport and content measurements.

/// Width and height of a box in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The last two viewport measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportSnapshot {
    /// Measurement before `current`; `None` until the second measurement.
    pub previous: Option<Size>,
    pub current: Size,
}

/// Records viewport measurements as they arrive.
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    snapshot: ViewportSnapshot,
    ready: bool,
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a measurement, shifting `current` into `previous`.
    pub fn record(&mut self, size: Size) -> ViewportSnapshot {
        if self.ready {
            self.snapshot.previous = Some(self.snapshot.current);
        }
        self.snapshot.current = size;
        self.ready = true;
        self.snapshot
    }

    /// Forgets all measurements (surface unmounted).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn snapshot(&self) -> ViewportSnapshot {
        self.snapshot
    }

    /// Whether at least one measurement has arrived.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.snapshot.current.height
    }
}

/// Ratio to apply to an offset when the viewport height changes.
///
/// `None` when the previous height is unknown, zero or non-finite, or when
/// the new height is not usable.
pub fn rescale_ratio(snapshot: &ViewportSnapshot) -> Option<f64> {
    let previous = snapshot.previous?.height;
    let current = snapshot.current.height;
    let usable = |h: f64| h.is_finite() && h > 0.0;
    (usable(previous) && usable(current)).then(|| current / previous)
}

/// Rescales `offset` so it covers the same fraction of the new viewport,
/// never going past the new full extent (`-current height`).
pub fn rescale_offset(offset: f64, snapshot: &ViewportSnapshot) -> Option<f64> {
    let ratio = rescale_ratio(snapshot)?;
    Some((offset * ratio).max(-snapshot.current.height))
}
