//! Settled threshold derivation.
//!
//! The settled threshold is never stored independently of the offset: it is
//! recomputed from the offset after every write by matching it against an
//! ordered list of anchors, each with its own tolerance band. Offsets outside
//! every band keep the previous value (there is no "in transit" state).

use crate::config::SETTLE_TOLERANCE;
use crate::thresholds::SnapOffsets;

/// The discrete snapped state of the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SettledThreshold {
    /// Nothing has been derived yet.
    #[default]
    Close,
    /// Resting on the close offset.
    Default,
    /// Resting on the full offset.
    Full,
}

impl SettledThreshold {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Default => "default",
            Self::Full => "full",
        }
    }
}

/// An offset the sheet can rest on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub threshold: SettledThreshold,
    pub offset: f64,
    pub tolerance: f64,
}

impl Anchor {
    /// Whether `offset` lies inside this anchor's band (inclusive).
    pub fn contains(&self, offset: f64) -> bool {
        (offset - self.offset).abs() <= self.tolerance
    }
}

/// Anchors for the two-level layout, in priority order.
pub fn anchors(offsets: SnapOffsets) -> [Anchor; 2] {
    [
        Anchor {
            threshold: SettledThreshold::Default,
            offset: offsets.close,
            tolerance: SETTLE_TOLERANCE,
        },
        Anchor {
            threshold: SettledThreshold::Full,
            offset: offsets.full,
            tolerance: SETTLE_TOLERANCE,
        },
    ]
}

/// Derives the settled threshold for `offset`.
///
/// The first anchor whose band contains the offset wins; if none does,
/// `previous` is returned unchanged.
pub fn settle(anchors: &[Anchor], offset: f64, previous: SettledThreshold) -> SettledThreshold {
    anchors
        .iter()
        .find(|anchor| anchor.contains(offset))
        .map_or(previous, |anchor| anchor.threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets() -> SnapOffsets {
        SnapOffsets {
            close: 0.0,
            full: -800.0,
        }
    }

    #[test]
    fn test_initial_state_is_close() {
        assert_eq!(SettledThreshold::default(), SettledThreshold::Close);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let anchors = anchors(offsets());
        let prev = SettledThreshold::Close;
        assert_eq!(settle(&anchors, 20.0, prev), SettledThreshold::Default);
        assert_eq!(settle(&anchors, -20.0, prev), SettledThreshold::Default);
        assert_eq!(settle(&anchors, -780.0, prev), SettledThreshold::Full);
        assert_eq!(settle(&anchors, -820.0, prev), SettledThreshold::Full);
    }

    #[test]
    fn test_outside_bands_keeps_previous() {
        let anchors = anchors(offsets());
        assert_eq!(
            settle(&anchors, -20.001, SettledThreshold::Full),
            SettledThreshold::Full
        );
        assert_eq!(
            settle(&anchors, -779.9, SettledThreshold::Default),
            SettledThreshold::Default
        );
        assert_eq!(
            settle(&anchors, -400.0, SettledThreshold::Close),
            SettledThreshold::Close
        );
    }

    #[test]
    fn test_overlapping_bands_prefer_first_anchor() {
        let anchors = anchors(SnapOffsets::ZERO);
        assert_eq!(
            settle(&anchors, 0.0, SettledThreshold::Full),
            SettledThreshold::Default
        );
    }

    #[test]
    fn test_generalizes_to_more_anchors() {
        let anchors = [
            Anchor {
                threshold: SettledThreshold::Default,
                offset: 0.0,
                tolerance: 5.0,
            },
            Anchor {
                threshold: SettledThreshold::Close,
                offset: -300.0,
                tolerance: 50.0,
            },
            Anchor {
                threshold: SettledThreshold::Full,
                offset: -600.0,
                tolerance: 5.0,
            },
        ];
        assert_eq!(
            settle(&anchors, -340.0, SettledThreshold::Full),
            SettledThreshold::Close
        );
        assert_eq!(
            settle(&anchors, -10.0, SettledThreshold::Full),
            SettledThreshold::Full
        );
    }
}
