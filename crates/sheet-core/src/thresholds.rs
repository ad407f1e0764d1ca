//! Threshold configuration and conversion into snap offsets.
//!
//! Thresholds are fractions of the viewport height. They are immutable
//! configuration; every viewport size produces a fresh [`SnapOffsets`].

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// The middle entry of the threshold triple.
///
/// `Auto` currently computes the same two offsets as a numeric middle value;
/// the middle entry is carried for a future third snap level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MiddleRepr", into = "MiddleRepr")]
pub enum MiddleThreshold {
    /// Explicit fraction of the viewport height.
    Fraction(f64),
    /// Size the middle level from content.
    Auto,
}

impl MiddleThreshold {
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MiddleRepr {
    Fraction(f64),
    Keyword(String),
}

impl TryFrom<MiddleRepr> for MiddleThreshold {
    type Error = SheetError;

    fn try_from(repr: MiddleRepr) -> Result<Self, Self::Error> {
        match repr {
            MiddleRepr::Fraction(value) => Ok(Self::Fraction(check_fraction("middle", value)?)),
            MiddleRepr::Keyword(word) if word == "auto" => Ok(Self::Auto),
            MiddleRepr::Keyword(word) => Err(SheetError::InvalidMiddleThreshold(word)),
        }
    }
}

impl From<MiddleThreshold> for MiddleRepr {
    fn from(middle: MiddleThreshold) -> Self {
        match middle {
            MiddleThreshold::Fraction(value) => Self::Fraction(value),
            MiddleThreshold::Auto => Self::Keyword("auto".to_string()),
        }
    }
}

/// Ordered `[bottom, middle, top]` threshold triple.
///
/// Serialized as a three element array, e.g. `[0, "auto", 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "(f64, MiddleThreshold, f64)",
    into = "(f64, MiddleThreshold, f64)"
)]
pub struct Thresholds {
    bottom: f64,
    middle: MiddleThreshold,
    top: f64,
}

impl Thresholds {
    /// Creates a validated threshold triple.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::ThresholdOutOfRange`] when `bottom`, `top` or a
    /// numeric `middle` is not a finite fraction in `[0, 1]`.
    pub fn new(bottom: f64, middle: MiddleThreshold, top: f64) -> Result<Self, SheetError> {
        let middle = match middle {
            MiddleThreshold::Fraction(value) => {
                MiddleThreshold::Fraction(check_fraction("middle", value)?)
            }
            MiddleThreshold::Auto => MiddleThreshold::Auto,
        };
        Ok(Self {
            bottom: check_fraction("bottom", bottom)?,
            middle,
            top: check_fraction("top", top)?,
        })
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn middle(&self) -> MiddleThreshold {
        self.middle
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    /// Converts the fractions into offsets for a viewport of `viewport_height`.
    ///
    /// A zero, negative or non-finite height (viewport not measured yet)
    /// yields [`SnapOffsets::ZERO`] so no NaN ever reaches the spring.
    pub fn offsets(&self, viewport_height: f64) -> SnapOffsets {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return SnapOffsets::ZERO;
        }
        SnapOffsets {
            close: -viewport_height * self.bottom,
            full: -viewport_height * self.top,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            bottom: 0.0,
            middle: MiddleThreshold::Fraction(0.5),
            top: 1.0,
        }
    }
}

impl TryFrom<(f64, MiddleThreshold, f64)> for Thresholds {
    type Error = SheetError;

    fn try_from((bottom, middle, top): (f64, MiddleThreshold, f64)) -> Result<Self, Self::Error> {
        Self::new(bottom, middle, top)
    }
}

impl From<Thresholds> for (f64, MiddleThreshold, f64) {
    fn from(thresholds: Thresholds) -> Self {
        (thresholds.bottom, thresholds.middle, thresholds.top)
    }
}

/// Concrete offsets for one viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOffsets {
    /// Offset of the bottom (closed) position.
    pub close: f64,
    /// Offset of the top (fully expanded) position.
    pub full: f64,
}

impl SnapOffsets {
    pub const ZERO: Self = Self {
        close: 0.0,
        full: 0.0,
    };
}

fn check_fraction(position: &'static str, value: f64) -> Result<f64, SheetError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SheetError::ThresholdOutOfRange { position, value })
    }
}
