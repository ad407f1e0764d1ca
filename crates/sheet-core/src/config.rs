//! Sheet configuration.
//!
//! Centralizes the interaction constants and the public configuration
//! surface ([`SheetConfig`]) accepted by the controller and the web layer.

use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::spring::SpringProfile;
use crate::thresholds::Thresholds;

// =============================================================================
// Snap Configuration
// =============================================================================

/// Distance (px) within which the offset counts as resting on an anchor.
pub const SETTLE_TOLERANCE: f64 = 20.0;

/// Top padding (px) between the viewport edge and a fully expanded sheet.
pub const OFFSET_TOP: f64 = 32.0;

// =============================================================================
// Gesture Configuration
// =============================================================================

/// Gesture interpretation thresholds.
pub mod gesture {
    /// Upward movement (px) past which a drag counts as "far enough".
    /// Also the overshoot distance that vetoes a drag from a settled state.
    pub const UPWARD_DISTANCE: f64 = 40.0;

    /// Upward release velocity (px/ms) that counts as a flick.
    pub const FLICK_VELOCITY: f64 = 0.2;

    /// Downward release velocity (px/ms) of a quick close.
    pub const QUICK_CLOSE_VELOCITY: f64 = 2.0;

    /// Downward movement (px) a quick close must also cover.
    pub const QUICK_CLOSE_DISTANCE: f64 = 60.0;

    /// Fraction of the viewport height below which a release always closes.
    pub const CLOSE_FRACTION: f64 = 0.2;
}

/// Pointer recognition parameters.
pub mod pointer {
    /// Delay (ms) before a stationary press becomes a drag.
    pub const DRAG_DELAY_MS: f64 = 200.0;

    /// Movement (px) under which a press is treated as a tap.
    pub const TAP_THRESHOLD: f64 = 3.0;

    /// Elasticity used when the pointer pulls past a bound.
    pub const RUBBERBAND: f64 = 0.15;

    /// Largest offset the sheet may be dragged to (its resting bottom edge).
    pub const MAX_OFFSET: f64 = 0.0;
}

/// Spring integration parameters.
pub mod spring {
    /// Integration step in seconds.
    pub const STEP_SECONDS: f64 = 0.001;

    /// Largest frame delta integrated in one `advance` call. Longer gaps
    /// (background tabs) are truncated.
    pub const MAX_FRAME_SECONDS: f64 = 0.064;

    /// Distance (px) at which a spring is considered at rest.
    pub const REST_DISTANCE: f64 = 0.01;

    /// Speed (px/s) at which a spring is considered at rest.
    pub const REST_SPEED: f64 = 0.5;
}

// =============================================================================
// Header Configuration
// =============================================================================

/// A control that the actions header may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAction {
    /// Expand toggle.
    Toggle,
    /// Drag-mode toggle.
    Draggable,
    /// Close button.
    Close,
}

impl HeaderAction {
    pub const ALL: [HeaderAction; 3] = [Self::Toggle, Self::Draggable, Self::Close];
}

/// Which header the sheet renders above its content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HeaderConfig {
    /// Passive drag notch.
    #[default]
    Default,
    /// Bar with the listed controls. Order is irrelevant.
    Actions {
        #[serde(default)]
        actions: Vec<HeaderAction>,
    },
}

impl HeaderConfig {
    /// Whether the header renders `action`.
    pub fn has(&self, action: HeaderAction) -> bool {
        match self {
            Self::Default => false,
            Self::Actions { actions } => actions.contains(&action),
        }
    }
}

// =============================================================================
// SheetConfig
// =============================================================================

/// Public configuration of a bottom sheet.
///
/// Every field has a default so partial documents are accepted:
///
/// ```
/// use sheet_core::SheetConfig;
///
/// let config = SheetConfig::from_toml_str(r#"
///     threshold = [0, "auto", 1]
///     header = { type = "actions", actions = ["toggle", "close"] }
/// "#).unwrap();
/// assert!(config.threshold.middle().is_auto());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// `[bottom, middle, top]` fractions of the viewport height.
    pub threshold: Thresholds,
    /// Initial draggable mode.
    pub draggable: bool,
    /// Header collaborator configuration.
    pub header: HeaderConfig,
    /// Whether the sheet starts open.
    pub open: bool,
    /// Paper elevation (shadow depth).
    pub elevation: u8,
    /// Notch width in percent of the viewport width.
    pub notch_width: f64,
    /// Spring profile used by the opening animation.
    pub open_profile: SpringProfile,
    /// Extra class for the modal layer. Opaque to the core.
    pub modal_class: Option<String>,
    /// Extra class for the paper layer. Opaque to the core.
    pub paper_class: Option<String>,
}

impl SheetConfig {
    /// Parses a TOML configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self, SheetError> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            threshold: Thresholds::default(),
            draggable: false,
            header: HeaderConfig::default(),
            open: false,
            elevation: 16,
            notch_width: 25.0,
            open_profile: SpringProfile::Full,
            modal_class: None,
            paper_class: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::MiddleThreshold;

    #[test]
    fn test_default_config() {
        let config = SheetConfig::default();
        assert_eq!(config.threshold, Thresholds::default());
        assert!(!config.draggable);
        assert!(!config.open);
        assert_eq!(config.notch_width, 25.0);
        assert_eq!(config.header, HeaderConfig::Default);
        assert_eq!(config.open_profile, SpringProfile::Full);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SheetConfig::from_toml_str("").unwrap();
        assert_eq!(config, SheetConfig::default());
    }

    #[test]
    fn test_full_toml_document() {
        let config = SheetConfig::from_toml_str(
            r#"
            threshold = [0, "auto", 0.9]
            draggable = true
            elevation = 0
            notch_width = 30
            open_profile = "once"
            paper_class = "rounded"

            [header]
            type = "actions"
            actions = ["close", "toggle"]
            "#,
        )
        .unwrap();

        assert_eq!(config.threshold.middle(), MiddleThreshold::Auto);
        assert_eq!(config.threshold.top(), 0.9);
        assert!(config.draggable);
        assert_eq!(config.elevation, 0);
        assert_eq!(config.notch_width, 30.0);
        assert_eq!(config.open_profile, SpringProfile::Once);
        assert_eq!(config.paper_class.as_deref(), Some("rounded"));
        assert!(config.header.has(HeaderAction::Close));
        assert!(config.header.has(HeaderAction::Toggle));
        assert!(!config.header.has(HeaderAction::Draggable));
    }

    #[test]
    fn test_unknown_profile_is_fatal() {
        let err = SheetConfig::from_toml_str(r#"open_profile = "bouncy""#).unwrap_err();
        assert!(matches!(err, SheetError::Config(ref msg) if msg.contains("bouncy")));
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let err = SheetConfig::from_toml_str("threshold = [0, 0.5, 2]").unwrap_err();
        assert!(matches!(err, SheetError::Config(_)));
    }

    #[test]
    fn test_json_prop_shape() {
        let config: SheetConfig = serde_json::from_str(
            r#"{"threshold":[0,"auto",1],"header":{"type":"actions","actions":["toggle","draggable","close"]}}"#,
        )
        .unwrap();
        for action in HeaderAction::ALL {
            assert!(config.header.has(action));
        }
    }

    #[test]
    fn test_default_header_renders_no_actions() {
        let header = HeaderConfig::Default;
        for action in HeaderAction::ALL {
            assert!(!header.has(action));
        }
    }
}
