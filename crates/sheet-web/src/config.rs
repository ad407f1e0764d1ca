//! Render-surface configuration.

// =============================================================================
// Icon Theme
// =============================================================================

/// Icon style for the header controls.
///
/// - `Bootstrap` - Filled, bold icons
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Icon theme used by the header controls.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

// =============================================================================
// Surface Layout
// =============================================================================

/// Opacity of the backdrop when the sheet is fully expanded.
pub const BACKDROP_OPACITY: f64 = 0.5;

/// Elevation is rendered as a shadow of `elevation * SHADOW_PX_PER_LEVEL`.
pub const SHADOW_PX_PER_LEVEL: f64 = 0.75;
