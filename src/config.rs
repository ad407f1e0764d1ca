//! Demo configuration.
//!
//! The sheet configuration is loaded at compile time using `include_str!`.

use sheet_core::SheetConfig;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the page header.
pub const APP_NAME: &str = "BottomSheet";

/// Console log level.
pub const LOG_LEVEL: log::Level = log::Level::Debug;

// =============================================================================
// Sheet Configuration
// =============================================================================

/// Sheet configuration document.
pub const SHEET_TOML: &str = include_str!("../assets/sheet.toml");

/// Parses [`SHEET_TOML`], falling back to the defaults if the bundled
/// document is invalid.
pub fn sheet_config() -> SheetConfig {
    SheetConfig::from_toml_str(SHEET_TOML).unwrap_or_else(|err| {
        log::error!("invalid sheet.toml: {err}");
        SheetConfig::default()
    })
}
