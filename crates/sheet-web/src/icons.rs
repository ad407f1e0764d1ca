//! Icons for the header controls.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.

use icondata::Icon;

use crate::config::IconTheme;

mod lucide {
    pub use icondata::{LuArrowUpDown as DragMode, LuChevronUp as Expand, LuX as Close};
}

mod bootstrap {
    pub use icondata::{BsArrowDownUp as DragMode, BsChevronUp as Expand, BsXLg as Close};
}

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(EXPAND, Expand);
themed_icon!(DRAG_MODE, DragMode);
themed_icon!(CLOSE, Close);
