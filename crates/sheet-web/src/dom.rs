//! DOM and Web API helpers.

use sheet_core::Size;
use web_sys::{Element, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Inner size of the window. Zero when unavailable, which the core maps to
/// zero offsets.
pub fn viewport_size() -> Size {
    let Some(window) = window() else {
        return Size::default();
    };
    let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Size::new(read(window.inner_width()), read(window.inner_height()))
}

/// Bounding box size of `element`.
pub fn element_size(element: &Element) -> Size {
    let rect = element.get_bounding_client_rect();
    Size::new(rect.width(), rect.height())
}

/// Routes further events of `pointer_id` to `element`. Returns whether the
/// capture took effect.
pub fn capture_pointer(element: &Element, pointer_id: i32) -> bool {
    match element.set_pointer_capture(pointer_id) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("pointer capture failed for {pointer_id}: {err:?}");
            false
        }
    }
}

/// High resolution timestamp in milliseconds.
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
