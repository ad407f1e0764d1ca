//! Measurement hooks.
//!
//! Both hooks remove their window listeners when the owning component is
//! cleaned up.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use sheet_core::Size;

use crate::dom;

/// Window inner size, updated on every `resize` event.
pub fn use_viewport() -> ReadSignal<Size> {
    let (size, set_size) = signal(dom::viewport_size());

    let handle = window_event_listener(ev::resize, move |_| {
        set_size.set(dom::viewport_size());
    });
    on_cleanup(move || handle.remove());

    size
}

/// Bounding box size of `target`.
///
/// Measured on the animation frame after the element mounts, then again on
/// every window `resize` or `scroll`.
pub fn use_content_size(target: NodeRef<html::Div>) -> ReadSignal<Size> {
    let (size, set_size) = signal(Size::default());

    let measure = move || {
        if let Some(element) = target.get_untracked() {
            set_size.set(dom::element_size(&element));
        }
    };

    Effect::new(move |_| {
        if target.get().is_some() {
            request_animation_frame(measure);
        }
    });

    let resize = window_event_listener(ev::resize, move |_| measure());
    let scroll = window_event_listener(ev::scroll, move |_| measure());
    on_cleanup(move || {
        resize.remove();
        scroll.remove();
    });

    size
}
