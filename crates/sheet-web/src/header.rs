//! Sheet headers.
//!
//! [`DefaultHeader`] is a passive notch; [`ActionsHeader`] renders the
//! controls listed in [`HeaderConfig::Actions`].

use leptos::prelude::*;
use leptos_icons::Icon;
use sheet_core::{HeaderAction, HeaderConfig};

use crate::icons as ic;

stylance::import_crate_style!(css, "src/sheet.module.css");

/// Header selected by `header`.
#[component]
pub fn SheetHeader(
    header: HeaderConfig,
    notch_width: f64,
    #[prop(into)] expanded: Signal<bool>,
    #[prop(into)] draggable: Signal<bool>,
    on_toggle: Callback<()>,
    on_draggable: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    match header {
        HeaderConfig::Default => view! { <DefaultHeader notch_width=notch_width /> }.into_any(),
        actions @ HeaderConfig::Actions { .. } => view! {
            <ActionsHeader
                header=actions
                expanded=expanded
                draggable=draggable
                on_toggle=on_toggle
                on_draggable=on_draggable
                on_close=on_close
            />
        }
        .into_any(),
    }
}

/// Drag notch. `notch_width` is a percentage of the viewport width.
#[component]
pub fn DefaultHeader(#[prop(default = 25.0)] notch_width: f64) -> impl IntoView {
    view! {
        <div class=css::notchArea>
            <div class=css::notch style=format!("width: {notch_width}vw;")></div>
        </div>
    }
}

/// Action bar with any of expand toggle, drag-mode toggle and close.
#[component]
pub fn ActionsHeader(
    header: HeaderConfig,
    #[prop(into)] expanded: Signal<bool>,
    #[prop(into)] draggable: Signal<bool>,
    on_toggle: Callback<()>,
    on_draggable: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    // Buttons must not start a drag on the surrounding capture region.
    let keep_pointer = |ev: leptos::ev::PointerEvent| ev.stop_propagation();

    let toggle_class = move || {
        if expanded.get() {
            format!("{} {}", css::actionButton, css::expanded)
        } else {
            css::actionButton.to_string()
        }
    };

    let drag_class = move || {
        if draggable.get() {
            format!("{} {}", css::actionButton, css::selected)
        } else {
            css::actionButton.to_string()
        }
    };

    view! {
        <div class=css::actions>
            {header.has(HeaderAction::Toggle).then(|| view! {
                <button
                    class=toggle_class
                    disabled=move || draggable.get()
                    on:pointerdown=keep_pointer
                    on:click=move |_| on_toggle.run(())
                    title="Expand"
                    aria-label="Toggle expanded sheet"
                >
                    <Icon icon=ic::EXPAND />
                </button>
            })}
            {header.has(HeaderAction::Draggable).then(|| view! {
                <button
                    class=drag_class
                    aria-pressed=move || draggable.get().to_string()
                    on:pointerdown=keep_pointer
                    on:click=move |_| on_draggable.run(())
                    title="Drag mode"
                    aria-label="Toggle free dragging"
                >
                    <Icon icon=ic::DRAG_MODE />
                </button>
            })}
            <div class=css::spacer></div>
            {header.has(HeaderAction::Close).then(|| view! {
                <button
                    class=css::actionButton
                    on:pointerdown=keep_pointer
                    on:click=move |_| on_close.run(())
                    title="Close"
                    aria-label="Close sheet"
                >
                    <Icon icon=ic::CLOSE />
                </button>
            })}
        </div>
    }
}
