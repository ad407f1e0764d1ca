//! Demo page.
//!
//! A full-height page with a single button that opens the bottom sheet.

use leptos::prelude::*;
use sheet_web::BottomSheet;

use crate::config::{APP_NAME, sheet_config};

stylance::import_crate_style!(css, "src/app.module.css");

/// Number of filler rows rendered inside the sheet.
const SAMPLE_ROWS: usize = 30;

#[component]
pub fn App() -> impl IntoView {
    let open = RwSignal::new(false);

    let on_open = move |_| open.set(true);
    let on_close = Callback::new(move |_| {
        log::info!("sheet closed");
        open.set(false);
    });

    view! {
        <main class=css::page>
            <h1 class=css::title>{APP_NAME}</h1>
            <button class=css::openButton on:click=on_open>
                "Show BottomSheet Drawer"
            </button>

            <BottomSheet open=open config=sheet_config() on_close=on_close>
                <ul class=css::list>
                    {(1..=SAMPLE_ROWS)
                        .map(|row| view! { <li class=css::row>{format!("Item {row}")}</li> })
                        .collect_view()}
                </ul>
            </BottomSheet>
        </main>
    }
}
