//! Browser tests for the sheet surface.
//!
//! Run with `wasm-pack test --headless --firefox crates/sheet-web`.

#![cfg(target_arch = "wasm32")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use leptos::prelude::*;
use sheet_core::SheetConfig;
use sheet_web::{BottomSheet, FramePump};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> web_sys::HtmlElement {
    let document = document();
    let element = document
        .create_element("div")
        .unwrap()
        .unchecked_into::<web_sys::HtmlElement>();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn open_config(source: &str) -> SheetConfig {
    SheetConfig {
        open: true,
        ..SheetConfig::from_toml_str(source).unwrap()
    }
}

#[wasm_bindgen_test]
fn test_closed_sheet_renders_nothing() {
    let root = container();
    let _handle = leptos::mount::mount_to(root.clone(), || {
        view! { <BottomSheet open=false><p>"content"</p></BottomSheet> }
    });
    assert!(root.query_selector("[role=dialog]").unwrap().is_none());
}

#[wasm_bindgen_test]
fn test_open_sheet_renders_configured_actions() {
    let root = container();
    let config = open_config(
        r#"header = { type = "actions", actions = ["toggle", "close"] }"#,
    );
    let _handle = leptos::mount::mount_to(root.clone(), move || {
        view! { <BottomSheet open=true config=config.clone()><p>"content"</p></BottomSheet> }
    });

    assert!(root.query_selector("[role=dialog]").unwrap().is_some());
    assert!(root.query_selector("[aria-label='Close sheet']").unwrap().is_some());
    assert!(root
        .query_selector("[aria-label='Toggle expanded sheet']")
        .unwrap()
        .is_some());
    assert!(root
        .query_selector("[aria-label='Toggle free dragging']")
        .unwrap()
        .is_none());
}

#[wasm_bindgen_test]
fn test_default_header_renders_notch_only() {
    let root = container();
    let config = open_config("notch_width = 40");
    let _handle = leptos::mount::mount_to(root.clone(), move || {
        view! { <BottomSheet open=true config=config.clone()><p>"content"</p></BottomSheet> }
    });

    assert!(root.query_selector("button").unwrap().is_none());
    assert!(root.query_selector("[style*='40vw']").unwrap().is_some());
}

#[wasm_bindgen_test]
fn test_unmount_while_shown_reports_close_once() {
    let closes = Arc::new(AtomicUsize::new(0));
    let root = container();
    let config = open_config("");
    let counter = Arc::clone(&closes);
    let handle = leptos::mount::mount_to(root, move || {
        let counter = Arc::clone(&counter);
        let on_close = Callback::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        view! {
            <BottomSheet open=true config=config.clone() on_close=on_close>
                <p>"content"</p>
            </BottomSheet>
        }
    });
    drop(handle);
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[wasm_bindgen_test]
fn test_closed_prop_overrides_config_open() {
    let closes = Arc::new(AtomicUsize::new(0));
    let root = container();
    let config = open_config("");
    let counter = Arc::clone(&closes);
    let handle = leptos::mount::mount_to(root.clone(), move || {
        let counter = Arc::clone(&counter);
        let on_close = Callback::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        view! {
            <BottomSheet open=false config=config.clone() on_close=on_close>
                <p>"content"</p>
            </BottomSheet>
        }
    });
    assert!(root.query_selector("[role=dialog]").unwrap().is_none());
    drop(handle);
    assert_eq!(closes.load(Ordering::SeqCst), 0);
}

#[wasm_bindgen_test]
fn test_frame_pump_stops_cleanly() {
    let pump = FramePump::new();
    assert!(!pump.is_running());
    pump.stop();
    assert!(!pump.is_running());
}
