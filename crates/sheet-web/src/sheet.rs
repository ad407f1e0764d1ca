//! Draggable bottom sheet component.
//!
//! The component owns a [`SheetController`] and feeds it everything the
//! browser produces: viewport and content measurements, pointer samples from
//! the header, the host's `open` flag and animation frames. After every
//! controller call the reactive mirrors (`offset`, `settled`, ...) are
//! refreshed from the controller, which stays the single owner of the offset.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use sheet_core::config::pointer::DRAG_DELAY_MS;
use sheet_core::config::OFFSET_TOP;
use sheet_core::{
    DragFrame, DragRecognizer, PointerSample, SettledThreshold, SheetConfig, SheetController,
    SheetError, SheetEvent,
};
use wasm_bindgen::JsCast;

use crate::config::{BACKDROP_OPACITY, SHADOW_PX_PER_LEVEL};
use crate::dom;
use crate::frame::{FramePump, FrameStep};
use crate::header::SheetHeader;
use crate::hooks::{use_content_size, use_viewport};

stylance::import_crate_style!(css, "src/sheet.module.css");

/// Reactive copy of the controller state used by the view.
#[derive(Clone, Copy)]
struct SheetView {
    offset: RwSignal<f64>,
    shown: RwSignal<bool>,
    settled: RwSignal<SettledThreshold>,
    draggable: RwSignal<bool>,
}

impl SheetView {
    fn new(controller: &SheetController) -> Self {
        Self {
            offset: RwSignal::new(controller.offset()),
            shown: RwSignal::new(controller.is_shown()),
            settled: RwSignal::new(controller.settled()),
            draggable: RwSignal::new(controller.is_draggable()),
        }
    }

    fn sync(&self, controller: &SheetController) {
        self.offset.set(controller.offset());
        if self.shown.get_untracked() != controller.is_shown() {
            self.shown.set(controller.is_shown());
        }
        if self.settled.get_untracked() != controller.settled() {
            self.settled.set(controller.settled());
        }
        if self.draggable.get_untracked() != controller.is_draggable() {
            self.draggable.set(controller.is_draggable());
        }
    }
}

/// Bottom sheet that slides up over the page.
///
/// # Props
/// - `open`: host-controlled open flag; its value at mount replaces
///   `config.open`
/// - `config`: thresholds, header and styling
/// - `on_close`: invoked once per completed close cycle, or when the sheet is
///   unmounted while shown
#[component]
pub fn BottomSheet(
    #[prop(into)] open: Signal<bool>,
    #[prop(optional)] config: SheetConfig,
    #[prop(optional)] on_close: Option<Callback<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    let header = config.header.clone();
    let notch_width = config.notch_width;
    let elevation = config.elevation;
    let modal_class = config.modal_class.clone().unwrap_or_default();
    let paper_class = config.paper_class.clone().unwrap_or_default();

    let config = SheetConfig {
        open: open.get_untracked(),
        ..config
    };
    let controller = StoredValue::new_local(SheetController::new(config));
    let recognizer = StoredValue::new_local(DragRecognizer::new());
    let delay = StoredValue::new_local(None::<Timeout>);
    let pump = StoredValue::new_local(FramePump::new());
    let state = controller.with_value(SheetView::new);

    let viewport = use_viewport();
    let paper_ref = NodeRef::<html::Div>::new();
    let content_size = use_content_size(paper_ref);

    let emit = move |event: Option<SheetEvent>| match event {
        Some(SheetEvent::Closed) => {
            if let Some(on_close) = on_close {
                on_close.run(());
            }
        }
        Some(SheetEvent::Opened) => log::debug!("sheet opened"),
        None => {}
    };

    // Runs one controller operation, mirrors the result and keeps frames
    // coming while the spring is moving.
    let apply = move |op: &dyn Fn(&mut SheetController) -> Result<(), SheetError>| {
        let result = controller.try_update_value(|c| {
            let result = op(c);
            state.sync(c);
            (result, c.needs_frame())
        });
        match result {
            Some((Err(err), _)) => log::warn!("sheet: {err}"),
            Some((Ok(()), true)) => start_frames(controller, pump, state, emit),
            _ => {}
        }
    };

    // Viewport changes rescale the offset.
    Effect::new(move |_| {
        let size = viewport.get();
        apply(&|c: &mut SheetController| c.resize(size));
    });

    Effect::new(move |_| {
        let size = content_size.get();
        controller.update_value(|c| c.set_content_size(size));
    });

    // Host open flag.
    Effect::new(move |_| {
        let open = open.get();
        apply(&|c: &mut SheetController| c.set_open(open));
        if open && paper_ref.get_untracked().is_some() {
            request_animation_frame(move || apply(&SheetController::surface_ready));
        }
    });

    // The surface is mounted: animate in on the next frame, once it has been
    // laid out.
    Effect::new(move |_| {
        if paper_ref.get().is_some() {
            request_animation_frame(move || apply(&SheetController::surface_ready));
        }
    });

    on_cleanup(move || {
        pump.with_value(FramePump::stop);
        let event = controller.try_update_value(|c| c.unmount()).flatten();
        emit(event);
    });

    // Pointer input on the header region.
    let dispatch = move |frame: Option<DragFrame>| {
        let Some(frame) = frame else {
            return;
        };
        let response = controller.try_update_value(|c| {
            let response = c.drag(&frame);
            state.sync(c);
            (response, c.needs_frame())
        });
        match response {
            Some((Ok(response), needs_frame)) => {
                if response.veto {
                    recognizer.update_value(DragRecognizer::cancel);
                }
                if needs_frame {
                    start_frames(controller, pump, state, emit);
                }
            }
            Some((Err(err), _)) => log::warn!("sheet drag: {err}"),
            None => {}
        }
    };

    let current_offset = move || controller.with_value(SheetController::offset);

    let on_pointer_down = move |ev: ev::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        if let Some(target) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        {
            dom::capture_pointer(&target, ev.pointer_id());
        }
        let sample = PointerSample::new(ev.client_y() as f64, dom::now_ms());
        recognizer.update_value(|r| r.press(sample));

        let timeout = Timeout::new(DRAG_DELAY_MS as u32, move || {
            let frame = recognizer
                .try_update_value(|r| r.poll(dom::now_ms(), current_offset()))
                .flatten();
            dispatch(frame);
        });
        delay.set_value(Some(timeout));
    };

    let on_pointer_move = move |ev: ev::PointerEvent| {
        if !ev.is_primary() || !recognizer.with_value(DragRecognizer::is_pressed) {
            return;
        }
        let sample = PointerSample::new(ev.client_y() as f64, dom::now_ms());
        let frame = recognizer
            .try_update_value(|r| r.moved(sample, current_offset()))
            .flatten();
        dispatch(frame);
    };

    let on_pointer_up = move |ev: ev::PointerEvent| {
        if !ev.is_primary() {
            return;
        }
        delay.set_value(None);
        let sample = PointerSample::new(ev.client_y() as f64, dom::now_ms());
        let frame = recognizer.try_update_value(|r| r.release(sample)).flatten();
        dispatch(frame);
    };

    let on_pointer_cancel = move |_: ev::PointerEvent| {
        delay.set_value(None);
        let frame = recognizer.try_update_value(DragRecognizer::interrupt).flatten();
        dispatch(frame);
    };

    // Header actions.
    let on_toggle = Callback::new(move |_| apply(&SheetController::toggle_expand));
    let on_draggable = Callback::new(move |_| {
        apply(&|c: &mut SheetController| {
            c.toggle_draggable();
            Ok(())
        })
    });
    let on_header_close = Callback::new(move |_| apply(&SheetController::close));

    let expanded = Signal::derive(move || state.settled.get() == SettledThreshold::Full);
    let draggable = Signal::derive(move || state.draggable.get());

    let wrapper_style = move || {
        let height = viewport.get().height;
        format!(
            "top: {height}px; height: {height}px; padding-top: {OFFSET_TOP}px; transform: translateY({}px);",
            state.offset.get()
        )
    };

    let backdrop_style = move || {
        let height = viewport.get().height;
        let fraction = if height > 0.0 {
            (-state.offset.get() / height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        format!("opacity: {};", fraction * BACKDROP_OPACITY)
    };

    let shadow = f64::from(elevation) * SHADOW_PX_PER_LEVEL;
    let paper_style = format!("box-shadow: 0 -{}px {}px rgba(0, 0, 0, 0.25);", shadow / 2.0, shadow);

    view! {
        <Show when=move || state.shown.get()>
            <div class=format!("{} {}", css::modal, modal_class) role="dialog" aria-modal="true">
                <div
                    class=css::backdrop
                    style=backdrop_style
                    on:click=move |_| apply(&SheetController::close)
                ></div>
                <div class=css::wrapper style=wrapper_style>
                    <div
                        node_ref=paper_ref
                        class=format!("{} {}", css::paper, paper_class)
                        style=paper_style.clone()
                    >
                        <div
                            class=css::dragRegion
                            on:pointerdown=on_pointer_down
                            on:pointermove=on_pointer_move
                            on:pointerup=on_pointer_up
                            on:pointercancel=on_pointer_cancel
                        >
                            <SheetHeader
                                header=header.clone()
                                notch_width=notch_width
                                expanded=expanded
                                draggable=draggable
                                on_toggle=on_toggle
                                on_draggable=on_draggable
                                on_close=on_header_close
                            />
                        </div>
                        <div class=css::content>{children()}</div>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Starts the frame loop driving the controller's spring.
fn start_frames(
    controller: StoredValue<SheetController, LocalStorage>,
    pump: StoredValue<FramePump, LocalStorage>,
    state: SheetView,
    emit: impl Fn(Option<SheetEvent>) + Copy + 'static,
) {
    let step: FrameStep = Rc::new(move |dt| {
        let Some((event, more)) = controller.try_update_value(|c| {
            let event = c.advance(dt);
            state.sync(c);
            (event, c.needs_frame())
        }) else {
            return false;
        };
        emit(event);
        more
    });
    pump.with_value(|p| p.start(step));
}
