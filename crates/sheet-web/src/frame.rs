//! `requestAnimationFrame` loop.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::request_animation_frame;

use crate::dom;

/// Per-frame callback: receives the elapsed seconds since the previous frame
/// and returns whether another frame is needed.
pub type FrameStep = Rc<dyn Fn(f64) -> bool>;

/// Runs a [`FrameStep`] once per animation frame until it reports idle.
#[derive(Clone, Default)]
pub struct FramePump {
    running: Rc<Cell<bool>>,
}

impl FramePump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Starts the loop. Does nothing if it is already running.
    pub fn start(&self, step: FrameStep) {
        if self.running.replace(true) {
            return;
        }
        schedule(Rc::clone(&self.running), step, dom::now_ms());
    }

    /// Stops the loop before its next frame.
    pub fn stop(&self) {
        self.running.set(false);
    }
}

fn schedule(running: Rc<Cell<bool>>, step: FrameStep, last_ms: f64) {
    request_animation_frame(move || {
        if !running.get() {
            return;
        }
        let now = dom::now_ms();
        let dt = ((now - last_ms) / 1000.0).max(0.0);
        if step(dt) {
            schedule(running, step, now);
        } else {
            running.set(false);
        }
    });
}
