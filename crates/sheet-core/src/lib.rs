//! Interaction core for a draggable bottom sheet.
//!
//! This crate provides:
//! - [`Thresholds`] and [`SnapOffsets`] for the snap positions of a viewport
//! - [`SpringDriver`], the single owner of the animated offset
//! - [`DragRecognizer`] and [`GestureInterpreter`] for pointer drags
//! - [`settle()`] for deriving the [`SettledThreshold`] from an offset
//! - [`SheetController`] sequencing open, close, drags and resizes
//!
//! Nothing here touches the DOM; the host feeds measurements, pointer samples
//! and frame times in.

pub mod config;
mod controller;
pub mod error;
mod gesture;
mod recognizer;
mod settle;
mod spring;
mod thresholds;
mod viewport;

pub use config::{HeaderAction, HeaderConfig, SheetConfig};
pub use controller::{DragResponse, OpenStage, SheetController, SheetEvent, SheetPhase};
pub use error::SheetError;
pub use gesture::{
    Direction, GestureContext, GestureDecision, GestureInterpreter, GesturePhase, ResnapBranch,
    should_close,
};
pub use recognizer::{DragFrame, DragRecognizer, PointerSample, rubberband};
pub use settle::{Anchor, SettledThreshold, anchors, settle};
pub use spring::{AnimationId, Motion, Release, SpringConfig, SpringDriver, SpringProfile};
pub use thresholds::{MiddleThreshold, SnapOffsets, Thresholds};
pub use viewport::{Size, ViewportSnapshot, ViewportTracker, rescale_offset, rescale_ratio};
