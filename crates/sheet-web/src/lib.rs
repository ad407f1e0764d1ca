//! Leptos render surface for the bottom sheet.
//!
//! This crate provides:
//! - [`BottomSheet`], the component wiring browser input to a
//!   [`SheetController`](sheet_core::SheetController)
//! - [`DefaultHeader`] and [`ActionsHeader`] header collaborators
//! - [`use_viewport`] and [`use_content_size`] measurement hooks
//! - [`FramePump`], the `requestAnimationFrame` loop

mod config;
mod dom;
mod frame;
mod header;
mod hooks;
mod icons;
mod sheet;

pub use frame::{FramePump, FrameStep};
pub use header::{ActionsHeader, DefaultHeader, SheetHeader};
pub use hooks::{use_content_size, use_viewport};
pub use sheet::BottomSheet;
