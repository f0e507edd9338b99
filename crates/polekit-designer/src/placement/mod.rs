//! Pointer interaction for the 2D view: pan, zoom, selection, and placing
//! new poles on anchors.

mod controller;
mod input;

pub use controller::{
    CanvasFrame, CursorMode, PlacementController, PlacementEvent, PlacementState,
};
pub use input::{starts_pan, InputEvent, Modifiers, PointerButton};
