//! Click, drag and touch handling for the board.
//!
//! ## Key Types
//!
//! - `InteractionController`: turns gestures into board operations
//! - `InteractionState`: the one in-flight gesture, owned by the caller
//! - `SlotGeometry`, `hit_test`: headless point-to-slot resolution

pub mod controller;
pub mod geometry;

pub use controller::{DragSource, Gesture, InteractionController, InteractionOutcome, InteractionState};
pub use geometry::{hit_test, Point, Rect, SlotGeometry};
