//! The placement board: 12 slots in a 3×4 grid.
//!
//! ## Key Types
//!
//! - `Board`: owns the layout and the used-card set; every mutation goes here
//! - `SlotCard`: a card face snapshot sitting in a slot
//! - `SlotPosition`: row/column of a slot index
//! - `BoardSummary`: the outbound view emitted after each change

pub mod engine;
pub mod slot;
pub mod summary;

pub use engine::{Board, ChangeListener, DeckEntry};
pub use slot::{empty_slots, SlotCard, SlotPosition, Slots, COLUMNS, ROWS, SLOT_COUNT};
pub use summary::{BoardSummary, SlotDescriptor};
