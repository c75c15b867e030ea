//! Seeding the board from an externally recognized card list.
//!
//! ## Key Types
//!
//! - `RawRecognizedItem`: loosely typed entry as sent by the recognizer
//! - `RecognizedItem`: validated entry (label, 1-based position, side)
//! - `ImportMatcher`: resolves items to cards and slots
//! - `ImportPlan` / `ImportReport`: the replacement layout and what was dropped
//!
//! Unmatched items are noise, not errors: they are dropped and only
//! logged at `debug`.

pub mod item;
pub mod matcher;
pub mod response;

pub use item::{RawPosition, RawRecognizedItem, RecognizedItem};
pub use matcher::{ImportMatcher, ImportPlan, ImportReport, PlacedItem, SkipReason, SkippedItem};
pub use response::{parse_response, strip_code_fence};
