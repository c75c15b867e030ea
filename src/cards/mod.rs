//! Card system: faces, definitions and the catalog.
//!
//! ## Key Types
//!
//! - `CardColor`, `CardSide`: small copyable enums
//! - `CardFace`: one printed side (label, value, color, artwork)
//! - `CardId`: identifier for card definitions
//! - `CardDefinition`: a front/back pair
//! - `CardCatalog`: ordered, session-immutable definition lookup

pub mod builtin;
pub mod catalog;
pub mod definition;
pub mod face;

pub use builtin::builtin_definitions;
pub use catalog::CardCatalog;
pub use definition::{CardDefinition, CardId};
pub use face::{CardColor, CardFace, CardSide};
