//! # cardset-board
//!
//! A 12-slot placement board for double-sided scored cards.
//!
//! ## Design Principles
//!
//! 1. **One Owner of Layout**: Only `Board` writes slots. Gestures and
//!    imports go through its operations; nothing else mutates layout.
//!
//! 2. **Faces From the Catalog**: A placed card's face is always a
//!    snapshot of its catalog definition, retaken on every flip.
//!
//! 3. **Degrade, Don't Abort**: A missing catalog gives an empty but usable
//!    board; a missing artwork gives a tinted slot, not a failed export.
//!
//! ## Architecture
//!
//! - **Explicit Gesture State**: the in-flight drag/touch lives in an
//!   `InteractionState` passed to the controller, never in globals.
//!
//! - **Atomic Import**: a recognized card list resolves into a complete
//!   replacement layout, committed in one step.
//!
//! - **Persistent Used Set**: `im::OrdSet` keeps board snapshots cheap to
//!   clone and iteration order deterministic.
//!
//! ## Modules
//!
//! - `cards`: Faces, definitions, the catalog and the built-in card set
//! - `catalog_source`: Fetching the catalog (file, HTTP, static)
//! - `board`: Slots, the placement engine and the outbound summary
//! - `scoring`: Positional color scoring and score labels
//! - `interaction`: Click, drag and touch handling with hit-testing
//! - `import`: Matching recognized cards onto the board
//! - `export`: Rendering the board to PNG
//! - `session`: Board plus catalog lifecycle
//! - `config`, `error`: Settings and error types

pub mod board;
pub mod cards;
pub mod catalog_source;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod interaction;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use crate::cards::{CardCatalog, CardColor, CardDefinition, CardFace, CardId, CardSide};

pub use crate::board::{
    Board, BoardSummary, ChangeListener, DeckEntry, SlotCard, SlotDescriptor, SlotPosition,
    SLOT_COUNT,
};

pub use crate::scoring::{score, score_text, ColorScores, LabelLocale, ScoreLabel};

pub use crate::interaction::{
    hit_test, DragSource, Gesture, InteractionController, InteractionOutcome, InteractionState,
    Point, Rect, SlotGeometry,
};

pub use crate::import::{
    parse_response, ImportMatcher, ImportReport, RawRecognizedItem, RecognizedItem, SkipReason,
};

pub use crate::export::{
    ArtworkResolver, ArtworkSource, ExportConfig, ExportOutput, FsArtworkSource,
    HttpArtworkSource, ImageExporter, MemoryArtworkSource, SlotRender,
};

pub use crate::catalog_source::{
    CatalogLoad, CatalogSource, HttpCatalog, JsonFileCatalog, StaticCatalog,
};

pub use crate::config::BoardConfig;
pub use crate::error::{
    ArtworkError, BoardError, CatalogError, ExportError, PlacementError, RecognitionError, Result,
};
pub use crate::session::{BoardSession, CatalogTicket};
