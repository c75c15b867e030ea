//! Error types for the placement board.
//!
//! Each collaborator boundary has its own error enum. `BoardError` wraps
//! them for callers that want a single type.
//!
//! ## Taxonomy
//!
//! - Capacity: `PlacementError::BoardFull`, reported to the user.
//! - Lookup: invalid slot indices on flip/swap are not errors at all; the
//!   operations return `false`.
//! - Resource: `ExportError`, fatal for one export only.
//! - Degraded fidelity: `ArtworkError`, always recovered by the exporter.
//! - Upstream: `CatalogError`, `RecognitionError`.

use thiserror::Error;

use crate::cards::CardId;

/// Result type alias using `BoardError`.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors from placing a card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("card {0} is not in the catalog")]
    UnknownCard(CardId),

    #[error("card {0} is already on the board")]
    AlreadyPlaced(CardId),

    #[error("no empty slot left for card {0}")]
    BoardFull(CardId),

    #[error("slot {0} is already occupied")]
    SlotOccupied(usize),

    #[error("slot index {0} is out of range")]
    InvalidSlot(usize),
}

impl PlacementError {
    /// Capacity failures are the only placement errors shown to the user.
    #[must_use]
    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::BoardFull(_))
    }
}

/// Errors from obtaining the card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate card id {0} in catalog")]
    DuplicateId(CardId),

    #[error("catalog is empty")]
    Empty,

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog fetch timed out after {0} ms")]
    Timeout(u64),
}

/// Errors from interpreting a recognition service response.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("recognition response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("recognition response has no card list")]
    MissingCards,
}

/// Errors from loading one piece of artwork.
///
/// Never surfaced by an export; the slot falls back to a tinted rectangle.
#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("artwork {0} not found")]
    NotFound(String),

    #[error("failed to read artwork: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode artwork: {0}")]
    Decode(#[from] image::ImageError),

    #[error("artwork request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("artwork load timed out after {0} ms")]
    Timeout(u64),
}

/// Errors that abort an image export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create a {width}x{height} canvas")]
    Canvas { width: u64, height: u64 },

    #[error("failed to encode exported image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Umbrella error for the crate.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to read config: {0}")]
    Config(#[from] std::io::Error),

    #[error("config is not valid JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("board invariant violated: {0}")]
    Invariant(String),
}
