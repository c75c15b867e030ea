//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable front/back pair of a card.
//! What is currently showing on the board lives in `SlotCard`, which is
//! always rebuilt from the definition rather than edited.

use serde::{Deserialize, Serialize};

use super::face::{CardFace, CardSide};

/// Unique identifier for a card definition.
///
/// Catalog ids are stable text keys such as `card_01`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Static card definition: a double-sided card.
///
/// ## Example
///
/// ```
/// use cardset_board::cards::{CardColor, CardDefinition, CardFace, CardSide};
///
/// let card = CardDefinition::new(
///     "card_01",
///     CardFace::new("Pessimistic", "Frustrated", 3, CardColor::Blue),
///     CardFace::new("Optimistic", "Optimistic", 1, CardColor::Red),
/// );
///
/// assert_eq!(card.face(CardSide::Back).value, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Face shown by default.
    pub front: CardFace,

    /// Face shown after a flip.
    pub back: CardFace,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: impl Into<String>, front: CardFace, back: CardFace) -> Self {
        Self {
            id: CardId::new(id),
            front,
            back,
        }
    }

    /// Get the face for a side.
    #[must_use]
    pub fn face(&self, side: CardSide) -> &CardFace {
        match side {
            CardSide::Front => &self.front,
            CardSide::Back => &self.back,
        }
    }

    /// Exact match against the front title, front English label or the id.
    #[must_use]
    pub fn front_matches(&self, label: &str) -> bool {
        self.front.title == label || self.front.english == label || self.id.as_str() == label
    }

    /// Exact match against the back title, back English label or the id.
    #[must_use]
    pub fn back_matches(&self, label: &str) -> bool {
        self.back.title == label || self.back.english == label || self.id.as_str() == label
    }
}
