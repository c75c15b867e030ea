//! Card faces: the printed side of a card.
//!
//! Every card has two faces. A face carries the label shown to the player,
//! a small point value and one of four color categories used by scoring.

use serde::{Deserialize, Serialize};

/// Color category of a face. Scores are totalled per color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Blue,
    Yellow,
    Green,
}

impl CardColor {
    /// All colors in summary order.
    pub const ALL: [CardColor; 4] = [Self::Red, Self::Blue, Self::Yellow, Self::Green];

    /// Lowercase name, as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which face of a card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSide {
    #[default]
    Front,
    Back,
}

impl CardSide {
    /// The other side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

impl std::fmt::Display for CardSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    /// Primary label.
    pub title: String,

    /// Secondary (English) label.
    pub english: String,

    /// Base score of the face.
    pub value: u32,

    /// Color category the value is scored under.
    pub color: CardColor,

    /// Artwork reference, if the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CardFace {
    /// Create a face without artwork.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        english: impl Into<String>,
        value: u32,
        color: CardColor,
    ) -> Self {
        Self {
            title: title.into(),
            english: english.into(),
            value,
            color,
            image: None,
        }
    }

    /// Attach an artwork reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
