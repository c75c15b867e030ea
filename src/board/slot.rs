//! Slot positions and the cards placed in them.
//!
//! The board is a fixed 3-row by 4-column grid. Slots are numbered 0..11
//! in row-major order: `row = index / 4`, `col = index % 4`.

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardFace, CardId, CardSide};

/// Number of slots on the board.
pub const SLOT_COUNT: usize = 12;

/// Grid columns.
pub const COLUMNS: usize = 4;

/// Grid rows.
pub const ROWS: usize = 3;

/// The full layout: one optional card per slot.
pub type Slots = [Option<SlotCard>; SLOT_COUNT];

/// A layout with every slot empty.
#[must_use]
pub fn empty_slots() -> Slots {
    std::array::from_fn(|_| None)
}

/// Row/column of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotPosition {
    pub row: usize,
    pub col: usize,
}

impl SlotPosition {
    /// Position of a slot index, or `None` if out of range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < SLOT_COUNT {
            Some(Self {
                row: index / COLUMNS,
                col: index % COLUMNS,
            })
        } else {
            None
        }
    }

    /// Slot index of this position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row * COLUMNS + self.col
    }
}

/// A card as it sits in a slot.
///
/// The face fields are a snapshot of `CardDefinition[card_id][side]`, taken
/// when the card is placed or flipped. They are never edited directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCard {
    pub card_id: CardId,
    pub side: CardSide,
    pub slot_index: usize,
    #[serde(flatten)]
    pub face: CardFace,
}

impl SlotCard {
    /// Snapshot a definition's face into a slot.
    #[must_use]
    pub fn from_definition(card: &CardDefinition, side: CardSide, slot_index: usize) -> Self {
        Self {
            card_id: card.id.clone(),
            side,
            slot_index,
            face: card.face(side).clone(),
        }
    }

    /// Grid position of this card.
    #[must_use]
    pub fn position(&self) -> Option<SlotPosition> {
        SlotPosition::from_index(self.slot_index)
    }
}
