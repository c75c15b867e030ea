//! Positional scoring of a layout.
//!
//! Each placed card scores its face value plus a row bonus (top row +2,
//! middle row +1, bottom row +0) toward its face's color. Empty slots
//! score nothing.
//!
//! ## Key Types
//!
//! - `ColorScores`: per-color totals
//! - `ScoreLabel`: qualitative band of a total
//! - `LabelLocale`: language of the rendered summary

pub mod label;

pub use label::{score_text, LabelLocale, ScoreLabel};

use serde::{Deserialize, Serialize};

use crate::board::slot::{SlotCard, SlotPosition};
use crate::cards::CardColor;

/// Plain-language statement of the scoring rule for downstream consumers.
pub const RULE_DESCRIPTION: &str = "The layout is 3 rows by 4 columns, numbered 1-12 from \
top-left to bottom-right. Each card scores its face value plus a row bonus: +2 in the first \
row, +1 in the second row, nothing in the third row. Scores are totalled per color.";

/// Per-color score totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScores {
    pub red: u32,
    pub blue: u32,
    pub yellow: u32,
    pub green: u32,
}

impl ColorScores {
    /// Total for one color.
    #[must_use]
    pub fn get(&self, color: CardColor) -> u32 {
        match color {
            CardColor::Red => self.red,
            CardColor::Blue => self.blue,
            CardColor::Yellow => self.yellow,
            CardColor::Green => self.green,
        }
    }

    fn add(&mut self, color: CardColor, points: u32) {
        let total = match color {
            CardColor::Red => &mut self.red,
            CardColor::Blue => &mut self.blue,
            CardColor::Yellow => &mut self.yellow,
            CardColor::Green => &mut self.green,
        };
        *total = total.saturating_add(points);
    }

    /// `(color, total)` pairs in summary order.
    pub fn iter(&self) -> impl Iterator<Item = (CardColor, u32)> + '_ {
        CardColor::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Row bonus for a slot index. Out-of-range indices get no bonus.
#[must_use]
pub fn row_bonus(index: usize) -> u32 {
    match SlotPosition::from_index(index).map(|p| p.row) {
        Some(0) => 2,
        Some(1) => 1,
        _ => 0,
    }
}

/// Score a layout. Position in the slice is the slot index.
#[must_use]
pub fn score(slots: &[Option<SlotCard>]) -> ColorScores {
    let mut scores = ColorScores::default();
    for (index, slot) in slots.iter().enumerate() {
        if let Some(card) = slot {
            scores.add(card.face.color, card.face.value.saturating_add(row_bonus(index)));
        }
    }
    scores
}
