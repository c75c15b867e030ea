//! The outbound board summary.
//!
//! `BoardSummary` is the only view of the board the embedding application
//! reads. Its JSON form uses camelCase keys (`cardId`, `slotIndex`,
//! `scoreText`, `usedCount`).

use serde::{Deserialize, Serialize};

use super::slot::{SlotCard, SlotPosition};
use crate::cards::{CardColor, CardId, CardSide};
use crate::scoring::{self, ColorScores, LabelLocale};

/// A filled slot as reported to the embedding application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDescriptor {
    pub card_id: CardId,
    pub side: CardSide,
    pub title: String,
    pub english: String,
    pub value: u32,
    pub color: CardColor,
    pub slot_index: usize,
}

impl From<&SlotCard> for SlotDescriptor {
    fn from(card: &SlotCard) -> Self {
        Self {
            card_id: card.card_id.clone(),
            side: card.side,
            title: card.face.title.clone(),
            english: card.face.english.clone(),
            value: card.face.value,
            color: card.face.color,
            slot_index: card.slot_index,
        }
    }
}

impl SlotDescriptor {
    /// "Row 1, column 2", 1-based.
    #[must_use]
    pub fn position_label(&self) -> String {
        match SlotPosition::from_index(self.slot_index) {
            Some(pos) => format!("Row {}, column {}", pos.row + 1, pos.col + 1),
            None => format!("Slot {}", self.slot_index + 1),
        }
    }

    /// One human readable line, e.g.
    /// `Row 1, column 2 (slot 2): Critical (front/yellow, value 3)`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} (slot {}): {} ({}/{}, value {})",
            self.position_label(),
            self.slot_index + 1,
            self.title,
            self.side,
            self.color,
            self.value
        )
    }
}

/// Snapshot of the board emitted after every mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    /// Twelve entries, `None` for empty slots.
    pub layout: Vec<Option<SlotDescriptor>>,
    pub scores: ColorScores,
    pub score_text: String,
    pub complete: bool,
    pub used_count: usize,
}

impl BoardSummary {
    /// Build a summary from a layout.
    #[must_use]
    pub fn from_slots(slots: &[Option<SlotCard>], locale: LabelLocale) -> Self {
        let layout: Vec<Option<SlotDescriptor>> =
            slots.iter().map(|s| s.as_ref().map(SlotDescriptor::from)).collect();
        let used_count = layout.iter().filter(|s| s.is_some()).count();
        let scores = scoring::score(slots);

        Self {
            complete: used_count == layout.len(),
            used_count,
            score_text: scoring::score_text(&scores, locale),
            scores,
            layout,
        }
    }

    /// One line per slot, empty slots included.
    #[must_use]
    pub fn layout_lines(&self) -> Vec<String> {
        self.layout
            .iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(desc) => desc.describe(),
                None => format!("Slot {}: empty", index + 1),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::slot::empty_slots;
    use crate::cards::{CardCatalog, CardId};

    fn placed(id: &str, side: CardSide, index: usize) -> SlotCard {
        let catalog = CardCatalog::builtin();
        let card = catalog.get(&CardId::new(id)).unwrap();
        SlotCard::from_definition(card, side, index)
    }

    #[test]
    fn test_empty_summary() {
        let summary = BoardSummary::from_slots(&empty_slots(), LabelLocale::English);
        assert_eq!(summary.layout.len(), 12);
        assert_eq!(summary.used_count, 0);
        assert!(!summary.complete);
        assert_eq!(
            summary.score_text,
            "red: 0 (general) | blue: 0 (general) | yellow: 0 (general) | green: 0 (general)"
        );
    }

    #[test]
    fn test_describe_lines() {
        let mut slots = empty_slots();
        slots[1] = Some(placed("card_08", CardSide::Front, 1));
        let summary = BoardSummary::from_slots(&slots, LabelLocale::English);

        let lines = summary.layout_lines();
        assert_eq!(lines[0], "Slot 1: empty");
        assert_eq!(lines[1], "Row 1, column 2 (slot 2): 批判性强 (front/yellow, value 3)");
        assert_eq!(summary.scores.yellow, 5);
    }

    #[test]
    fn test_json_contract() {
        let mut slots = empty_slots();
        slots[4] = Some(placed("card_01", CardSide::Back, 4));
        let summary = BoardSummary::from_slots(&slots, LabelLocale::English);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["usedCount"], 1);
        assert_eq!(json["complete"], false);
        assert!(json["layout"][0].is_null());
        assert_eq!(json["layout"][4]["cardId"], "card_01");
        assert_eq!(json["layout"][4]["side"], "back");
        assert_eq!(json["layout"][4]["slotIndex"], 4);
        assert_eq!(json["scores"]["red"], 2);
        assert!(json["scoreText"].as_str().unwrap().starts_with("red: 2"));
    }
}
