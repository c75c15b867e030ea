//! Mapping recognized items onto catalog cards and slots.
//!
//! The matcher never touches a live board. It builds a complete
//! replacement layout (`ImportPlan`) which the board commits in one step.

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

use super::item::RecognizedItem;
use crate::board::slot::{empty_slots, SlotCard, Slots};
use crate::cards::{CardCatalog, CardId, CardSide};

/// Why an item did not end up on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No catalog card carries the item's label.
    Unmatched,
    /// No explicit position and no empty slot left.
    NoEmptySlot,
    /// The card was already placed by an earlier item.
    DuplicateCard,
    /// Placed, then overwritten by a later item naming the same position.
    Displaced,
}

/// An item that was dropped, by position in the input list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub item: usize,
    pub label: Option<String>,
    pub reason: SkipReason,
}

/// A card the import placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacedItem {
    pub item: usize,
    pub slot: usize,
    pub card_id: CardId,
    pub side: CardSide,
}

/// Outcome of an import, item by item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub placed: Vec<PlacedItem>,
    pub skipped: SmallVec<[SkippedItem; 4]>,
}

impl ImportReport {
    /// Items dropped for lack of room; these are reported to the user.
    pub fn capacity_failures(&self) -> impl Iterator<Item = &SkippedItem> {
        self.skipped
            .iter()
            .filter(|s| s.reason == SkipReason::NoEmptySlot)
    }
}

/// A fully resolved replacement layout.
#[derive(Clone, Debug)]
pub struct ImportPlan {
    pub slots: Slots,
    /// Face choice recorded for every card the import placed.
    pub faces: FxHashMap<CardId, CardSide>,
    pub report: ImportReport,
}

/// Resolves recognized items against a catalog.
#[derive(Clone, Copy, Debug)]
pub struct ImportMatcher<'a> {
    catalog: &'a CardCatalog,
}

impl<'a> ImportMatcher<'a> {
    #[must_use]
    pub fn new(catalog: &'a CardCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve every item, in order, into a new layout.
    #[must_use]
    pub fn plan(&self, items: &[RecognizedItem]) -> ImportPlan {
        let mut slots = empty_slots();
        let mut faces = FxHashMap::default();
        let mut report = ImportReport::default();

        for (item_index, item) in items.iter().enumerate() {
            let skip = |reason| SkippedItem {
                item: item_index,
                label: item.label.clone(),
                reason,
            };

            let Some((card, matched_side)) = item
                .label
                .as_deref()
                .and_then(|label| self.catalog.find_by_label(label))
            else {
                tracing::debug!(item = item_index, label = ?item.label, "no catalog match");
                report.skipped.push(skip(SkipReason::Unmatched));
                continue;
            };

            if slots.iter().flatten().any(|s| s.card_id == card.id) {
                tracing::debug!(item = item_index, card = %card.id, "card already imported");
                report.skipped.push(skip(SkipReason::DuplicateCard));
                continue;
            }

            let Some(slot) = item
                .slot_index()
                .or_else(|| slots.iter().position(Option::is_none))
            else {
                tracing::warn!(item = item_index, card = %card.id, "no empty slot for imported card");
                report.skipped.push(skip(SkipReason::NoEmptySlot));
                continue;
            };

            if let Some(previous) = slots[slot].take() {
                // Later items win an explicit position; the earlier card goes back to the deck.
                if let Some(at) = report.placed.iter().position(|p| p.card_id == previous.card_id) {
                    let displaced = report.placed.remove(at);
                    report.skipped.push(SkippedItem {
                        item: displaced.item,
                        label: items[displaced.item].label.clone(),
                        reason: SkipReason::Displaced,
                    });
                }
            }

            let side = match item.side {
                Some(CardSide::Back) => CardSide::Back,
                _ => matched_side,
            };
            slots[slot] = Some(SlotCard::from_definition(card, side, slot));
            faces.insert(card.id.clone(), side);
            report.placed.push(PlacedItem {
                item: item_index,
                slot,
                card_id: card.id.clone(),
                side,
            });
        }

        ImportPlan { slots, faces, report }
    }
}
