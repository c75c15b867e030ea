//! The placement engine: the 12-slot layout and every operation on it.
//!
//! `Board` is the only owner of layout state. Gesture handling and import
//! both go through its operations; nothing else writes slots.
//!
//! ## Invariants
//!
//! After every operation:
//! 1. there are exactly 12 slots (enforced by the array type);
//! 2. a filled slot's `slot_index` is its position;
//! 3. `used` is exactly the set of card ids in the slots;
//! 4. a card id occupies at most one slot;
//! 5. the deck face choice is only visible for unplaced cards.
//!
//! `check_invariants` verifies these and every mutation debug-asserts it.

use std::sync::Arc;

use im::OrdSet;
use rustc_hash::FxHashMap;

use super::slot::{empty_slots, SlotCard, Slots, SLOT_COUNT};
use super::summary::BoardSummary;
use crate::cards::{CardCatalog, CardDefinition, CardId, CardSide};
use crate::error::{BoardError, PlacementError};
use crate::import::{ImportMatcher, ImportReport, RecognizedItem};
use crate::scoring::{self, ColorScores, LabelLocale};

/// Callback receiving the summary after each board mutation.
pub type ChangeListener = Arc<dyn Fn(&BoardSummary) + Send + Sync>;

/// An unplaced card as listed in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckEntry<'a> {
    pub card: &'a CardDefinition,
    /// Face currently shown in the deck.
    pub side: CardSide,
}

/// The placement board.
///
/// ## Usage
///
/// ```
/// use std::sync::Arc;
/// use cardset_board::board::Board;
/// use cardset_board::cards::{CardCatalog, CardId, CardSide};
///
/// let mut board = Board::new(Arc::new(CardCatalog::builtin()));
///
/// let slot = board.place_card(&CardId::new("card_08"), CardSide::Front).unwrap();
/// assert_eq!(slot, 0);
///
/// board.flip_slot(0);
/// assert_eq!(board.slot(0).unwrap().side, CardSide::Back);
/// assert_eq!(board.used_count(), 1);
/// ```
#[derive(Clone)]
pub struct Board {
    catalog: Arc<CardCatalog>,
    slots: Slots,
    used: OrdSet<CardId>,
    deck_faces: FxHashMap<CardId, CardSide>,
    locale: LabelLocale,
    listeners: Vec<ChangeListener>,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("catalog_len", &self.catalog.len())
            .field("slots", &self.slots)
            .field("used", &self.used)
            .field("locale", &self.locale)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Create an empty board over a catalog.
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>) -> Self {
        let deck_faces = front_faces(&catalog);
        Self {
            catalog,
            slots: empty_slots(),
            used: OrdSet::new(),
            deck_faces,
            locale: LabelLocale::default(),
            listeners: Vec::new(),
        }
    }

    /// A board with no catalog yet. Slots are all empty and usable.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Arc::new(CardCatalog::new()))
    }

    /// Set the locale of the rendered score text.
    #[must_use]
    pub fn with_locale(mut self, locale: LabelLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Register a listener for change summaries.
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    // === Queries ===

    #[must_use]
    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn locale(&self) -> LabelLocale {
        self.locale
    }

    /// The whole layout.
    #[must_use]
    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// The card in a slot, if any. Out-of-range indices are empty.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&SlotCard> {
        self.slots.get(index)?.as_ref()
    }

    /// Ids of all placed cards, in id order.
    #[must_use]
    pub fn used_card_ids(&self) -> &OrdSet<CardId> {
        &self.used
    }

    #[must_use]
    pub fn is_used(&self, card_id: &CardId) -> bool {
        self.used.contains(card_id)
    }

    #[must_use]
    pub fn used_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.used_count() == SLOT_COUNT
    }

    /// Face shown in the deck for an unplaced card.
    ///
    /// `None` for placed cards and cards not in the catalog.
    #[must_use]
    pub fn deck_face(&self, card_id: &CardId) -> Option<CardSide> {
        if self.is_used(card_id) || !self.catalog.contains(card_id) {
            return None;
        }
        Some(self.deck_faces.get(card_id).copied().unwrap_or_default())
    }

    /// Unplaced cards in display order, with the face each one shows.
    #[must_use]
    pub fn deck(&self) -> Vec<DeckEntry<'_>> {
        self.catalog
            .iter()
            .filter(|card| !self.is_used(&card.id))
            .map(|card| DeckEntry {
                card,
                side: self.deck_faces.get(&card.id).copied().unwrap_or_default(),
            })
            .collect()
    }

    #[must_use]
    pub fn scores(&self) -> ColorScores {
        scoring::score(&self.slots)
    }

    #[must_use]
    pub fn score_text(&self) -> String {
        scoring::score_text(&self.scores(), self.locale)
    }

    /// The outbound summary of the current layout.
    #[must_use]
    pub fn summary(&self) -> BoardSummary {
        BoardSummary::from_slots(&self.slots, self.locale)
    }

    // === Operations ===

    /// Place an unplaced card in the lowest-index empty slot.
    ///
    /// Returns the slot index. Records `side` as the card's deck face.
    pub fn place_card(&mut self, card_id: &CardId, side: CardSide) -> Result<usize, PlacementError> {
        self.check_placeable(card_id)?;
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            tracing::warn!(card = %card_id, "board is full");
            return Err(PlacementError::BoardFull(card_id.clone()));
        };
        self.put(card_id, side, index);
        Ok(index)
    }

    /// Place an unplaced card in a specific empty slot.
    pub fn place_card_at(
        &mut self,
        card_id: &CardId,
        side: CardSide,
        index: usize,
    ) -> Result<(), PlacementError> {
        self.check_placeable(card_id)?;
        match self.slots.get(index) {
            None => Err(PlacementError::InvalidSlot(index)),
            Some(Some(_)) => Err(PlacementError::SlotOccupied(index)),
            Some(None) => {
                self.put(card_id, side, index);
                Ok(())
            }
        }
    }

    /// Turn a placed card over. Returns `false` for empty or invalid slots.
    pub fn flip_slot(&mut self, index: usize) -> bool {
        let Some(Some(current)) = self.slots.get(index) else {
            return false;
        };
        let Some(card) = self.catalog.get(&current.card_id) else {
            return false;
        };
        let side = current.side.flipped();
        self.slots[index] = Some(SlotCard::from_definition(card, side, index));
        tracing::debug!(slot = index, card = %card.id, %side, "flipped card");
        self.changed();
        true
    }

    /// Exchange two slots' contents. Returns `false` if nothing moved.
    pub fn swap_slots(&mut self, i: usize, j: usize) -> bool {
        if i == j || i >= SLOT_COUNT || j >= SLOT_COUNT {
            return false;
        }
        if self.slots[i].is_none() && self.slots[j].is_none() {
            return false;
        }
        self.slots.swap(i, j);
        for index in [i, j] {
            if let Some(card) = &mut self.slots[index] {
                card.slot_index = index;
            }
        }
        tracing::debug!(from = i, to = j, "swapped slots");
        self.changed();
        true
    }

    /// Flip the face an unplaced card shows in the deck.
    ///
    /// Returns the new face, or `None` if the card is placed or unknown.
    pub fn toggle_deck_face(&mut self, card_id: &CardId) -> Option<CardSide> {
        let side = self.deck_face(card_id)?.flipped();
        self.deck_faces.insert(card_id.clone(), side);
        self.changed();
        Some(side)
    }

    /// Clear every slot and show every card's front in the deck.
    pub fn reset_board(&mut self) {
        self.slots = empty_slots();
        self.used = OrdSet::new();
        self.deck_faces = front_faces(&self.catalog);
        tracing::debug!("board reset");
        self.changed();
    }

    /// Swap in a new catalog; the board is fully reset against it.
    pub fn reload(&mut self, catalog: Arc<CardCatalog>) {
        tracing::info!(cards = catalog.len(), "catalog loaded");
        self.catalog = catalog;
        self.reset_board();
    }

    /// Replace the whole board with the layout resolved from `items`.
    ///
    /// Equivalent to `reset_board` followed by sequential placement, but
    /// committed in one step.
    pub fn import_layout(&mut self, items: &[RecognizedItem]) -> ImportReport {
        let plan = ImportMatcher::new(&self.catalog).plan(items);

        let mut deck_faces = front_faces(&self.catalog);
        deck_faces.extend(plan.faces);
        self.used = plan.slots.iter().flatten().map(|s| s.card_id.clone()).collect();
        self.slots = plan.slots;
        self.deck_faces = deck_faces;

        tracing::debug!(
            placed = plan.report.placed.len(),
            skipped = plan.report.skipped.len(),
            "imported layout"
        );
        self.changed();
        plan.report
    }

    // === Invariants ===

    /// Verify the board invariants.
    pub fn check_invariants(&self) -> Result<(), BoardError> {
        let mut seen = OrdSet::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(card) = slot else { continue };
            if card.slot_index != index {
                return Err(BoardError::Invariant(format!(
                    "slot {index} holds a card recorded at {}",
                    card.slot_index
                )));
            }
            if seen.insert(card.card_id.clone()).is_some() {
                return Err(BoardError::Invariant(format!(
                    "card {} is placed twice",
                    card.card_id
                )));
            }
            let Some(definition) = self.catalog.get(&card.card_id) else {
                return Err(BoardError::Invariant(format!(
                    "card {} is not in the catalog",
                    card.card_id
                )));
            };
            if definition.face(card.side) != &card.face {
                return Err(BoardError::Invariant(format!(
                    "slot {index} face differs from the catalog"
                )));
            }
        }
        if seen != self.used {
            return Err(BoardError::Invariant(
                "used set differs from placed cards".to_string(),
            ));
        }
        Ok(())
    }

    // === Internals ===

    fn check_placeable(&self, card_id: &CardId) -> Result<(), PlacementError> {
        if !self.catalog.contains(card_id) {
            return Err(PlacementError::UnknownCard(card_id.clone()));
        }
        if self.is_used(card_id) {
            return Err(PlacementError::AlreadyPlaced(card_id.clone()));
        }
        Ok(())
    }

    /// Write a card into an empty slot. Caller has checked placeability.
    fn put(&mut self, card_id: &CardId, side: CardSide, index: usize) {
        let Some(card) = self.catalog.get(card_id) else {
            return;
        };
        self.slots[index] = Some(SlotCard::from_definition(card, side, index));
        self.used.insert(card_id.clone());
        self.deck_faces.insert(card_id.clone(), side);
        tracing::debug!(slot = index, card = %card_id, %side, "placed card");
        self.changed();
    }

    fn changed(&self) {
        debug_assert!(
            self.check_invariants().is_ok(),
            "{:?}",
            self.check_invariants()
        );
        if self.listeners.is_empty() {
            return;
        }
        let summary = self.summary();
        for listener in &self.listeners {
            listener(&summary);
        }
    }
}

fn front_faces(catalog: &CardCatalog) -> FxHashMap<CardId, CardSide> {
    catalog
        .iter()
        .map(|card| (card.id.clone(), CardSide::Front))
        .collect()
}
