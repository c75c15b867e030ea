//! Pointer and touch gestures translated into board operations.
//!
//! The controller holds no gesture state of its own. The single in-flight
//! gesture lives in an `InteractionState` owned by the caller and passed by
//! `&mut` into every call. Every call that ends a gesture (drop, drag end,
//! touch end, touch cancel) leaves it `Idle`, whatever the outcome.

use std::mem;

use super::geometry::{hit_test, Point, SlotGeometry};
use crate::board::slot::SLOT_COUNT;
use crate::board::Board;
use crate::cards::{CardId, CardSide};
use crate::error::PlacementError;

/// What a drag picked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// An unplaced card from the deck.
    Deck(CardId),
    /// A filled slot.
    Slot(usize),
}

/// The in-flight gesture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
        hover: Option<usize>,
    },
    Touching {
        source: usize,
        hover: Option<usize>,
    },
}

/// Transient gesture state. Never part of the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    gesture: Gesture,
}

impl InteractionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// The highlighted target slot.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging { hover, .. } | Gesture::Touching { hover, .. } => hover,
        }
    }

    /// The slot being moved, for drags and touches that started on a slot.
    #[must_use]
    pub fn source_slot(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Dragging {
                source: DragSource::Slot(index),
                ..
            }
            | Gesture::Touching { source: index, .. } => Some(index),
            _ => None,
        }
    }

    /// Clear the gesture.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
    }

    fn take(&mut self) -> Gesture {
        mem::take(&mut self.gesture)
    }

    fn set_hover(&mut self, target: Option<usize>) {
        match &mut self.gesture {
            Gesture::Dragging { hover, .. } | Gesture::Touching { hover, .. } => *hover = target,
            Gesture::Idle => {}
        }
    }
}

/// Result of a gesture, for the caller to surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Nothing changed.
    None,
    Placed { card_id: CardId, slot: usize },
    Flipped(usize),
    Swapped(usize, usize),
    /// A placement was refused. Capacity failures should be shown to the user.
    Rejected(PlacementError),
}

/// Maps gestures onto `Board` operations.
#[derive(Clone, Debug)]
pub struct InteractionController {
    geometry: SlotGeometry,
}

impl InteractionController {
    #[must_use]
    pub fn new(geometry: SlotGeometry) -> Self {
        Self { geometry }
    }

    #[must_use]
    pub fn geometry(&self) -> &SlotGeometry {
        &self.geometry
    }

    /// Replace the slot rectangles, e.g. after a re-layout.
    pub fn set_geometry(&mut self, geometry: SlotGeometry) {
        self.geometry = geometry;
    }

    // === Clicks ===

    /// Place a deck card in the first empty slot, showing its current deck face.
    pub fn click_deck_card(&self, board: &mut Board, card_id: &CardId) -> InteractionOutcome {
        let side = board.deck_face(card_id).unwrap_or(CardSide::Front);
        match board.place_card(card_id, side) {
            Ok(slot) => InteractionOutcome::Placed {
                card_id: card_id.clone(),
                slot,
            },
            Err(err) => InteractionOutcome::Rejected(err),
        }
    }

    /// Turn over the card in a slot.
    pub fn click_slot(&self, board: &mut Board, index: usize) -> InteractionOutcome {
        if board.flip_slot(index) {
            InteractionOutcome::Flipped(index)
        } else {
            InteractionOutcome::None
        }
    }

    // === Pointer drag ===

    /// Pick up a filled slot. Returns `false` (and leaves the state idle)
    /// for an empty or invalid slot.
    pub fn drag_start_slot(&self, board: &Board, state: &mut InteractionState, index: usize) -> bool {
        if board.slot(index).is_none() {
            state.reset();
            return false;
        }
        state.gesture = Gesture::Dragging {
            source: DragSource::Slot(index),
            hover: None,
        };
        true
    }

    /// Pick up an unplaced deck card.
    pub fn drag_start_deck(&self, board: &Board, state: &mut InteractionState, card_id: &CardId) -> bool {
        if board.deck_face(card_id).is_none() {
            state.reset();
            return false;
        }
        state.gesture = Gesture::Dragging {
            source: DragSource::Deck(card_id.clone()),
            hover: None,
        };
        true
    }

    /// Pointer over a slot. Highlights it if the current drag would accept
    /// a drop there; returns whether it did.
    pub fn drag_over(&self, board: &Board, state: &mut InteractionState, index: usize) -> bool {
        let accepts = match &state.gesture {
            Gesture::Dragging { source, .. } => accepts_drop(board, source, index),
            _ => false,
        };
        state.set_hover(accepts.then_some(index));
        accepts
    }

    /// Pointer left a slot.
    pub fn drag_leave(&self, state: &mut InteractionState, index: usize) {
        if state.hovered() == Some(index) {
            state.set_hover(None);
        }
    }

    /// Drop on a slot. Ends the gesture.
    pub fn drop_on(&self, board: &mut Board, state: &mut InteractionState, index: usize) -> InteractionOutcome {
        let Gesture::Dragging { source, .. } = state.take() else {
            return InteractionOutcome::None;
        };
        if !accepts_drop(board, &source, index) {
            return InteractionOutcome::None;
        }
        match source {
            DragSource::Slot(from) => move_slot(board, from, index),
            DragSource::Deck(card_id) => {
                let side = board.deck_face(&card_id).unwrap_or(CardSide::Front);
                match board.place_card_at(&card_id, side, index) {
                    Ok(()) => InteractionOutcome::Placed { card_id, slot: index },
                    Err(err) => InteractionOutcome::Rejected(err),
                }
            }
        }
    }

    /// Drag finished without a drop (cancelled or released outside the grid).
    pub fn drag_end(&self, state: &mut InteractionState) {
        state.reset();
    }

    // === Touch ===

    /// Touch down. Starts a move if the point is on a filled slot, which is
    /// highlighted as the initial target.
    pub fn touch_start(&self, board: &Board, state: &mut InteractionState, point: Point) -> bool {
        match hit_test(point, &self.geometry).filter(|&i| board.slot(i).is_some()) {
            Some(source) => {
                state.gesture = Gesture::Touching {
                    source,
                    hover: Some(source),
                };
                true
            }
            None => {
                state.reset();
                false
            }
        }
    }

    /// Touch moved: the highlighted target follows the finger.
    pub fn touch_move(&self, state: &mut InteractionState, point: Point) {
        if matches!(state.gesture, Gesture::Touching { .. }) {
            state.set_hover(hit_test(point, &self.geometry));
        }
    }

    /// Touch lifted at `point`. Resolves like a drop. Ends the gesture.
    pub fn touch_end(&self, board: &mut Board, state: &mut InteractionState, point: Point) -> InteractionOutcome {
        let Gesture::Touching { source, .. } = state.take() else {
            return InteractionOutcome::None;
        };
        match hit_test(point, &self.geometry) {
            Some(target) => move_slot(board, source, target),
            None => InteractionOutcome::None,
        }
    }

    /// Touch interrupted by the platform.
    pub fn touch_cancel(&self, state: &mut InteractionState) {
        state.reset();
    }
}

fn accepts_drop(board: &Board, source: &DragSource, index: usize) -> bool {
    if index >= SLOT_COUNT {
        return false;
    }
    match source {
        DragSource::Slot(_) => true,
        // Deck cards only go to empty slots.
        DragSource::Deck(_) => board.slot(index).is_none(),
    }
}

fn move_slot(board: &mut Board, from: usize, to: usize) -> InteractionOutcome {
    if from != to && board.swap_slots(from, to) {
        InteractionOutcome::Swapped(from, to)
    } else {
        InteractionOutcome::None
    }
}
