//! Interaction controller integration tests.
//!
//! Gestures are replayed headlessly against the export canvas geometry.

use std::sync::Arc;

use proptest::prelude::*;

use cardset_board::board::Board;
use cardset_board::cards::{CardCatalog, CardId, CardSide};
use cardset_board::export::ExportConfig;
use cardset_board::interaction::{
    hit_test, InteractionController, InteractionOutcome, InteractionState, Point,
};

fn setup() -> (Board, InteractionController, InteractionState) {
    let board = Board::new(Arc::new(CardCatalog::builtin()));
    let controller = InteractionController::new(ExportConfig::default().slot_geometry());
    (board, controller, InteractionState::new())
}

fn center(controller: &InteractionController, index: usize) -> Point {
    let rect = controller.geometry().rect(index).unwrap();
    Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

// =============================================================================
// Deck and slot clicks
// =============================================================================

/// Test a full click session: toggle a deck face, place, flip.
#[test]
fn test_click_session() {
    let (mut board, controller, _) = setup();
    let id = CardId::new("card_11");

    assert_eq!(board.toggle_deck_face(&id), Some(CardSide::Back));
    let outcome = controller.click_deck_card(&mut board, &id);
    assert_eq!(outcome, InteractionOutcome::Placed { card_id: id.clone(), slot: 0 });
    assert_eq!(board.slot(0).unwrap().face.english, "Enjoy sharing");

    assert_eq!(controller.click_slot(&mut board, 0), InteractionOutcome::Flipped(0));
    assert_eq!(board.slot(0).unwrap().face.english, "Conservative");
}

/// Test that clicking an already placed card on a full board is refused as a duplicate.
#[test]
fn test_click_on_full_board() {
    let (mut board, controller, _) = setup();
    for n in 1..=12 {
        let id = CardId::new(format!("card_{n:02}"));
        controller.click_deck_card(&mut board, &id);
    }
    assert!(board.is_complete());

    match controller.click_deck_card(&mut board, &CardId::new("card_01")) {
        InteractionOutcome::Rejected(err) => assert!(!err.is_capacity()),
        other => panic!("expected rejection, got {other:?}"),
    }
}

// =============================================================================
// Drag and touch
// =============================================================================

/// Test moving a card across the grid by touch, using canvas coordinates.
#[test]
fn test_touch_move_across_grid() {
    let (mut board, controller, mut state) = setup();
    board.place_card(&CardId::new("card_06"), CardSide::Front).unwrap();

    assert!(controller.touch_start(&board, &mut state, center(&controller, 0)));
    for target in [1, 5, 9, 10] {
        controller.touch_move(&mut state, center(&controller, target));
        assert_eq!(state.hovered(), Some(target));
    }
    let outcome = controller.touch_end(&mut board, &mut state, center(&controller, 10));

    assert_eq!(outcome, InteractionOutcome::Swapped(0, 10));
    assert!(state.is_idle());
    assert_eq!(board.slot(10).unwrap().card_id.as_str(), "card_06");
    assert_eq!(board.slot(10).unwrap().slot_index, 10);
}

/// Test that a deck card dragged to an occupied slot is refused.
#[test]
fn test_deck_drag_to_occupied_slot() {
    let (mut board, controller, mut state) = setup();
    board.place_card(&CardId::new("card_01"), CardSide::Front).unwrap();
    let id = CardId::new("card_02");

    assert!(controller.drag_start_deck(&board, &mut state, &id));
    assert!(!controller.drag_over(&board, &mut state, 0));
    assert_eq!(controller.drop_on(&mut board, &mut state, 0), InteractionOutcome::None);
    assert!(state.is_idle());
    assert!(!board.is_used(&id));
}

#[derive(Clone, Debug)]
enum Event {
    DragSlot(usize),
    DragDeck(usize),
    Over(usize),
    Leave(usize),
    Drop(usize),
    End,
    TouchStart(usize),
    TouchMove(f32, f32),
    TouchEnd(f32, f32),
    TouchCancel,
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (0usize..13).prop_map(Event::DragSlot),
        (1usize..=12).prop_map(Event::DragDeck),
        (0usize..13).prop_map(Event::Over),
        (0usize..13).prop_map(Event::Leave),
        (0usize..13).prop_map(Event::Drop),
        Just(Event::End),
        (0usize..12).prop_map(Event::TouchStart),
        (-50.0f32..1100.0, -50.0f32..1100.0).prop_map(|(x, y)| Event::TouchMove(x, y)),
        (-50.0f32..1100.0, -50.0f32..1100.0).prop_map(|(x, y)| Event::TouchEnd(x, y)),
        Just(Event::TouchCancel),
    ]
}

proptest! {
    /// Test that gesture-ending events always leave the state idle and the
    /// board consistent.
    #[test]
    fn test_gesture_end_always_idle(events in prop::collection::vec(event(), 0..60)) {
        let (mut board, controller, mut state) = setup();
        for n in [3, 7, 9] {
            board.place_card(&CardId::new(format!("card_{n:02}")), CardSide::Front).unwrap();
        }

        for event in &events {
            let ends = match event {
                Event::DragSlot(i) => { controller.drag_start_slot(&board, &mut state, *i); false }
                Event::DragDeck(n) => {
                    controller.drag_start_deck(&board, &mut state, &CardId::new(format!("card_{n:02}")));
                    false
                }
                Event::Over(i) => { controller.drag_over(&board, &mut state, *i); false }
                Event::Leave(i) => { controller.drag_leave(&mut state, *i); false }
                Event::Drop(i) => { controller.drop_on(&mut board, &mut state, *i); true }
                Event::End => { controller.drag_end(&mut state); true }
                Event::TouchStart(i) => {
                    let point = center(&controller, *i);
                    controller.touch_start(&board, &mut state, point);
                    false
                }
                Event::TouchMove(x, y) => { controller.touch_move(&mut state, Point::new(*x, *y)); false }
                Event::TouchEnd(x, y) => {
                    controller.touch_end(&mut board, &mut state, Point::new(*x, *y));
                    true
                }
                Event::TouchCancel => { controller.touch_cancel(&mut state); true }
            };
            if ends {
                prop_assert!(state.is_idle());
            }
            if let Some(hover) = state.hovered() {
                prop_assert!(hover < 12);
            }
            prop_assert!(board.check_invariants().is_ok());
        }
    }

    /// Test that hit-testing agrees with slot rectangles.
    #[test]
    fn test_hit_test_matches_rects(x in -20.0f32..1100.0, y in -20.0f32..1100.0) {
        let geometry = ExportConfig::default().slot_geometry();
        let point = Point::new(x, y);
        let containing: Vec<_> = geometry.iter().filter(|(_, r)| r.contains(point)).map(|(i, _)| i).collect();
        prop_assert!(containing.len() <= 1);
        prop_assert_eq!(hit_test(point, &geometry), containing.first().copied());
    }
}
