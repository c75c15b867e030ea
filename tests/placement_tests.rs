//! Placement engine integration tests.
//!
//! These tests drive the board through arbitrary operation sequences and
//! check the layout invariants and the outbound summary after each step.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use cardset_board::board::{Board, BoardSummary, SLOT_COUNT};
use cardset_board::cards::{CardCatalog, CardId, CardSide};
use cardset_board::import::RecognizedItem;

fn builtin_board() -> Board {
    Board::new(Arc::new(CardCatalog::builtin()))
}

fn card(n: usize) -> CardId {
    CardId::new(format!("card_{n:02}"))
}

// =============================================================================
// Operation sequences
// =============================================================================

#[derive(Clone, Debug)]
enum Op {
    Place(usize, CardSide),
    Swap(usize, usize),
    Flip(usize),
    ToggleDeck(usize),
    Reset,
    Import(Vec<(usize, Option<i64>, bool)>),
}

fn side() -> impl Strategy<Value = CardSide> {
    prop_oneof![Just(CardSide::Front), Just(CardSide::Back)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1usize..=13, side()).prop_map(|(n, s)| Op::Place(n, s)),
        3 => (0usize..14, 0usize..14).prop_map(|(i, j)| Op::Swap(i, j)),
        2 => (0usize..14).prop_map(Op::Flip),
        1 => (1usize..=12).prop_map(Op::ToggleDeck),
        1 => Just(Op::Reset),
        1 => prop::collection::vec((1usize..=13, prop::option::of(-1i64..15), any::<bool>()), 0..16)
            .prop_map(Op::Import),
    ]
}

fn apply(board: &mut Board, op: &Op) {
    match op {
        Op::Place(n, s) => {
            let _ = board.place_card(&card(*n), *s);
        }
        Op::Swap(i, j) => {
            board.swap_slots(*i, *j);
        }
        Op::Flip(i) => {
            board.flip_slot(*i);
        }
        Op::ToggleDeck(n) => {
            board.toggle_deck_face(&card(*n));
        }
        Op::Reset => board.reset_board(),
        Op::Import(items) => {
            let items: Vec<_> = items
                .iter()
                .map(|&(n, position, back)| {
                    let mut item = RecognizedItem::named(card(n).as_str());
                    item.position = position;
                    if back {
                        item = item.side(CardSide::Back);
                    }
                    item
                })
                .collect();
            board.import_layout(&items);
        }
    }
}

proptest! {
    /// Test that every operation sequence preserves the board invariants.
    #[test]
    fn test_invariants_hold_for_any_sequence(ops in prop::collection::vec(op(), 0..40)) {
        let mut board = builtin_board();
        for op in &ops {
            apply(&mut board, op);
            prop_assert!(board.check_invariants().is_ok(), "{:?} after {:?}", board.check_invariants(), op);

            for (index, slot) in board.slots().iter().enumerate() {
                if let Some(slot) = slot {
                    prop_assert_eq!(slot.slot_index, index);
                    prop_assert_eq!(board.deck_face(&slot.card_id), None);
                }
            }
            prop_assert_eq!(board.used_count(), board.used_card_ids().len());
            prop_assert_eq!(board.deck().len() + board.used_count(), 12);
        }
    }

    /// Test that swapping twice restores the layout.
    #[test]
    fn test_swap_is_an_involution(
        placements in prop::collection::vec((1usize..=12, side()), 0..12),
        i in 0usize..SLOT_COUNT,
        j in 0usize..SLOT_COUNT,
    ) {
        prop_assume!(i != j);
        let mut board = builtin_board();
        for (n, s) in &placements {
            let _ = board.place_card(&card(*n), *s);
        }
        let shuffle = (i + 5) % SLOT_COUNT;
        board.swap_slots(0, shuffle);

        let before = board.slots().clone();
        board.swap_slots(i, j);
        board.swap_slots(i, j);
        prop_assert_eq!(board.slots(), &before);
    }

    /// Test that scores always match the row-bonus formula.
    #[test]
    fn test_scores_match_formula(ops in prop::collection::vec(op(), 0..20)) {
        let mut board = builtin_board();
        for op in &ops {
            apply(&mut board, op);
        }
        let total: u32 = board.scores().iter().map(|(_, s)| s).sum();
        let expected: u32 = board
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| c.face.value + [2, 1, 0][i / 4]))
            .sum();
        prop_assert_eq!(total, expected);
    }
}

// =============================================================================
// Properties from the board contract
// =============================================================================

/// Test that placing the same card twice leaves the board unchanged.
#[test]
fn test_place_twice_is_noop() {
    let mut board = builtin_board();
    board.place_card(&card(4), CardSide::Front).unwrap();
    let before = board.summary();

    assert!(board.place_card(&card(4), CardSide::Back).is_err());
    assert_eq!(board.summary(), before);
    assert_eq!(board.slot(0).unwrap().side, CardSide::Front);
}

/// Test that reset from a full board empties everything.
#[test]
fn test_reset_from_full_board() {
    let mut board = builtin_board();
    for n in 1..=12 {
        board.place_card(&card(n), CardSide::Back).unwrap();
    }
    assert!(board.is_complete());
    assert!(board.summary().complete);

    board.reset_board();
    let summary = board.summary();
    assert_eq!(summary.used_count, 0);
    assert!(!summary.complete);
    assert!(summary.layout.iter().all(Option::is_none));
}

/// Test the red-card scoring example and the label boundaries.
#[test]
fn test_scoring_example() {
    let mut board = builtin_board();
    // card_10 front: red 3. card_01 back: red 1.
    board.place_card(&card(10), CardSide::Front).unwrap();
    for n in 2..=8 {
        board.place_card(&card(n), CardSide::Front).unwrap();
    }
    board.place_card(&card(1), CardSide::Back).unwrap();
    assert_eq!(board.slot(8).unwrap().card_id, card(1));

    let summary = board.summary();
    // Row 0 reds: card_10 (3+2), card_02 (2+2), card_03 (2+2). Row 2: card_01 back (1+0).
    assert_eq!(summary.scores.red, 5 + 4 + 4 + 1);
    assert!(summary.score_text.starts_with("red: 14 (medium)"));
}

/// Test that every mutation emits exactly one summary matching the board.
#[test]
fn test_summary_emitted_per_mutation() {
    let seen: Arc<Mutex<Vec<BoardSummary>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let mut board = builtin_board();
    board.subscribe(Arc::new(move |s: &BoardSummary| sink.lock().unwrap().push(s.clone())));

    board.place_card(&card(1), CardSide::Front).unwrap();
    board.swap_slots(0, 11);
    board.flip_slot(11);
    board.import_layout(&[RecognizedItem::named("Critical")]);
    board.reset_board();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 5);
    assert_eq!(seen[1].layout[11].as_ref().unwrap().slot_index, 11);
    assert_eq!(seen[2].layout[11].as_ref().unwrap().title, "乐观");
    assert_eq!(seen[3].used_count, 1);
    assert_eq!(seen[4], board.summary());
}

/// Test the summary's JSON contract.
#[test]
fn test_summary_json_shape() {
    let mut board = builtin_board();
    board.place_card(&card(8), CardSide::Back).unwrap();
    let json = serde_json::to_value(board.summary()).unwrap();

    assert_eq!(json["usedCount"], 1);
    assert_eq!(json["complete"], false);
    assert_eq!(json["layout"].as_array().unwrap().len(), 12);
    assert_eq!(json["layout"][0]["cardId"], "card_08");
    assert_eq!(json["layout"][0]["side"], "back");
    assert_eq!(json["layout"][0]["slotIndex"], 0);
    assert_eq!(json["layout"][0]["color"], "green");
    assert_eq!(json["layout"][1], serde_json::Value::Null);
    assert_eq!(json["scores"]["green"], 3);
    assert!(json["scoreText"].as_str().unwrap().contains("green: 3 (general)"));
}
