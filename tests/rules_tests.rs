//! Move-rule and game-state property tests.
//!
//! Universally quantified rules are checked with proptest over arbitrary
//! cards, colors and chain lengths.

use proptest::prelude::*;

use taki_engine::cards::{Card, CardKind, Color};
use taki_engine::core::{GameState, InteractionMode, Seat};
use taki_engine::rules::{follows_sequence, is_valid_move};

// =============================================================================
// Strategies
// =============================================================================

fn color() -> impl Strategy<Value = Color> {
    prop::sample::select(Color::ALL.to_vec())
}

fn colored_special() -> impl Strategy<Value = CardKind> {
    prop::sample::select(vec![
        CardKind::Plus,
        CardKind::Stop,
        CardKind::ReverseDirection,
        CardKind::PlusTwo,
        CardKind::Sequence,
    ])
}

fn card() -> impl Strategy<Value = Card> {
    prop_oneof![
        4 => (1u8..=9, color()).prop_map(|(rank, color)| Card::number(rank, color)),
        3 => (colored_special(), color()).prop_map(|(kind, color)| Card::special(kind, color)),
        1 => Just(Card::change_color()),
        1 => Just(Card::wild_sequence()),
    ]
}

/// Reference statement of move validity.
fn expected_valid(card: &Card, top: &Card, active: Color) -> bool {
    card.is_wild()
        || card.suit() == Some(active)
        || (card.kind() == CardKind::Number
            && top.kind() == CardKind::Number
            && card.rank() == top.rank())
        || (card.kind() != CardKind::Number && card.kind() == top.kind())
}

// =============================================================================
// Move validity
// =============================================================================

proptest! {
    #[test]
    fn valid_move_matches_reference(card in card(), top in card(), active in color()) {
        prop_assert_eq!(
            is_valid_move(&card, Some(&top), Some(active)),
            expected_valid(&card, &top, active)
        );
    }

    #[test]
    fn wild_cards_always_valid(top in card(), active in color()) {
        prop_assert!(is_valid_move(&Card::change_color(), Some(&top), Some(active)));
        prop_assert!(is_valid_move(&Card::wild_sequence(), Some(&top), Some(active)));
    }

    #[test]
    fn state_validity_agrees_with_rules(card in card(), top in card(), active in color()) {
        let mut state = GameState::new();
        state.change_active_color(active);
        prop_assert_eq!(
            state.is_valid_move(&card, Some(&top)),
            is_valid_move(&card, Some(&top), Some(active))
        );
    }
}

// =============================================================================
// Chains
// =============================================================================

proptest! {
    #[test]
    fn chain_total_is_twice_length(n in 1u32..30) {
        let mut state = GameState::new();
        state.start_chain(Seat::A);
        for _ in 1..n {
            state.continue_chain();
        }
        prop_assert_eq!(state.chain().map(|c| c.total), Some(2 * n));

        let broken = state.break_chain();
        prop_assert_eq!(broken.total, 2 * n);
        prop_assert_eq!(state.mode(), InteractionMode::Normal);
        prop_assert!(state.chain().is_none());
    }

    #[test]
    fn only_plus_two_answers_chain(card in card(), active in color()) {
        let mut state = GameState::new();
        state.change_active_color(active);
        state.start_chain(Seat::B);
        let top = Card::special(CardKind::PlusTwo, active);

        let accepted = state.check_play(&card, Some(&top)).is_ok();
        prop_assert_eq!(accepted, card.kind() == CardKind::PlusTwo);
    }
}

// =============================================================================
// Sequences
// =============================================================================

proptest! {
    #[test]
    fn sequence_accepts_only_its_color_or_wild(seq_color in color(), card in card()) {
        let mut state = GameState::new();
        state.change_active_color(seq_color);
        state.start_sequence(seq_color, Seat::A);
        let top = Card::special(CardKind::Sequence, seq_color);

        let accepted = state.check_play(&card, Some(&top)).is_ok();
        prop_assert_eq!(accepted, card.is_wild() || card.suit() == Some(seq_color));
        prop_assert_eq!(follows_sequence(&card, seq_color), accepted);
    }
}

#[test]
fn test_scenario_a_numbers_need_rank_or_color() {
    let mut state = GameState::new();
    state.change_active_color(Color::Red);
    let top = Card::number(5, Color::Red);
    let hand = [Card::number(7, Color::Blue)];

    assert!(state.legal_moves(&hand, Some(&top)).is_empty());
}

#[test]
fn test_color_selection_blocks_plays() {
    let mut state = GameState::new();
    state.change_active_color(Color::Red);
    state.change_interaction(InteractionMode::ColorSelection);
    let top = Card::change_color();

    assert!(state.check_play(&Card::number(5, Color::Red), Some(&top)).is_err());
}
