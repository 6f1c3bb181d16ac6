//! Turn-flow integration tests.
//!
//! Two externally driven seats play from stacked decks so every hand and
//! every draw is known in advance.

use taki_engine::cards::{Card, CardKind, Color};
use taki_engine::core::{GameConfig, InteractionMode, RuleError, Seat, Status, TurnOwner};
use taki_engine::flow::Obligation;
use taki_engine::game::Game;
use taki_engine::zones::PileDeck;

/// Deal `a` to Seat A and `b` to Seat B, show `top`, then `rest` to draw.
fn table(a: &[Card], b: &[Card], top: Card, rest: &[Card]) -> Game {
    assert_eq!(a.len(), b.len(), "both seats are dealt the same number of cards");
    let cards = a.iter().chain(b).chain(std::iter::once(&top)).chain(rest).copied();
    let config = GameConfig::default()
        .with_agent_seat(None)
        .with_hand_size(a.len());
    let mut game = Game::with_deck(config, PileDeck::stacked(cards)).unwrap();
    game.start(Seat::A).unwrap();
    game
}

fn red(rank: u8) -> Card {
    Card::number(rank, Color::Red)
}

fn green(rank: u8) -> Card {
    Card::number(rank, Color::Green)
}

fn special(kind: CardKind, color: Color) -> Card {
    Card::special(kind, color)
}

// =============================================================================
// Turn start
// =============================================================================

#[test]
fn test_scenario_a_no_legal_move() {
    let game = table(&[Card::number(7, Color::Blue)], &[red(1)], red(5), &[red(3)]);
    let ctx = game.turn_context().unwrap();

    assert_eq!(game.legal_move_count(), 0);
    assert!(!ctx.can_play);
    assert!(ctx.can_draw);
    assert!(!ctx.can_end_turn);
}

#[test]
fn test_turn_start_grants_play_and_draw() {
    let game = table(&[red(7), green(1)], &[red(1), red(3)], red(5), &[red(4)]);
    let ctx = game.turn_context().unwrap();
    assert_eq!(game.legal_move_count(), 1);
    assert!(ctx.can_play && ctx.can_draw && !ctx.can_end_turn);
}

#[test]
fn test_out_of_turn_actions_rejected() {
    let mut game = table(&[red(7)], &[red(8)], red(5), &[red(4)]);
    assert!(matches!(game.request_play(Seat::B, red(8)), Err(RuleError::WrongPhase { .. })));
    assert!(matches!(game.request_draw(Seat::B), Err(RuleError::WrongPhase { .. })));
    assert!(matches!(game.request_end_sequence(Seat::B), Err(RuleError::WrongPhase { .. })));
    assert!(game.history().is_empty());
}

// =============================================================================
// Single action discipline
// =============================================================================

#[test]
fn test_play_then_end_turn() {
    let mut game = table(&[red(7), red(8)], &[red(1), red(3)], red(5), &[red(4)]);
    game.request_play(Seat::A, red(7)).unwrap();

    let ctx = game.turn_context().unwrap();
    assert!(ctx.can_end_turn);
    assert!(!ctx.can_play && !ctx.can_draw);
    assert!(matches!(game.request_draw(Seat::A), Err(RuleError::WrongPhase { .. })));

    game.request_end_turn(Seat::A).unwrap();
    assert_eq!(game.turn_owner(), TurnOwner::Seat(Seat::B));
}

#[test]
fn test_end_turn_twice_does_not_advance_twice() {
    let mut game = table(&[red(7), red(8)], &[red(1), red(3)], red(5), &[red(4)]);
    game.request_play(Seat::A, red(7)).unwrap();
    game.request_end_turn(Seat::A).unwrap();
    let turn = game.state().turn_number();

    assert!(game.request_end_turn(Seat::A).is_err());
    assert_eq!(game.turn_owner(), TurnOwner::Seat(Seat::B));
    assert_eq!(game.state().turn_number(), turn);
}

#[test]
fn test_end_turn_before_acting_is_pending() {
    let mut game = table(&[red(7)], &[red(1)], red(5), &[red(4)]);
    assert!(matches!(game.request_end_turn(Seat::A), Err(RuleError::PendingObligation { .. })));
}

#[test]
fn test_draw_ends_turn() {
    let mut game = table(&[Card::number(7, Color::Blue)], &[red(1)], red(5), &[red(3)]);
    let drawn = game.request_draw(Seat::A).unwrap();

    assert_eq!(drawn, vec![red(3)]);
    assert_eq!(game.hand(Seat::A).len(), 2);
    assert!(game.can_end_turn());
    assert!(matches!(game.request_play(Seat::A, red(3)), Err(RuleError::WrongPhase { .. })));
}

// =============================================================================
// Plus: additional action
// =============================================================================

#[test]
fn test_scenario_b_plus_then_play() {
    let plus = special(CardKind::Plus, Color::Red);
    let mut game = table(&[plus, red(3), red(4)], &[red(1), red(6), red(7)], red(5), &[red(8)]);

    game.request_play(Seat::A, plus).unwrap();
    let ctx = *game.turn_context().unwrap();
    assert_eq!(ctx.obligation, Obligation::AdditionalAction);
    assert!(ctx.can_play && ctx.can_draw && !ctx.can_end_turn);
    assert!(matches!(game.request_end_turn(Seat::A), Err(RuleError::PendingObligation { .. })));

    game.request_play(Seat::A, red(3)).unwrap();
    let ctx = *game.turn_context().unwrap();
    assert!(ctx.obligation.is_none());
    assert!(ctx.must_end_turn());
    assert!(matches!(game.request_draw(Seat::A), Err(RuleError::WrongPhase { .. })));
    game.request_end_turn(Seat::A).unwrap();
}

#[test]
fn test_scenario_b_plus_then_draw() {
    let plus = special(CardKind::Plus, Color::Red);
    let mut game = table(&[plus, red(3)], &[red(1), red(6)], red(5), &[red(8)]);

    game.request_play(Seat::A, plus).unwrap();
    game.request_draw(Seat::A).unwrap();

    assert!(game.turn_context().unwrap().must_end_turn());
    assert!(matches!(game.request_play(Seat::A, red(3)), Err(RuleError::WrongPhase { .. })));
}

#[test]
fn test_plus_as_last_card_requires_draw_before_winning() {
    let plus = special(CardKind::Plus, Color::Red);
    let mut game = table(&[plus], &[red(1)], red(5), &[red(8)]);

    game.request_play(Seat::A, plus).unwrap();
    assert_eq!(game.winner(), None);
    game.request_draw(Seat::A).unwrap();
    assert_eq!(game.hand(Seat::A).len(), 1);
}

// =============================================================================
// ChangeColor
// =============================================================================

#[test]
fn test_change_color_choice_is_optional() {
    let mut game = table(&[Card::change_color(), red(3)], &[red(1), red(6)], red(5), &[red(8)]);
    game.request_play(Seat::A, Card::change_color()).unwrap();

    assert_eq!(game.interaction_mode(), InteractionMode::ColorSelection);
    assert!(game.can_end_turn());
    game.request_end_turn(Seat::A).unwrap();

    assert_eq!(game.interaction_mode(), InteractionMode::Normal);
    assert_eq!(game.active_color(), Some(Color::Red));
}

#[test]
fn test_change_color_can_be_rechosen() {
    let mut game = table(&[Card::change_color(), red(3)], &[red(1), red(6)], red(5), &[red(8)]);
    game.request_play(Seat::A, Card::change_color()).unwrap();
    game.request_color_choice(Seat::A, Color::Blue).unwrap();
    game.request_color_choice(Seat::A, Color::Yellow).unwrap();
    game.request_end_turn(Seat::A).unwrap();

    assert_eq!(game.active_color(), Some(Color::Yellow));
    // Seat B holds only red cards; nothing matches yellow or a wild top
    assert_eq!(game.legal_move_count(), 0);
}

#[test]
fn test_color_choice_outside_selection_is_wrong_phase() {
    let mut game = table(&[red(7)], &[red(1)], red(5), &[red(8)]);
    assert!(matches!(
        game.request_color_choice(Seat::A, Color::Blue),
        Err(RuleError::WrongPhase { .. })
    ));
}

// =============================================================================
// PlusTwo chains
// =============================================================================

#[test]
fn test_chain_passes_and_breaks() {
    let a_two = special(CardKind::PlusTwo, Color::Red);
    let b_two = special(CardKind::PlusTwo, Color::Blue);
    let mut game = table(
        &[a_two, red(3)],
        &[b_two, red(1)],
        red(5),
        &[green(1), green(3), green(4), green(6), green(7)],
    );

    game.request_play(Seat::A, a_two).unwrap();
    game.request_end_turn(Seat::A).unwrap();

    // Seat B faces the chain: continue with PlusTwo or draw
    let ctx = *game.turn_context().unwrap();
    assert_eq!(ctx.obligation, Obligation::ChainResponse);
    assert_eq!(game.legal_move_count(), 1);
    assert!(matches!(game.request_play(Seat::B, red(1)), Err(RuleError::IllegalMove { .. })));
    assert!(matches!(game.request_end_turn(Seat::B), Err(RuleError::PendingObligation { .. })));

    game.request_play(Seat::B, b_two).unwrap();
    assert_eq!(game.state().chain().unwrap().total, 4);
    game.request_end_turn(Seat::B).unwrap();

    // Seat A cannot continue and draws the total
    let ctx = *game.turn_context().unwrap();
    assert!(!ctx.can_play && ctx.can_draw);
    let drawn = game.request_draw(Seat::A).unwrap();
    assert_eq!(drawn.len(), 4);
    assert_eq!(game.interaction_mode(), InteractionMode::Normal);
    assert!(game.state().chain().is_none());
    assert!(game.turn_context().unwrap().must_end_turn());
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn test_sequence_keeps_turn_alive() {
    let opener = special(CardKind::Sequence, Color::Green);
    let mut game = table(
        &[opener, green(3), Card::number(9, Color::Blue), red(1)],
        &[red(3), red(4), red(6), red(7)],
        green(5),
        &[red(8)],
    );

    game.request_play(Seat::A, opener).unwrap();
    let ctx = *game.turn_context().unwrap();
    assert_eq!(ctx.obligation, Obligation::EndSequence);
    assert!(ctx.can_play && ctx.can_end_sequence && !ctx.can_draw && !ctx.can_end_turn);
    assert!(matches!(game.request_draw(Seat::A), Err(RuleError::WrongPhase { .. })));
    assert!(matches!(game.request_end_turn(Seat::A), Err(RuleError::PendingObligation { .. })));
    assert!(matches!(game.request_play(Seat::A, red(1)), Err(RuleError::IllegalMove { .. })));

    game.request_play(Seat::A, green(3)).unwrap();
    assert!(!game.turn_context().unwrap().can_play);
    assert_eq!(game.state().sequence().unwrap().count, 2);

    game.request_end_sequence(Seat::A).unwrap();
    assert!(game.turn_context().unwrap().must_end_turn());
    assert_eq!(game.interaction_mode(), InteractionMode::Normal);
}

#[test]
fn test_sequence_emptying_hand_closes_and_wins() {
    let opener = special(CardKind::Sequence, Color::Green);
    let mut game = table(&[opener, Card::change_color()], &[red(1), red(3)], green(5), &[red(8)]);

    game.request_play(Seat::A, opener).unwrap();
    let resolution = game.request_play(Seat::A, Card::change_color()).unwrap();

    assert!(resolution.closed());
    assert_eq!(game.winner(), Some(Seat::A));
    assert_eq!(game.status(), Status::Concluded);
    assert!(matches!(game.request_end_turn(Seat::A), Err(RuleError::WrongPhase { .. })));
}

// =============================================================================
// Winning and stalemate
// =============================================================================

#[test]
fn test_last_card_wins() {
    let mut game = table(&[red(7)], &[red(1)], red(5), &[red(8)]);
    game.request_play(Seat::A, red(7)).unwrap();
    assert_eq!(game.winner(), Some(Seat::A));
    assert!(!game.can_end_turn());
}

#[test]
fn test_stalemate_allows_ending_turn() {
    let blue = |rank| Card::number(rank, Color::Blue);
    let mut game = table(&[blue(7)], &[blue(8)], red(5), &[]);
    assert!(game.can_end_turn());
    assert_eq!(game.request_draw(Seat::A), Err(RuleError::ResourceExhausted));
    game.request_end_turn(Seat::A).unwrap();
    assert_eq!(game.turn_owner(), TurnOwner::Seat(Seat::B));
}

// =============================================================================
// Pause
// =============================================================================

#[test]
fn test_pause_rejects_actions_and_restores_context() {
    let plus = special(CardKind::Plus, Color::Red);
    let mut game = table(&[plus, red(3)], &[red(1), red(6)], red(5), &[red(8)]);
    game.request_play(Seat::A, plus).unwrap();
    let before = *game.turn_context().unwrap();

    game.pause();
    assert_eq!(game.status(), Status::Paused);
    assert!(matches!(game.request_draw(Seat::A), Err(RuleError::WrongPhase { .. })));
    assert_eq!(game.legal_move_count(), 0);

    game.resume();
    assert_eq!(game.status(), Status::Active);
    assert_eq!(game.turn_context(), Some(&before));
    game.request_play(Seat::A, red(3)).unwrap();
}

#[test]
fn test_apply_replays_actions() {
    use taki_engine::core::Action;

    let mut game = table(&[red(7), red(8)], &[red(1), red(3)], red(5), &[red(4)]);
    game.apply(Seat::A, Action::Play(red(7))).unwrap();
    game.apply(Seat::A, Action::EndTurn).unwrap();
    game.apply(Seat::B, Action::Draw).unwrap();

    let actions: Vec<_> = game.history().iter().map(|r| (r.seat, r.action)).collect();
    assert_eq!(
        actions,
        vec![
            (Seat::A, Action::Play(red(7))),
            (Seat::A, Action::EndTurn),
            (Seat::B, Action::Draw),
        ]
    );
}
