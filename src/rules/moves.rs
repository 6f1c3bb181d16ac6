//! Card-against-card matching predicates.
//!
//! Everything here is a pure function of two cards and the active color.
//! Interaction-mode restrictions (open chain, open sequence) are layered
//! on top by `GameState`.

use crate::cards::{Card, CardKind, Color};

/// Check whether `card` may be played on `top` under `active_color`.
///
/// - Wild cards are always valid.
/// - A suited card is valid when its suit is the active color.
/// - Numbers also match a number of the same rank.
/// - Specials also match a special of the same kind.
///
/// ```
/// use taki_engine::cards::{Card, CardKind, Color};
/// use taki_engine::rules::is_valid_move;
///
/// let top = Card::number(4, Color::Red);
/// assert!(is_valid_move(&Card::number(4, Color::Blue), Some(&top), Some(Color::Red)));
/// assert!(!is_valid_move(&Card::number(5, Color::Blue), Some(&top), Some(Color::Red)));
/// assert!(is_valid_move(&Card::change_color(), Some(&top), Some(Color::Red)));
/// ```
#[must_use]
pub fn is_valid_move(card: &Card, top: Option<&Card>, active_color: Option<Color>) -> bool {
    if card.is_wild() {
        return true;
    }
    if card.suit().is_some() && card.suit() == active_color {
        return true;
    }
    top.is_some_and(|top| matches_top(card, top))
}

/// Rank-or-kind match against the top of the discard pile, ignoring color.
#[must_use]
pub fn matches_top(card: &Card, top: &Card) -> bool {
    match (card.kind(), top.kind()) {
        (CardKind::Number, CardKind::Number) => card.rank() == top.rank(),
        (kind, top_kind) => kind == top_kind,
    }
}

/// Check whether `card` may join a sequence fixed to `color`.
#[must_use]
pub fn follows_sequence(card: &Card, color: Color) -> bool {
    card.is_wild() || card.suit() == Some(color)
}

/// Check whether `card` may answer an open PlusTwo chain.
#[must_use]
pub fn answers_chain(card: &Card) -> bool {
    card.kind() == CardKind::PlusTwo
}
