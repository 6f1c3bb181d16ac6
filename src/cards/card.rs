//! Card values - the immutable data printed on a TAKI card.
//!
//! A card is a plain `Copy` value: rank, color and kind. Which container
//! holds it (hand, draw pile, discard pile) is tracked by the container,
//! never by the card.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// Printed color of a card: a suit, or wild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Suit(Color),
    Wild,
}

/// What a card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number,
    Plus,
    Stop,
    ReverseDirection,
    ChangeColor,
    PlusTwo,
    Sequence,
    WildSequence,
}

impl CardKind {
    /// Every kind except `Number` is a special card.
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, CardKind::Number)
    }

    /// Kinds that are printed without a suit.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, CardKind::ChangeColor | CardKind::WildSequence)
    }

    /// Kinds that open a sequence. Their role inside a sequence is
    /// structural; they carry no effect to replay when it closes.
    #[must_use]
    pub const fn is_sequence(self) -> bool {
        matches!(self, CardKind::Sequence | CardKind::WildSequence)
    }
}

/// A single TAKI card.
///
/// ## Example
///
/// ```
/// use taki_engine::cards::{Card, CardKind, Color};
///
/// let five = Card::number(5, Color::Green);
/// assert_eq!(five.rank(), Some(5));
/// assert_eq!(five.suit(), Some(Color::Green));
///
/// let wild = Card::change_color();
/// assert!(wild.is_wild());
/// assert_eq!(wild.kind(), CardKind::ChangeColor);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    rank: Option<u8>,
    color: CardColor,
    kind: CardKind,
}

/// Decoded card fields that match no printed TAKI card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no such card: {kind:?} with rank {rank:?} and color {color:?}")]
pub struct InvalidCard {
    pub rank: Option<u8>,
    pub color: CardColor,
    pub kind: CardKind,
}

/// Wire form of [`Card`], checked on decode.
#[derive(Deserialize)]
struct RawCard {
    rank: Option<u8>,
    color: CardColor,
    kind: CardKind,
}

impl TryFrom<RawCard> for Card {
    type Error = InvalidCard;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        let RawCard { rank, color, kind } = raw;
        let valid = match (kind, rank, color) {
            (CardKind::Number, Some(rank), CardColor::Suit(_)) => (1..=9).contains(&rank),
            (kind, None, CardColor::Wild) => kind.is_wild(),
            (kind, None, CardColor::Suit(_)) => kind.is_special() && !kind.is_wild(),
            _ => false,
        };
        if valid {
            Ok(Self { rank, color, kind })
        } else {
            Err(InvalidCard { rank, color, kind })
        }
    }
}

impl Card {
    /// A numbered card. Ranks run 1 through 9.
    #[must_use]
    pub fn number(rank: u8, color: Color) -> Self {
        assert!((1..=9).contains(&rank), "card rank {rank} out of range 1..=9");
        Self {
            rank: Some(rank),
            color: CardColor::Suit(color),
            kind: CardKind::Number,
        }
    }

    /// A colored special card (Plus, Stop, ReverseDirection, PlusTwo, Sequence).
    #[must_use]
    pub fn special(kind: CardKind, color: Color) -> Self {
        assert!(
            kind.is_special() && !kind.is_wild(),
            "{kind:?} is not a colored special card"
        );
        Self {
            rank: None,
            color: CardColor::Suit(color),
            kind,
        }
    }

    /// The wild color-change card.
    #[must_use]
    pub const fn change_color() -> Self {
        Self {
            rank: None,
            color: CardColor::Wild,
            kind: CardKind::ChangeColor,
        }
    }

    /// The wild sequence card ("super TAKI").
    #[must_use]
    pub const fn wild_sequence() -> Self {
        Self {
            rank: None,
            color: CardColor::Wild,
            kind: CardKind::WildSequence,
        }
    }

    #[must_use]
    pub const fn rank(&self) -> Option<u8> {
        self.rank
    }

    #[must_use]
    pub const fn color(&self) -> CardColor {
        self.color
    }

    #[must_use]
    pub const fn kind(&self) -> CardKind {
        self.kind
    }

    /// The suit, or `None` for wild cards.
    #[must_use]
    pub const fn suit(&self) -> Option<Color> {
        match self.color {
            CardColor::Suit(color) => Some(color),
            CardColor::Wild => None,
        }
    }

    #[must_use]
    pub const fn is_wild(&self) -> bool {
        matches!(self.color, CardColor::Wild)
    }

    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.kind.is_special()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.kind, self.color) {
            (CardKind::Number, CardColor::Suit(color)) => {
                write!(f, "{} {}", color, self.rank.unwrap_or_default())
            }
            (kind, CardColor::Suit(color)) => write!(f, "{color} {kind:?}"),
            (kind, CardColor::Wild) => write!(f, "wild {kind:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_card() {
        let card = Card::number(7, Color::Blue);
        assert_eq!(card.rank(), Some(7));
        assert_eq!(card.kind(), CardKind::Number);
        assert!(!card.is_special());
        assert!(!card.is_wild());
    }

    #[test]
    fn test_special_card_has_no_rank() {
        let card = Card::special(CardKind::Stop, Color::Red);
        assert_eq!(card.rank(), None);
        assert_eq!(card.suit(), Some(Color::Red));
        assert!(card.is_special());
    }

    #[test]
    fn test_wild_cards() {
        assert!(Card::change_color().is_wild());
        assert!(Card::wild_sequence().is_wild());
        assert!(Card::wild_sequence().kind().is_sequence());
        assert_eq!(Card::change_color().suit(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_rank_out_of_range() {
        let _ = Card::number(10, Color::Red);
    }

    #[test]
    #[should_panic(expected = "not a colored special card")]
    fn test_wild_kind_needs_wild_constructor() {
        let _ = Card::special(CardKind::ChangeColor, Color::Red);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::number(3, Color::Yellow).to_string(), "yellow 3");
        assert_eq!(Card::special(CardKind::Plus, Color::Green).to_string(), "green Plus");
        assert_eq!(Card::change_color().to_string(), "wild ChangeColor");
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::special(CardKind::PlusTwo, Color::Blue);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }

    #[test]
    fn test_decode_rejects_unprintable_cards() {
        let rank_zero = r#"{"rank":0,"color":{"Suit":"Red"},"kind":"Number"}"#;
        assert!(serde_json::from_str::<Card>(rank_zero).is_err());

        let suited_wild = r#"{"rank":null,"color":{"Suit":"Red"},"kind":"ChangeColor"}"#;
        assert!(serde_json::from_str::<Card>(suited_wild).is_err());

        let ranked_special = r#"{"rank":4,"color":{"Suit":"Blue"},"kind":"Stop"}"#;
        assert!(serde_json::from_str::<Card>(ranked_special).is_err());

        let wild_number = r#"{"rank":5,"color":"Wild","kind":"Number"}"#;
        assert!(serde_json::from_str::<Card>(wild_number).is_err());
    }

    #[test]
    fn test_decode_accepts_every_deck_card() {
        let cards = [
            Card::number(9, Color::Yellow),
            Card::special(CardKind::Sequence, Color::Green),
            Card::change_color(),
            Card::wild_sequence(),
        ];
        for card in cards {
            let json = serde_json::to_string(&card).unwrap();
            assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);
        }
    }

    #[test]
    fn test_invalid_card_error_names_fields() {
        let raw = RawCard {
            rank: Some(0),
            color: CardColor::Suit(Color::Red),
            kind: CardKind::Number,
        };
        let err = Card::try_from(raw).unwrap_err();
        assert_eq!(err.rank, Some(0));
        assert!(err.to_string().contains("Number"));
    }
}
