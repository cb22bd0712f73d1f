use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Number of distinct cards in the pool.
pub const DECK_SIZE: usize = 52;

/// One of the four suits. The discriminant is the suit index `card / 13`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs = 0,
    /// Diamonds suit (♦)
    Diamonds = 1,
    /// Hearts suit (♥)
    Hearts = 2,
    /// Spades suit (♠)
    Spades = 3,
}

impl Suit {
    pub fn from_index(v: u8) -> Suit {
        match v {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Face value of a card from Two through Ace.
/// The discriminant is the numeric rank used by the evaluator (Ace = 14).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn from_u8(v: u8) -> Rank {
        match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            _ => Rank::Ace,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    fn symbol(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// A single playing card, stored as its pool index in `0..52`.
///
/// The index encodes both components: `rank = index % 13 + 2` and
/// `suit = index / 13`. Cards are plain values and carry no state of their own;
/// ownership of a card within a round is tracked by [`crate::deck::CardPool`].
///
/// # Examples
///
/// ```
/// use showdown_engine::cards::{Card, Rank, Suit};
///
/// let ace = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(ace.index(), 51);
/// assert_eq!(ace.to_string(), "As");
/// assert_eq!("As".parse::<Card>().unwrap(), ace);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(u8);

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card((suit as u8) * 13 + (rank as u8 - 2))
    }

    /// Builds a card from its pool index. Returns `None` outside `0..52`.
    pub fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < DECK_SIZE {
            Some(Card(index))
        } else {
            None
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        Rank::from_u8(self.0 % 13 + 2)
    }

    pub fn suit(self) -> Suit {
        Suit::from_index(self.0 / 13)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().symbol(), self.suit().symbol())
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(GameError::InvalidCard(s.to_string()));
        };
        let rank = match r.to_ascii_uppercase() {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(GameError::InvalidCard(s.to_string())),
        };
        let suit = match su.to_ascii_lowercase() {
            'c' => Suit::Clubs,
            'd' => Suit::Diamonds,
            'h' => Suit::Hearts,
            's' => Suit::Spades,
            _ => return Err(GameError::InvalidCard(s.to_string())),
        };
        Ok(Card::new(rank, suit))
    }
}

/// Parses a whitespace or comma separated list such as `"As Kd, 7c"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE as u8).map(Card).collect()
}
