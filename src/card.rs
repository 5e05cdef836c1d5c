use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two,
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
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Base value, with the ace counted high.
    pub fn value(&self) -> u16 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    fn symbol(&self) -> char {
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

    fn from_symbol(symbol: &str) -> Option<Rank> {
        let rank = match symbol {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Spade, Suit::Club];

    fn symbol(&self) -> char {
        match self {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }

    fn from_symbol(symbol: char) -> Option<Suit> {
        match symbol {
            'c' => Some(Suit::Club),
            'd' => Some(Suit::Diamond),
            'h' => Some(Suit::Heart),
            's' => Some(Suit::Spade),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    pub fn value(&self) -> u16 {
        self.rank.value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// Every card of a standard deck, in rank-major order.
    pub fn full_set() -> impl Iterator<Item = Card> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

/// Parses the short notation used on screen, e.g. `Ah`, `Td` or `10c`.
impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidCard(s.to_string());
        let suit_symbol = s.chars().last().ok_or_else(invalid)?;
        let rank_symbol = &s[..s.len() - suit_symbol.len_utf8()];
        let rank = Rank::from_symbol(&rank_symbol.to_ascii_uppercase()).ok_or_else(invalid)?;
        let suit = Suit::from_symbol(suit_symbol.to_ascii_lowercase()).ok_or_else(invalid)?;
        Ok(Card::new(rank, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_full_set_has_52_distinct_cards() {
        let cards: HashSet<Card> = Card::full_set().collect();
        assert_eq!(cards.len(), 52);
    }

    #[test]
    fn test_thirteen_ranks_per_suit() {
        for suit in Suit::ALL {
            let count = Card::full_set().filter(|c| c.suit == suit).count();
            assert_eq!(count, 13);
        }
    }

    #[test]
    fn test_base_values() {
        assert_eq!(Card::new(Rank::Seven, Suit::Heart).value(), 7);
        assert_eq!(Card::new(Rank::Ten, Suit::Club).value(), 10);
        assert_eq!(Card::new(Rank::Jack, Suit::Spade).value(), 10);
        assert_eq!(Card::new(Rank::Queen, Suit::Diamond).value(), 10);
        assert_eq!(Card::new(Rank::King, Suit::Heart).value(), 10);
        assert_eq!(Card::new(Rank::Ace, Suit::Club).value(), 11);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Rank::Ace, Suit::Heart).to_string(), "Ah");
        assert_eq!(Card::new(Rank::Ten, Suit::Diamond).to_string(), "Td");
        assert_eq!(Card::new(Rank::Seven, Suit::Club).to_string(), "7c");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Ah".parse::<Card>().unwrap(), Card::new(Rank::Ace, Suit::Heart));
        assert_eq!("10c".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Club));
        assert_eq!("ks".parse::<Card>().unwrap(), Card::new(Rank::King, Suit::Spade));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Card>().is_err());
        assert!("Zh".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
        assert!("A".parse::<Card>().is_err());
    }
}
