use std::fmt;

use serde::Serialize;

use crate::{
    card::Card,
    score::{self, SoftValue},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn value(&self) -> u16 {
        score::hand_value(&self.cards)
    }

    pub fn soft_value(&self) -> SoftValue {
        score::soft_value(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        score::is_bust(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        score::is_blackjack(&self.cards)
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Hand {
            cards: iter.into_iter().collect(),
        }
    }
}

/// Space-separated cards, e.g. `Ah Td`.
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Seat {
    Player,
    Dealer,
}

#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub hand: Hand,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Participant {
            name: name.into(),
            hand: Hand::new(),
        }
    }
}
