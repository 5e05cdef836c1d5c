use log::trace;
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::{card::Card, error::GameError};

/// A single 52-card deck. Cards are dealt from the end of `cards`.
pub struct Deck {
    cards: Vec<Card>,
    top: Vec<Card>,
    rng: SmallRng,
}

impl Deck {
    /// A shuffled deck, seeded for reproducible play or from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(rng, Vec::new())
    }

    /// A deck that always deals `top` first, in order, after every reset.
    /// The remaining cards are shuffled beneath them. Repeats in `top` keep
    /// only their first position, so the deck never holds a card twice.
    pub fn stacked(seed: u64, top: Vec<Card>) -> Self {
        let mut unique = Vec::with_capacity(top.len());
        for card in top {
            if !unique.contains(&card) {
                unique.push(card);
            }
        }
        Self::with_rng(SmallRng::seed_from_u64(seed), unique)
    }

    fn with_rng(rng: SmallRng, top: Vec<Card>) -> Self {
        let mut deck = Deck {
            cards: Vec::with_capacity(52),
            top,
            rng,
        };
        deck.reset();
        deck
    }

    /// Refills to a full deck and reshuffles.
    pub fn reset(&mut self) {
        self.cards.clear();
        let top = &self.top;
        self.cards
            .extend(Card::full_set().filter(|card| !top.contains(card)));
        self.cards.shuffle(&mut self.rng);
        self.cards.extend(self.top.iter().rev().copied());
        trace!("deck reset, {} cards", self.cards.len());
    }

    /// Removes `n` cards from the top of the deck, first dealt first.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.cards.len();
        if n > remaining {
            return Err(GameError::InsufficientCards {
                requested: n,
                remaining,
            });
        }
        let mut dealt = self.cards.split_off(remaining - n);
        dealt.reverse();
        trace!("dealt {n}, {} remaining", self.cards.len());
        Ok(dealt)
    }

    pub fn deal_one(&mut self) -> Result<Card, GameError> {
        let remaining = self.cards.len();
        self.cards.pop().ok_or(GameError::InsufficientCards {
            requested: 1,
            remaining,
        })
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use std::collections::HashSet;

    #[test]
    fn test_new_deck_is_full() {
        let deck = Deck::new(Some(7));
        assert_eq!(deck.remaining(), 52);
    }

    #[test]
    fn test_deal_depletes() {
        let mut deck = Deck::new(Some(7));
        let cards = deck.deal(4).unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(deck.remaining(), 48);
    }

    #[test]
    fn test_dealt_cards_are_unique() {
        let mut deck = Deck::new(Some(11));
        let cards = deck.deal(52).unwrap();
        let unique: HashSet<Card> = cards.into_iter().collect();
        assert_eq!(unique.len(), 52);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn test_deal_more_than_remaining_fails() {
        let mut deck = Deck::new(Some(3));
        deck.deal(50).unwrap();
        match deck.deal(3) {
            Err(GameError::InsufficientCards {
                requested,
                remaining,
            }) => {
                assert_eq!(requested, 3);
                assert_eq!(remaining, 2);
            }
            other => panic!("expected InsufficientCards, got {other:?}"),
        }
        assert_eq!(deck.remaining(), 2);
    }

    #[test]
    fn test_deal_one_from_empty_deck_fails() {
        let mut deck = Deck::new(Some(3));
        deck.deal(52).unwrap();
        assert!(deck.deal_one().is_err());
    }

    #[test]
    fn test_reset_restores_full_deck() {
        let mut deck = Deck::new(Some(5));
        deck.deal(49).unwrap();
        deck.reset();
        assert_eq!(deck.remaining(), 52);
        assert_eq!(deck.deal(4).unwrap().len(), 4);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = Deck::new(Some(42));
        let mut b = Deck::new(Some(42));
        assert_eq!(a.deal(10).unwrap(), b.deal(10).unwrap());
    }

    #[test]
    fn test_stacked_drops_repeated_cards() {
        let ace = Card::new(Rank::Ace, Suit::Spade);
        let king = Card::new(Rank::King, Suit::Heart);
        let mut deck = Deck::stacked(1, vec![ace, king, ace]);
        assert_eq!(deck.remaining(), 52);
        assert_eq!(deck.deal(2).unwrap(), vec![ace, king]);

        let all: HashSet<Card> = deck.deal(50).unwrap().into_iter().collect();
        assert_eq!(all.len(), 50);
        assert!(!all.contains(&ace));
    }

    #[test]
    fn test_stacked_deals_top_in_order_after_reset() {
        let top = vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Heart),
            Card::new(Rank::Seven, Suit::Club),
        ];
        let mut deck = Deck::stacked(1, top.clone());
        assert_eq!(deck.remaining(), 52);
        assert_eq!(deck.deal(3).unwrap(), top);

        deck.reset();
        assert_eq!(deck.deal_one().unwrap(), top[0]);
        assert_eq!(deck.deal(2).unwrap(), top[1..].to_vec());

        let rest: HashSet<Card> = deck.deal(49).unwrap().into_iter().collect();
        assert_eq!(rest.len(), 49);
        assert!(top.iter().all(|card| !rest.contains(card)));
    }
}
