//! Hand valuation with flexible aces.
//!
//! An ace counts as 11 or 1. Every reachable total is listed, and both the
//! comparison value and the player-facing display are read off that list.

use std::fmt;

use serde::Serialize;

use crate::card::Card;

pub const BLACKJACK: u16 = 21;

/// Every total a hand can take, largest first.
///
/// With `a` aces there are `a + 1` totals: each ace demoted from 11 to 1
/// lowers the sum by ten.
pub fn totals(cards: &[Card]) -> Vec<u16> {
    let sum: u16 = cards.iter().map(Card::value).sum();
    let aces = cards.iter().filter(|card| card.is_ace()).count() as u16;
    (0..=aces).map(|demoted| sum - 10 * demoted).collect()
}

/// The single value used for bust checks and settlement: the best total
/// that does not bust, or the smallest total when all of them do.
pub fn hand_value(cards: &[Card]) -> u16 {
    let totals = totals(cards);
    totals
        .iter()
        .copied()
        .find(|&total| total <= BLACKJACK)
        .or_else(|| totals.last().copied())
        .unwrap_or(0)
}

/// The totals worth showing to the player while they are still deciding.
/// A hand that can make 21 shows only 21.
pub fn soft_value(cards: &[Card]) -> SoftValue {
    let totals = totals(cards);
    let lowest = totals.last().copied().unwrap_or(0);
    if lowest > BLACKJACK {
        return SoftValue(vec![lowest]);
    }
    if totals.contains(&BLACKJACK) {
        return SoftValue(vec![BLACKJACK]);
    }
    let mut live: Vec<u16> = totals
        .into_iter()
        .filter(|&total| total <= BLACKJACK)
        .collect();
    live.dedup();
    SoftValue(live)
}

pub fn is_bust(cards: &[Card]) -> bool {
    hand_value(cards) > BLACKJACK
}

pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == BLACKJACK
}

/// Distinct live totals in descending order. Renders as `17/7`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoftValue(Vec<u16>);

impl SoftValue {
    pub fn totals(&self) -> &[u16] {
        &self.0
    }
}

impl fmt::Display for SoftValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(u16::to_string).collect();
        f.write_str(&rendered.join("/"))
    }
}
