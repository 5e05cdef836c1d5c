//! One round of play as a state machine over an explicit [`Table`].
//!
//! Each state is its own type and each transition consumes it, so a stood
//! player cannot hit and a settled round cannot deal. Transitions mutate only
//! the table they are handed and describe what happened as [`Effect`]s.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    card::Card,
    deck::Deck,
    error::GameError,
    hand::{Hand, Participant, Seat},
};

pub const DEALER_STANDS_ON: u16 = 17;
pub const DEALER_NAME: &str = "Dealer";

/// Everything a round reads and writes.
pub struct Table {
    pub deck: Deck,
    pub player: Participant,
    pub dealer: Participant,
    pub hand_number: u32,
}

impl Table {
    pub fn new(player_name: impl Into<String>, deck: Deck) -> Self {
        Table {
            deck,
            player: Participant::new(player_name),
            dealer: Participant::new(DEALER_NAME),
            hand_number: 0,
        }
    }

    pub fn participant(&self, seat: Seat) -> &Participant {
        match seat {
            Seat::Player => &self.player,
            Seat::Dealer => &self.dealer,
        }
    }

    fn hand_mut(&mut self, seat: Seat) -> &mut Hand {
        match seat {
            Seat::Player => &mut self.player.hand,
            Seat::Dealer => &mut self.dealer.hand,
        }
    }

    fn draw(&mut self, seat: Seat, effects: &mut Vec<Effect>) -> Result<(), GameError> {
        let card = self.deck.deal_one()?;
        self.hand_mut(seat).add_card(card);
        effects.push(Effect::Dealt { seat, card });
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Hit,
    Stay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    PlayerWins,
    DealerWins,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Shuffled,
    Dealt { seat: Seat, card: Card },
    Blackjack(Seat),
    Busted(Seat),
    Stood(Seat),
    Revealed,
    Settled(Outcome),
}

pub enum Round {
    Dealing(Dealing),
    PlayerTurn(PlayerTurn),
    DealerTurn(DealerTurn),
    Settlement(Settlement),
    Complete(Outcome),
}

impl Round {
    pub fn start() -> Self {
        Round::Dealing(Dealing)
    }

    pub fn phase(&self) -> &'static str {
        match self {
            Round::Dealing(_) => "dealing",
            Round::PlayerTurn(_) => "player turn",
            Round::DealerTurn(_) => "dealer turn",
            Round::Settlement(_) => "settlement",
            Round::Complete(_) => "complete",
        }
    }
}

pub struct Transition {
    pub next: Round,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(next: Round, effects: Vec<Effect>) -> Self {
        for effect in &effects {
            debug!("{} <- {:?}", next.phase(), effect);
        }
        Transition { next, effects }
    }
}

pub struct Dealing;

impl Dealing {
    /// Reshuffles, deals two cards each and skips the player's decisions
    /// when they were dealt a blackjack.
    pub fn deal(self, table: &mut Table) -> Result<Transition, GameError> {
        table.hand_number += 1;
        info!("hand {} for {}", table.hand_number, table.player.name);

        table.deck.reset();
        table.player.hand.clear();
        table.dealer.hand.clear();
        let mut effects = vec![Effect::Shuffled];

        for (seat, cards) in [
            (Seat::Player, table.deck.deal(2)?),
            (Seat::Dealer, table.deck.deal(2)?),
        ] {
            for card in cards {
                table.hand_mut(seat).add_card(card);
                effects.push(Effect::Dealt { seat, card });
            }
        }

        if table.player.hand.is_blackjack() {
            effects.push(Effect::Blackjack(Seat::Player));
            return Ok(Transition::new(Round::DealerTurn(DealerTurn(())), effects));
        }
        Ok(Transition::new(Round::PlayerTurn(PlayerTurn(())), effects))
    }
}

pub struct PlayerTurn(());

impl PlayerTurn {
    pub fn choose(self, choice: Choice, table: &mut Table) -> Result<Transition, GameError> {
        let mut effects = Vec::new();
        match choice {
            Choice::Stay => {
                effects.push(Effect::Stood(Seat::Player));
                Ok(Transition::new(Round::DealerTurn(DealerTurn(())), effects))
            }
            Choice::Hit => {
                table.draw(Seat::Player, &mut effects)?;
                if table.player.hand.is_bust() {
                    effects.push(Effect::Busted(Seat::Player));
                    return Ok(Transition::new(Round::Settlement(Settlement(())), effects));
                }
                Ok(Transition::new(Round::PlayerTurn(self), effects))
            }
        }
    }
}

pub struct DealerTurn(());

impl DealerTurn {
    /// Draws until the dealer reaches the stand threshold.
    pub fn play(self, table: &mut Table) -> Result<Transition, GameError> {
        let mut effects = Vec::new();
        if table.dealer.hand.is_blackjack() {
            effects.push(Effect::Blackjack(Seat::Dealer));
        } else {
            while table.dealer.hand.value() < DEALER_STANDS_ON {
                table.draw(Seat::Dealer, &mut effects)?;
            }
            if table.dealer.hand.is_bust() {
                effects.push(Effect::Busted(Seat::Dealer));
            } else {
                effects.push(Effect::Stood(Seat::Dealer));
            }
        }
        Ok(Transition::new(Round::Settlement(Settlement(())), effects))
    }
}

pub struct Settlement(());

impl Settlement {
    pub fn settle(self, table: &Table) -> Transition {
        let outcome = settle(&table.player.hand, &table.dealer.hand);
        info!(
            "hand {} settled: {} vs {} -> {:?}",
            table.hand_number,
            table.player.hand.value(),
            table.dealer.hand.value(),
            outcome
        );
        Transition::new(
            Round::Complete(outcome),
            vec![Effect::Revealed, Effect::Settled(outcome)],
        )
    }
}

/// Decides a finished round. The blackjack rule is checked first so a
/// two-card 21 beats a drawn 21 instead of tying it.
pub fn settle(player: &Hand, dealer: &Hand) -> Outcome {
    let player_value = player.value();
    let dealer_value = dealer.value();
    let player_standing = !player.is_bust();

    if player.is_blackjack() && !dealer.is_blackjack() {
        Outcome::PlayerWins
    } else if player_standing && (player_value > dealer_value || dealer.is_bust()) {
        Outcome::PlayerWins
    } else if player_value == dealer_value {
        Outcome::Tie
    } else {
        Outcome::DealerWins
    }
}

/// The final state of a completed round.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub hand_number: u32,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_value: u16,
    pub dealer_value: u16,
    pub player_blackjack: bool,
    pub dealer_blackjack: bool,
    pub player_bust: bool,
    pub dealer_bust: bool,
    pub outcome: Outcome,
}

impl RoundReport {
    pub fn new(table: &Table, outcome: Outcome) -> Self {
        let player = &table.player.hand;
        let dealer = &table.dealer.hand;
        RoundReport {
            hand_number: table.hand_number,
            player_cards: player.cards().to_vec(),
            dealer_cards: dealer.cards().to_vec(),
            player_value: player.value(),
            dealer_value: dealer.value(),
            player_blackjack: player.is_blackjack(),
            dealer_blackjack: dealer.is_blackjack(),
            player_bust: player.is_bust(),
            dealer_bust: dealer.is_bust(),
            outcome,
        }
    }
}
