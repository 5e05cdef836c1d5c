use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    deck::Deck,
    error::GameError,
    game::{Outcome, Round, RoundReport, Table},
    interface::{Input, Render, View},
};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rounds: Option<u32>,
    #[serde(default = "default_true")]
    pub clear_screen: bool,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_true")]
    pub pause_between_rounds: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            seed: None,
            rounds: None,
            clear_screen: true,
            color: true,
            pause_between_rounds: true,
        }
    }
}

/// Running results for the session. Counts rounds, not money.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub rounds: u32,
    pub player_wins: u32,
    pub dealer_wins: u32,
    pub ties: u32,
    pub player_blackjacks: u32,
    pub player_busts: u32,
    pub dealer_busts: u32,
}

impl Tally {
    pub fn record(&mut self, report: &RoundReport) {
        self.rounds += 1;
        match report.outcome {
            Outcome::PlayerWins => self.player_wins += 1,
            Outcome::DealerWins => self.dealer_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
        if report.player_blackjack {
            self.player_blackjacks += 1;
        }
        if report.player_bust {
            self.player_busts += 1;
        }
        if report.dealer_bust {
            self.dealer_busts += 1;
        }
    }
}

pub struct Session<I, R> {
    pub table: Table,
    input: I,
    render: R,
    config: SessionConfig,
    tally: Tally,
}

impl<I: Input, R: Render> Session<I, R> {
    pub fn new(table: Table, input: I, render: R, config: SessionConfig) -> Self {
        Session {
            table,
            input,
            render,
            config,
            tally: Tally::default(),
        }
    }

    /// Greets the player and asks their name before the first round.
    pub fn open(mut input: I, mut render: R, config: SessionConfig) -> Result<Self, GameError> {
        render.greet()?;
        let name = input.prompt_name()?;
        let table = Table::new(name, Deck::new(config.seed));
        Ok(Self::new(table, input, render, config))
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Plays one round from a fresh deal to settlement.
    pub fn play_round(&mut self) -> Result<RoundReport, GameError> {
        let mut round = Round::start();
        let outcome = loop {
            let transition = match round {
                Round::Dealing(dealing) => dealing.deal(&mut self.table)?,
                Round::PlayerTurn(turn) => {
                    self.render.show(&self.table, View::DECIDING)?;
                    let choice = self.input.prompt_choice(&self.table.player.hand)?;
                    turn.choose(choice, &mut self.table)?
                }
                Round::DealerTurn(turn) => turn.play(&mut self.table)?,
                Round::Settlement(settlement) => {
                    self.render.show(&self.table, View::REVEALED)?;
                    settlement.settle(&self.table)
                }
                Round::Complete(outcome) => break outcome,
            };
            for effect in &transition.effects {
                self.render.announce(&self.table, effect)?;
            }
            round = transition.next;
        };

        let report = RoundReport::new(&self.table, outcome);
        self.tally.record(&report);
        Ok(report)
    }

    /// Plays rounds until the round limit is reached or input closes.
    pub fn run(&mut self) -> Result<Tally, GameError> {
        loop {
            if let Some(limit) = self.config.rounds {
                if self.tally.rounds >= limit {
                    break;
                }
            }
            match self.play_round() {
                Ok(_) => {}
                Err(GameError::InputClosed) => {
                    info!("input closed mid-round, ending session");
                    break;
                }
                Err(err) => return Err(err),
            }
            let last_round = self.config.rounds == Some(self.tally.rounds);
            if self.config.pause_between_rounds && !last_round {
                match self.input.pause() {
                    Ok(()) => {}
                    Err(GameError::InputClosed) => break,
                    Err(err) => return Err(err),
                }
            }
        }
        info!("session over after {} rounds", self.tally.rounds);
        self.render.summary(&self.tally)?;
        Ok(self.tally.clone())
    }
}
