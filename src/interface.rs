//! Contracts between the round and whatever is driving it.

use std::collections::VecDeque;

use crate::{
    error::GameError,
    game::{Choice, Effect, Table},
    hand::Hand,
    session::Tally,
};

pub const DEFAULT_PLAYER_NAME: &str = "Player";

pub trait Input {
    /// Blocks until the player decides. Unrecognized answers are re-asked
    /// here and never reach the round.
    fn prompt_choice(&mut self, hand: &Hand) -> Result<Choice, GameError>;

    fn prompt_name(&mut self) -> Result<String, GameError> {
        Ok(DEFAULT_PLAYER_NAME.to_string())
    }

    fn pause(&mut self) -> Result<(), GameError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub reveal_dealer: bool,
    pub soft_values: bool,
}

impl View {
    /// The player's view while deciding: dealer hidden, live totals shown.
    pub const DECIDING: View = View {
        reveal_dealer: false,
        soft_values: true,
    };

    pub const REVEALED: View = View {
        reveal_dealer: true,
        soft_values: false,
    };
}

pub trait Render {
    fn greet(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn show(&mut self, table: &Table, view: View) -> Result<(), GameError>;

    fn announce(&mut self, table: &Table, effect: &Effect) -> Result<(), GameError>;

    fn summary(&mut self, _tally: &Tally) -> Result<(), GameError> {
        Ok(())
    }
}

/// Replays fixed choices, then stays once they run out.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    choices: VecDeque<Choice>,
    prompts: usize,
}

impl ScriptedInput {
    pub fn new(choices: impl IntoIterator<Item = Choice>) -> Self {
        ScriptedInput {
            choices: choices.into_iter().collect(),
            prompts: 0,
        }
    }

    /// How many times the player was asked.
    pub fn prompts(&self) -> usize {
        self.prompts
    }
}

impl Input for ScriptedInput {
    fn prompt_choice(&mut self, _hand: &Hand) -> Result<Choice, GameError> {
        self.prompts += 1;
        Ok(self.choices.pop_front().unwrap_or(Choice::Stay))
    }
}

/// Hits below a fixed total.
#[derive(Debug, Clone, Copy)]
pub struct AutoPlayer {
    pub stand_on: u16,
}

impl Input for AutoPlayer {
    fn prompt_choice(&mut self, hand: &Hand) -> Result<Choice, GameError> {
        if hand.value() < self.stand_on {
            Ok(Choice::Hit)
        } else {
            Ok(Choice::Stay)
        }
    }
}

/// Renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Render for Silent {
    fn show(&mut self, _table: &Table, _view: View) -> Result<(), GameError> {
        Ok(())
    }

    fn announce(&mut self, _table: &Table, _effect: &Effect) -> Result<(), GameError> {
        Ok(())
    }
}
