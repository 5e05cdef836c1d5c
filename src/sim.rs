use serde::{Deserialize, Serialize};

use crate::{
    deck::Deck,
    error::GameError,
    game::{Choice, RoundReport, Table},
    interface::{AutoPlayer, ScriptedInput, Silent},
    session::{Session, SessionConfig, Tally},
};

fn default_stand_on() -> u16 {
    17
}

fn default_progress_interval() -> u32 {
    10_000
}

fn default_name() -> String {
    crate::interface::DEFAULT_PLAYER_NAME.to_string()
}

#[derive(Debug, Deserialize)]
pub struct SimulationInput {
    pub rounds: u32,
    pub seed: u64,
    #[serde(default = "default_stand_on")]
    pub stand_on: u16,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub seed: u64,
    pub stand_on: u16,
    #[serde(flatten)]
    pub tally: Tally,
    pub win_rate: f64,
    pub tie_rate: f64,
}

/// One round with the player's choices given up front.
#[derive(Debug, Deserialize)]
pub struct ScriptedRoundInput {
    pub seed: u64,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

pub fn run(input: SimulationInput) -> Result<SimulationResult, GameError> {
    run_with_progress(input, |_current, _total| {})
}

pub fn run_with_progress<F>(input: SimulationInput, mut progress_cb: F) -> Result<SimulationResult, GameError>
where
    F: FnMut(u32, u32),
{
    let table = Table::new("Auto", Deck::new(Some(input.seed)));
    let player = AutoPlayer {
        stand_on: input.stand_on,
    };
    let config = SessionConfig {
        seed: Some(input.seed),
        rounds: Some(input.rounds),
        pause_between_rounds: false,
        ..SessionConfig::default()
    };
    let mut session = Session::new(table, player, Silent, config);

    let progress_interval = input.progress_interval.max(1);
    for round_index in 0..input.rounds {
        session.play_round()?;

        let completed = round_index + 1;
        if completed % progress_interval == 0 || completed == input.rounds {
            progress_cb(completed, input.rounds);
        }
    }

    let tally = session.tally().clone();
    let rate = |count: u32| {
        if tally.rounds > 0 {
            (count as f64 / tally.rounds as f64) * 100.0
        } else {
            0.0
        }
    };
    Ok(SimulationResult {
        seed: input.seed,
        stand_on: input.stand_on,
        win_rate: rate(tally.player_wins),
        tie_rate: rate(tally.ties),
        tally,
    })
}

pub fn play_scripted_round(input: ScriptedRoundInput) -> Result<RoundReport, GameError> {
    let table = Table::new(input.name, Deck::new(Some(input.seed)));
    let config = SessionConfig {
        seed: Some(input.seed),
        rounds: Some(1),
        pause_between_rounds: false,
        ..SessionConfig::default()
    };
    let mut session = Session::new(table, ScriptedInput::new(input.choices), Silent, config);
    session.play_round()
}
