use std::io;

use anyhow::Context;
use blackjack_table::{
    sim::{self, SimulationInput},
    terminal::{TerminalInput, TerminalRender},
    Deck, Input, Session, SessionConfig, Table,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blackjack", about = "Single-deck blackjack against the house dealer")]
struct Cli {
    /// Player name; asked for at startup when omitted
    #[arg(long)]
    name: Option<String>,

    /// Seed for a reproducible deck
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,

    /// Stop after this many hands
    #[arg(long)]
    rounds: Option<u32>,

    /// Keep previous output instead of clearing the screen
    #[arg(long)]
    no_clear: bool,

    #[arg(long)]
    no_color: bool,

    /// Deal the next hand without waiting for Enter
    #[arg(long)]
    no_pause: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Autoplay hands with a threshold player and print the results as JSON
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        rounds: u32,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// The autoplayer hits below this total
        #[arg(long, default_value_t = 17)]
        stand_on: u16,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Some(Command::Simulate {
        rounds,
        seed,
        stand_on,
    }) = cli.command
    {
        let result = sim::run(SimulationInput {
            rounds,
            seed,
            stand_on,
            progress_interval: rounds.max(1),
        })
        .context("simulation failed")?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let config = SessionConfig {
        seed: cli.seed,
        rounds: cli.rounds,
        clear_screen: !cli.no_clear,
        color: !cli.no_color,
        pause_between_rounds: !cli.no_pause,
    };
    let input = TerminalInput::new(io::stdin().lock(), io::stdout());
    let render = TerminalRender::new(io::stdout(), config.clear_screen, config.color);

    let mut session = match cli.name {
        Some(name) => {
            let table = Table::new(name, Deck::new(config.seed));
            Session::new(table, input, render, config)
        }
        None => open_session(input, render, config)?,
    };
    session.run().context("game aborted")?;
    Ok(())
}

fn open_session<I: Input>(
    input: I,
    render: TerminalRender<io::Stdout>,
    config: SessionConfig,
) -> anyhow::Result<Session<I, TerminalRender<io::Stdout>>> {
    match Session::open(input, render, config) {
        Ok(session) => Ok(session),
        Err(blackjack_table::GameError::InputClosed) => {
            anyhow::bail!("no player name given")
        }
        Err(err) => Err(err.into()),
    }
}
