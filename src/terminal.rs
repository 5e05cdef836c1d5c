use std::io::{BufRead, Write};

use colored::Colorize;

use crate::{
    error::GameError,
    game::{Choice, Effect, Outcome, Table},
    hand::{Hand, Seat},
    interface::{Input, Render, View, DEFAULT_PLAYER_NAME},
    session::Tally,
};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Line-oriented prompts over any reader/writer pair.
pub struct TerminalInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        TerminalInput { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        writeln!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

fn parse_choice(answer: &str) -> Option<Choice> {
    match answer.to_ascii_lowercase().as_str() {
        "h" | "hit" => Some(Choice::Hit),
        "s" | "stay" | "stand" => Some(Choice::Stay),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Input for TerminalInput<R, W> {
    fn prompt_choice(&mut self, _hand: &Hand) -> Result<Choice, GameError> {
        let mut answer = self.ask("Hit or Stay? (h/s)")?;
        loop {
            if let Some(choice) = parse_choice(&answer) {
                return Ok(choice);
            }
            answer = self.ask("Eh? Hit or Stay? (h/s)")?;
        }
    }

    fn prompt_name(&mut self) -> Result<String, GameError> {
        let name = self.ask("Enter your name:")?;
        if name.is_empty() {
            Ok(DEFAULT_PLAYER_NAME.to_string())
        } else {
            Ok(name)
        }
    }

    fn pause(&mut self) -> Result<(), GameError> {
        self.ask("Press Enter to continue").map(|_| ())
    }
}

pub struct TerminalRender<W> {
    writer: W,
    clear_screen: bool,
    color: bool,
    /// Blackjack and bust lines waiting for the next redraw, which would
    /// otherwise clear them away.
    held: Vec<(String, bool)>,
}

impl<W: Write> TerminalRender<W> {
    pub fn new(writer: W, clear_screen: bool, color: bool) -> Self {
        TerminalRender {
            writer,
            clear_screen,
            color,
            held: Vec::new(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn row(&mut self, name: &str, score: &str, cards: &str) -> Result<(), GameError> {
        writeln!(self.writer, "{name:<8} {score:<11} {cards:<20}")?;
        Ok(())
    }

    fn report(&mut self, text: String, good: bool) -> Result<(), GameError> {
        if self.clear_screen {
            self.held.push((text, good));
            Ok(())
        } else {
            self.line(&text, good)
        }
    }

    fn release_held(&mut self) -> Result<(), GameError> {
        for (text, good) in std::mem::take(&mut self.held) {
            self.line(&text, good)?;
        }
        Ok(())
    }

    fn line(&mut self, text: &str, good: bool) -> Result<(), GameError> {
        if !self.color {
            writeln!(self.writer, "{text}")?;
        } else if good {
            writeln!(self.writer, "{}", text.green().bold())?;
        } else {
            writeln!(self.writer, "{}", text.red().bold())?;
        }
        Ok(())
    }
}

impl<W: Write> Render for TerminalRender<W> {
    fn greet(&mut self) -> Result<(), GameError> {
        writeln!(self.writer, "** Welcome to Blackjack! **")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn show(&mut self, table: &Table, view: View) -> Result<(), GameError> {
        if self.clear_screen {
            write!(self.writer, "{CLEAR_SCREEN}")?;
        }
        self.row("Player", "Score", "Hand")?;
        writeln!(self.writer, "{}Hand: {}", "-".repeat(33), table.hand_number)?;

        let dealer = &table.dealer;
        if view.reveal_dealer {
            let score = dealer.hand.value().to_string();
            self.row(&dealer.name, &score, &dealer.hand.to_string())?;
        } else {
            self.row(&dealer.name, "??", "X X")?;
        }

        let player = &table.player;
        let score = if view.soft_values {
            player.hand.soft_value().to_string()
        } else {
            player.hand.value().to_string()
        };
        self.row(&player.name, &score, &player.hand.to_string())?;
        writeln!(self.writer)?;
        self.release_held()?;
        self.writer.flush()?;
        Ok(())
    }

    fn announce(&mut self, table: &Table, effect: &Effect) -> Result<(), GameError> {
        match effect {
            Effect::Blackjack(seat) => {
                let text = format!("{} has Blackjack!", table.participant(*seat).name);
                self.report(text, *seat == Seat::Player)
            }
            Effect::Busted(seat) => {
                let text = format!("{} has busted out!", table.participant(*seat).name);
                self.report(text, *seat == Seat::Dealer)
            }
            Effect::Settled(Outcome::PlayerWins) => {
                let text = format!("{} has won!", table.player.name);
                self.line(&text, true)
            }
            Effect::Settled(Outcome::DealerWins) => {
                let text = format!("{} has won!", table.dealer.name);
                self.line(&text, false)
            }
            Effect::Settled(Outcome::Tie) => {
                writeln!(self.writer, "Tie!")?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn summary(&mut self, tally: &Tally) -> Result<(), GameError> {
        self.release_held()?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} hands played: {} won, {} lost, {} tied",
            tally.rounds, tally.player_wins, tally.dealer_wins, tally.ties
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card::Card, deck::Deck, game::Dealing};
    use std::io::Cursor;

    fn input(text: &str) -> TerminalInput<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalInput::new(Cursor::new(text.as_bytes().to_vec()), Vec::new())
    }

    fn output(render: TerminalRender<Vec<u8>>) -> String {
        String::from_utf8(render.into_writer()).unwrap()
    }

    fn dealt_table(top: &[&str]) -> Table {
        let top: Vec<Card> = top.iter().map(|c| c.parse().unwrap()).collect();
        let mut table = Table::new("Ada", Deck::stacked(1, top));
        Dealing.deal(&mut table).unwrap();
        table
    }

    #[test]
    fn test_prompt_choice_accepts_short_and_long_answers() {
        let hand = Hand::new();
        let mut terminal = input("h\nStay\n");
        assert_eq!(terminal.prompt_choice(&hand).unwrap(), Choice::Hit);
        assert_eq!(terminal.prompt_choice(&hand).unwrap(), Choice::Stay);
    }

    #[test]
    fn test_prompt_choice_reprompts_on_garbage() {
        let hand = Hand::new();
        let mut terminal = input("x\n\ns\n");
        assert_eq!(terminal.prompt_choice(&hand).unwrap(), Choice::Stay);
        let written = String::from_utf8(terminal.into_writer()).unwrap();
        assert_eq!(
            written,
            "Hit or Stay? (h/s)\nEh? Hit or Stay? (h/s)\nEh? Hit or Stay? (h/s)\n"
        );
    }

    #[test]
    fn test_prompt_choice_eof_closes_input() {
        let mut terminal = input("");
        assert!(matches!(
            terminal.prompt_choice(&Hand::new()),
            Err(GameError::InputClosed)
        ));
    }

    #[test]
    fn test_prompt_name() {
        assert_eq!(input("Ada\n").prompt_name().unwrap(), "Ada");
        assert_eq!(input("\n").prompt_name().unwrap(), "Player");
    }

    #[test]
    fn test_show_hides_dealer_while_deciding() {
        let table = dealt_table(&["Ah", "6s", "Tc", "9d"]);
        let mut render = TerminalRender::new(Vec::new(), false, false);
        render.show(&table, View::DECIDING).unwrap();
        let text = output(render);
        assert!(text.contains("Dealer   ??          X X"));
        assert!(text.contains("Ada      17/7        Ah 6s"));
        assert!(text.contains(&format!("{}Hand: 1", "-".repeat(33))));
        assert!(!text.contains("Tc"));
    }

    #[test]
    fn test_show_reveals_dealer() {
        let table = dealt_table(&["Ah", "6s", "Tc", "9d"]);
        let mut render = TerminalRender::new(Vec::new(), false, false);
        render.show(&table, View::REVEALED).unwrap();
        let text = output(render);
        assert!(text.contains("Dealer   19          Tc 9d"));
        assert!(text.contains("Ada      17          Ah 6s"));
    }

    #[test]
    fn test_show_clears_screen() {
        let table = dealt_table(&["Ah", "6s", "Tc", "9d"]);
        let mut render = TerminalRender::new(Vec::new(), true, false);
        render.show(&table, View::DECIDING).unwrap();
        assert!(output(render).starts_with(CLEAR_SCREEN));
    }

    #[test]
    fn test_announcements() {
        let table = dealt_table(&["Ah", "Ks", "Tc", "9d"]);
        let mut render = TerminalRender::new(Vec::new(), false, false);
        render.announce(&table, &Effect::Blackjack(Seat::Player)).unwrap();
        render.announce(&table, &Effect::Busted(Seat::Dealer)).unwrap();
        render.announce(&table, &Effect::Shuffled).unwrap();
        render
            .announce(&table, &Effect::Settled(Outcome::PlayerWins))
            .unwrap();
        render
            .announce(&table, &Effect::Settled(Outcome::DealerWins))
            .unwrap();
        render.announce(&table, &Effect::Settled(Outcome::Tie)).unwrap();
        assert_eq!(
            output(render),
            "Ada has Blackjack!\nDealer has busted out!\nAda has won!\nDealer has won!\nTie!\n"
        );
    }

    #[test]
    fn test_clearing_render_holds_reports_until_redraw() {
        let table = dealt_table(&["Ah", "Ks", "Tc", "9d"]);
        let mut render = TerminalRender::new(Vec::new(), true, false);
        render.announce(&table, &Effect::Blackjack(Seat::Player)).unwrap();
        assert!(render.writer().is_empty());

        render.show(&table, View::REVEALED).unwrap();
        let text = output(render);
        let table_at = text.find("Dealer   19").unwrap();
        let report_at = text.find("Ada has Blackjack!").unwrap();
        assert!(report_at > table_at);
        assert!(!text[report_at..].contains(CLEAR_SCREEN));
    }

    #[test]
    fn test_summary() {
        let tally = Tally {
            rounds: 3,
            player_wins: 1,
            dealer_wins: 1,
            ties: 1,
            ..Tally::default()
        };
        let mut render = TerminalRender::new(Vec::new(), false, false);
        render.summary(&tally).unwrap();
        assert_eq!(output(render), "\n3 hands played: 1 won, 1 lost, 1 tied\n");
    }
}
