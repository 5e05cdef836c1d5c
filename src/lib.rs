pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod interface;
pub mod score;
pub mod session;
pub mod sim;
pub mod terminal;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use error::GameError;
pub use game::{settle, Choice, Effect, Outcome, Round, RoundReport, Table};
pub use hand::{Hand, Participant, Seat};
pub use interface::{AutoPlayer, Input, Render, ScriptedInput, Silent, View};
pub use score::{hand_value, is_blackjack, is_bust, soft_value, SoftValue};
pub use session::{Session, SessionConfig, Tally};

#[cfg(feature = "wasm")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::sim;

    #[wasm_bindgen]
    pub fn play_round(params: &JsValue) -> Result<JsValue, JsValue> {
        console_error_panic_hook::set_once();
        let input: sim::ScriptedRoundInput = serde_wasm_bindgen::from_value(params.clone())
            .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

        let report = sim::play_scripted_round(input)
            .map_err(|err| JsValue::from_str(&format!("Round failed: {err}")))?;

        serde_wasm_bindgen::to_value(&report)
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }
}
