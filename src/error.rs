use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("cannot deal {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },

    #[error("invalid card notation: {0:?}")]
    InvalidCard(String),

    /// The input source reached end of file.
    #[error("input closed")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
