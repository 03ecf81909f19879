//! Mini-game evaluators.
//!
//! - `guess_number` - three tries to find a number from 1 to 10
//! - `rps` - rock-paper-scissors, first to three
//! - `wordle` - five-letter word in six rows
//! - `password` - hint-guided password entry
//! - `random` - injectable random source for every draw
//!
//! Each game owns only its own transient state. The session creates one
//! when its screen is entered and drops it when the screen is left.

pub mod guess_number;
pub mod password;
pub mod random;
pub mod rps;
pub mod wordle;

pub use guess_number::{GuessError, GuessNumberGame, GuessResult, GuessStatus};
pub use password::{PasswordCheck, PasswordGame};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use rps::{resolve, Choice, RoundOutcome, RoundResult, RpsError, RpsGame};
pub use wordle::{
    score_guess, Dictionary, DictionaryError, LetterState, Submission, Terminal, Tile,
    WordleError, WordleGame,
};

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOutcome {
    #[default]
    Pending,
    Won,
    Lost,
}

impl GameOutcome {
    /// Lowercase outcome name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// No further input accepted until retry.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
