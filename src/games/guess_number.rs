//! Guess-the-number game.
//!
//! The player has three attempts to find a secret number between 1 and 10.
//! Misses are answered with a higher/lower hint; the third miss reveals the
//! secret and ends the game.

use super::random::RandomSource;
use super::GameOutcome;

/// Smallest number that can be guessed.
pub const MIN_NUMBER: u8 = 1;

/// Largest number that can be guessed.
pub const MAX_NUMBER: u8 = 10;

/// Attempts allowed per playthrough.
pub const MAX_ATTEMPTS: u8 = 3;

/// Answer to a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessStatus {
    /// Secret is larger than the guess
    Higher,
    /// Secret is smaller than the guess
    Lower,
    /// Guess matched, game won
    Correct,
    /// Third miss, game lost
    Exhausted { secret: u8 },
}

impl GuessStatus {
    /// Lowercase status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Higher => "higher",
            Self::Lower => "lower",
            Self::Correct => "correct",
            Self::Exhausted { .. } => "exhausted",
        }
    }

    /// True once the game is decided.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Correct | Self::Exhausted { .. })
    }
}

/// Result of [`GuessNumberGame::guess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessResult {
    pub status: GuessStatus,
    pub attempts_used: u8,
}

/// Guess errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    /// Number outside `MIN_NUMBER..=MAX_NUMBER`
    OutOfRange(u8),
    /// Game already won or lost
    GameOver,
}

impl std::fmt::Display for GuessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(n) => write!(
                f,
                "Guess {} is outside {}..={}",
                n, MIN_NUMBER, MAX_NUMBER
            ),
            Self::GameOver => write!(f, "Game is over, retry to play again"),
        }
    }
}

impl std::error::Error for GuessError {}

/// Guess-the-number state for one playthrough.
#[derive(Debug, Clone)]
pub struct GuessNumberGame {
    secret: u8,
    attempts_used: u8,
    outcome: GameOutcome,
}

impl GuessNumberGame {
    /// Start a game with a freshly drawn secret.
    pub fn new(rng: &mut dyn RandomSource) -> Self {
        Self::with_secret(draw_secret(rng))
    }

    /// Start a game with a known secret.
    pub fn with_secret(secret: u8) -> Self {
        Self {
            secret: secret.clamp(MIN_NUMBER, MAX_NUMBER),
            attempts_used: 0,
            outcome: GameOutcome::Pending,
        }
    }

    /// Guesses made so far.
    pub fn attempts_used(&self) -> u8 {
        self.attempts_used
    }

    /// Guesses still available.
    pub fn attempts_left(&self) -> u8 {
        MAX_ATTEMPTS - self.attempts_used
    }

    /// Where the game stands.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Secret value, only once the game is over.
    pub fn revealed_secret(&self) -> Option<u8> {
        self.outcome.is_terminal().then_some(self.secret)
    }

    /// Submit a guess.
    pub fn guess(&mut self, n: u8) -> Result<GuessResult, GuessError> {
        if self.outcome.is_terminal() {
            return Err(GuessError::GameOver);
        }
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
            return Err(GuessError::OutOfRange(n));
        }

        self.attempts_used += 1;

        let status = if n == self.secret {
            self.outcome = GameOutcome::Won;
            GuessStatus::Correct
        } else if self.attempts_used >= MAX_ATTEMPTS {
            self.outcome = GameOutcome::Lost;
            GuessStatus::Exhausted {
                secret: self.secret,
            }
        } else if self.secret > n {
            GuessStatus::Higher
        } else {
            GuessStatus::Lower
        };

        Ok(GuessResult {
            status,
            attempts_used: self.attempts_used,
        })
    }

    /// Redraw the secret and reset attempts.
    pub fn retry(&mut self, rng: &mut dyn RandomSource) {
        *self = Self::new(rng);
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "attempts_used": self.attempts_used,
            "max_attempts": MAX_ATTEMPTS,
            "outcome": self.outcome.as_str()
        });
        if let Some(secret) = self.revealed_secret() {
            obj["secret"] = serde_json::json!(secret);
        }
        obj
    }
}

fn draw_secret(rng: &mut dyn RandomSource) -> u8 {
    rng.pick_in_range(MIN_NUMBER, MAX_NUMBER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::random::ScriptedSource;
    use pretty_assertions::assert_eq;

    fn statuses(game: &mut GuessNumberGame, guesses: &[u8]) -> Vec<GuessStatus> {
        guesses
            .iter()
            .map(|n| game.guess(*n).unwrap().status)
            .collect()
    }

    #[test]
    fn test_win_on_third_attempt() {
        let mut game = GuessNumberGame::with_secret(7);

        let results = statuses(&mut game, &[3, 9, 7]);

        assert_eq!(
            results,
            vec![GuessStatus::Higher, GuessStatus::Lower, GuessStatus::Correct]
        );
        assert_eq!(game.outcome(), GameOutcome::Won);
        assert_eq!(game.attempts_used(), 3);
    }

    #[test]
    fn test_lose_after_three_misses() {
        let mut game = GuessNumberGame::with_secret(7);

        let results = statuses(&mut game, &[1, 2, 3]);

        assert_eq!(
            results,
            vec![
                GuessStatus::Higher,
                GuessStatus::Higher,
                GuessStatus::Exhausted { secret: 7 },
            ]
        );
        assert_eq!(game.outcome(), GameOutcome::Lost);
        assert_eq!(game.revealed_secret(), Some(7));
    }

    #[test]
    fn test_guesses_rejected_after_terminal() {
        let mut game = GuessNumberGame::with_secret(4);
        game.guess(4).unwrap();

        assert_eq!(game.guess(4), Err(GuessError::GameOver));
        assert_eq!(game.attempts_used(), 1);
    }

    #[test]
    fn test_out_of_range_consumes_nothing() {
        let mut game = GuessNumberGame::with_secret(4);

        assert_eq!(game.guess(0), Err(GuessError::OutOfRange(0)));
        assert_eq!(game.guess(11), Err(GuessError::OutOfRange(11)));
        assert_eq!(game.attempts_used(), 0);
        assert_eq!(game.revealed_secret(), None);
    }

    #[test]
    fn test_retry_redraws_and_resets() {
        let mut rng = ScriptedSource::new([6, 1]);
        let mut game = GuessNumberGame::new(&mut rng);
        game.guess(1).unwrap();
        game.guess(2).unwrap();
        game.guess(3).unwrap();
        assert_eq!(game.revealed_secret(), Some(7));

        game.retry(&mut rng);

        assert_eq!(game.attempts_used(), 0);
        assert_eq!(game.outcome(), GameOutcome::Pending);
        assert_eq!(game.guess(2).unwrap().status, GuessStatus::Correct);
    }

    #[test]
    fn test_to_json_hides_secret_while_pending() {
        let mut game = GuessNumberGame::with_secret(5);
        assert!(game.to_json().get("secret").is_none());

        game.guess(5).unwrap();
        assert_eq!(game.to_json()["secret"], 5);
        assert_eq!(game.to_json()["outcome"], "won");
    }
}
