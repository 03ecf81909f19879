//! Rock-paper-scissors, first to three.
//!
//! Draws leave the score alone but still move on to a fresh round, so the
//! round counter advances after every round that does not end the game.

use super::random::RandomSource;
use super::GameOutcome;

/// Round wins (or losses) that end the game.
pub const ROUNDS_TO_FINISH: u8 = 3;

/// A hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// Every hand, in draw order.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Lowercase hand name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }

    /// The hand this one defeats.
    pub fn beats(&self) -> Choice {
        match self {
            Self::Rock => Self::Scissors,
            Self::Scissors => Self::Paper,
            Self::Paper => Self::Rock,
        }
    }

    fn draw(rng: &mut dyn RandomSource) -> Choice {
        let len = Self::ALL.len();
        Self::ALL[rng.pick_index(len) % len]
    }
}

impl std::str::FromStr for Choice {
    type Err = RpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Self::Rock),
            "paper" | "p" => Ok(Self::Paper),
            "scissors" | "s" => Ok(Self::Scissors),
            _ => Err(RpsError::UnknownChoice(s.to_string())),
        }
    }
}

/// Outcome of a single round from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Win,
    Lose,
    Draw,
}

impl RoundOutcome {
    /// Lowercase round outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Draw => "draw",
        }
    }
}

/// Resolve one round.
pub fn resolve(player: Choice, computer: Choice) -> RoundOutcome {
    if player == computer {
        RoundOutcome::Draw
    } else if player.beats() == computer {
        RoundOutcome::Win
    } else {
        RoundOutcome::Lose
    }
}

/// Result of [`RpsGame::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub player: Choice,
    pub computer: Choice,
    pub outcome: RoundOutcome,
    pub wins: u8,
    pub losses: u8,
    /// Round number this result was played in
    pub round: u8,
    pub game: GameOutcome,
}

/// Rock-paper-scissors errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpsError {
    GameOver,
    UnknownChoice(String),
}

impl std::fmt::Display for RpsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GameOver => write!(f, "Game is over, retry to play again"),
            Self::UnknownChoice(s) => write!(f, "Unknown choice '{}'", s),
        }
    }
}

impl std::error::Error for RpsError {}

/// Score keeping for one playthrough.
#[derive(Debug, Clone)]
pub struct RpsGame {
    wins: u8,
    losses: u8,
    round: u8,
    last: Option<RoundResult>,
}

impl Default for RpsGame {
    fn default() -> Self {
        Self::new()
    }
}

impl RpsGame {
    pub fn new() -> Self {
        Self {
            wins: 0,
            losses: 0,
            round: 1,
            last: None,
        }
    }

    /// Rounds won.
    pub fn wins(&self) -> u8 {
        self.wins
    }

    /// Rounds lost.
    pub fn losses(&self) -> u8 {
        self.losses
    }

    /// Current round (1-indexed).
    pub fn round(&self) -> u8 {
        self.round
    }

    /// Most recent round, if any.
    pub fn last_round(&self) -> Option<&RoundResult> {
        self.last.as_ref()
    }

    /// Won at three wins, lost at three losses.
    pub fn outcome(&self) -> GameOutcome {
        if self.wins >= ROUNDS_TO_FINISH {
            GameOutcome::Won
        } else if self.losses >= ROUNDS_TO_FINISH {
            GameOutcome::Lost
        } else {
            GameOutcome::Pending
        }
    }

    /// Play a round against a freshly drawn computer hand.
    pub fn play(
        &mut self,
        player: Choice,
        rng: &mut dyn RandomSource,
    ) -> Result<RoundResult, RpsError> {
        if self.outcome().is_terminal() {
            return Err(RpsError::GameOver);
        }

        let computer = Choice::draw(rng);
        let outcome = resolve(player, computer);
        match outcome {
            RoundOutcome::Win => self.wins += 1,
            RoundOutcome::Lose => self.losses += 1,
            RoundOutcome::Draw => {}
        }

        let result = RoundResult {
            player,
            computer,
            outcome,
            wins: self.wins,
            losses: self.losses,
            round: self.round,
            game: self.outcome(),
        };

        if !result.game.is_terminal() {
            self.round = self.round.saturating_add(1);
        }
        self.last = Some(result);

        Ok(result)
    }

    /// Reset score and round.
    pub fn retry(&mut self) {
        *self = Self::new();
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "wins": self.wins,
            "losses": self.losses,
            "round": self.round,
            "outcome": self.outcome().as_str()
        });
        if let Some(last) = &self.last {
            obj["last_round"] = serde_json::json!({
                "player": last.player.as_str(),
                "computer": last.computer.as_str(),
                "outcome": last.outcome.as_str()
            });
        }
        obj
    }
}
