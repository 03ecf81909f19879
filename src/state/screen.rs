//! Screen sequencer.
//!
//! Holds the active screen and validates transitions between screens.
//!
//! # State Diagram
//!
//! ```text
//!  ┌────────┐   ┌──────────┐   ┌───────┐   ┌─────────────┐   ┌─────┐
//!  │ Create │──▶│ Birthday │──▶│ Intro │──▶│ GuessNumber │──▶│ Rps │──┐
//!  └────────┘   └──────────┘   └───────┘   └─────────────┘   └─────┘  │
//!      ▲             ▲                            ▲ retry       ▲     │
//!      │             │                                          retry │
//!      │ replay      │ replay                                         │
//!      │             │         ┌──────────┐   ┌──────────┐   ┌────────┘
//!      │             │         │ Password │◀──│  Wordle  │◀──┘
//!      │             │         └────┬─────┘   └──────────┘
//!      │             │              │ (celebrate)  ▲ retry
//!      │             │              ▼
//!      │             │      ┌─────────────────┐   ┌──────────┐
//!      └─────────────┴──────│ Congratulations │──▶│ Complete │
//!                           └─────────────────┘   └──────────┘
//! ```
//!
//! `advance` is total: `Complete` advances to itself.

use std::fmt;
use std::str::FromStr;

/// One stage of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenState {
    /// Custom content form
    #[default]
    Create,
    Birthday,
    Intro,
    GuessNumber,
    Rps,
    Wordle,
    Password,
    Congratulations,
    Complete,
}

impl ScreenState {
    /// Every screen in forward order.
    pub const ORDER: [ScreenState; 9] = [
        Self::Create,
        Self::Birthday,
        Self::Intro,
        Self::GuessNumber,
        Self::Rps,
        Self::Wordle,
        Self::Password,
        Self::Congratulations,
        Self::Complete,
    ];

    /// camelCase screen name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Birthday => "birthday",
            Self::Intro => "intro",
            Self::GuessNumber => "guessNumber",
            Self::Rps => "rps",
            Self::Wordle => "wordle",
            Self::Password => "password",
            Self::Congratulations => "congratulations",
            Self::Complete => "complete",
        }
    }

    /// Next screen in the fixed order.
    pub fn next(self) -> ScreenState {
        match self {
            Self::Create => Self::Birthday,
            Self::Birthday => Self::Intro,
            Self::Intro => Self::GuessNumber,
            Self::GuessNumber => Self::Rps,
            Self::Rps => Self::Wordle,
            Self::Wordle => Self::Password,
            Self::Password => Self::Congratulations,
            Self::Congratulations | Self::Complete => Self::Complete,
        }
    }

    /// Screens hosting a game that can be retried.
    pub fn is_game(&self) -> bool {
        matches!(
            self,
            Self::GuessNumber | Self::Rps | Self::Wordle | Self::Password
        )
    }

    /// Leaving this screen forward starts the celebration.
    pub fn celebrates_on_exit(&self) -> bool {
        matches!(self, Self::Password | Self::Congratulations)
    }

    /// Screens that offer "play again".
    pub fn allows_replay(&self) -> bool {
        matches!(
            self,
            Self::Birthday | Self::Congratulations | Self::Complete
        )
    }
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unknown screen name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScreen(pub String);

impl fmt::Display for UnknownScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown screen '{}'", self.0)
    }
}

impl std::error::Error for UnknownScreen {}

impl FromStr for ScreenState {
    type Err = UnknownScreen;

    /// Accepts camelCase, kebab-case and snake_case names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ORDER
            .iter()
            .copied()
            .find(|screen| screen.as_str().to_ascii_lowercase() == key)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

/// Where "play again" goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayMode {
    /// Back to the content form, custom data discarded
    Create,
    /// Back to the greeting, custom data kept
    #[default]
    Birthday,
}

impl ReplayMode {
    /// Screen the replay lands on.
    pub fn target(&self) -> ScreenState {
        match self {
            Self::Create => ScreenState::Create,
            Self::Birthday => ScreenState::Birthday,
        }
    }
}

/// Sequencer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Advance,
    Retry { screen: ScreenState },
    Replay { mode: ReplayMode },
}

/// Error when a screen transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: ScreenState,
    pub event: ScreenEvent,
    pub reason: &'static str,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} via {:?}: {}",
            self.from, self.event, self.reason
        )
    }
}

impl std::error::Error for InvalidTransition {}

/// A completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ScreenState,
    pub to: ScreenState,
    /// This transition started the celebration
    pub celebrate: bool,
}

/// Screen state machine.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    screen: ScreenState,
    celebrating: bool,
}

impl Sequencer {
    /// Start at `Create`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a specific screen (shared links, test entry).
    pub fn at(screen: ScreenState) -> Self {
        Self {
            screen,
            celebrating: false,
        }
    }

    /// Active screen.
    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    /// Celebration (confetti) is showing.
    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// Move to the next screen.
    pub fn advance(&mut self) -> Transition {
        let from = self.screen;
        let celebrate = from.celebrates_on_exit();
        if celebrate {
            self.celebrating = true;
        }
        self.screen = from.next();
        Transition {
            from,
            to: self.screen,
            celebrate,
        }
    }

    /// Return to a game screen so it restarts.
    pub fn retry(&mut self, screen: ScreenState) -> Result<Transition, InvalidTransition> {
        if !screen.is_game() {
            return Err(self.invalid(ScreenEvent::Retry { screen }, "Only games can be retried"));
        }
        let from = self.screen;
        self.screen = screen;
        Ok(Transition {
            from,
            to: screen,
            celebrate: false,
        })
    }

    /// Play again from the form or the greeting.
    pub fn replay(&mut self, mode: ReplayMode) -> Result<Transition, InvalidTransition> {
        if !self.screen.allows_replay() {
            return Err(self.invalid(
                ScreenEvent::Replay { mode },
                "Replay is only offered on the greeting and final screens",
            ));
        }
        let from = self.screen;
        self.screen = mode.target();
        self.celebrating = false;
        Ok(Transition {
            from,
            to: self.screen,
            celebrate: false,
        })
    }

    /// Apply any event.
    pub fn apply(&mut self, event: ScreenEvent) -> Result<Transition, InvalidTransition> {
        match event {
            ScreenEvent::Advance => Ok(self.advance()),
            ScreenEvent::Retry { screen } => self.retry(screen),
            ScreenEvent::Replay { mode } => self.replay(mode),
        }
    }

    fn invalid(&self, event: ScreenEvent, reason: &'static str) -> InvalidTransition {
        InvalidTransition {
            from: self.screen,
            event,
            reason,
        }
    }
}
