//! Session state for the birthday experience.
//!
//! This module provides the sequencing and plumbing around the games:
//!
//! - `screen` - Screen sequencer (which screen is showing?)
//! - `custom` - Creator-supplied name, hint, password and message
//! - `codec` - Shareable link encoding
//! - `storage` - Persisting custom data between visits
//! - `timer` - Screen-owned delayed actions
//! - `effects` - Sound and confetti triggers for the host
//! - `config` - Session tunables
//! - `session` - Everything above wired together
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                              Session                                  │
//! │                                                                       │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                 │
//! │  │  Sequencer   │  │  TimerQueue  │  │ EffectQueue  │                 │
//! │  │              │  │              │  │              │                 │
//! │  │ screen,      │  │ owner →      │  │ sounds,      │                 │
//! │  │ celebrating  │  │   deadline   │  │ confetti     │                 │
//! │  └──────────────┘  └──────────────┘  └──────────────┘                 │
//! │                                                                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐  │
//! │  │                      ScreenState sequence                        │  │
//! │  │                                                                  │  │
//! │  │  Create ─▶ Birthday ─▶ Intro ─▶ GuessNumber ─▶ Rps ─▶ Wordle     │  │
//! │  │     ▲         ▲                                          │       │  │
//! │  │     │         │           Complete ◀─ Congratulations ◀─ Password│  │
//! │  │     └─────────┴──── replay ───┘                                  │  │
//! │  └─────────────────────────────────────────────────────────────────┘  │
//! │                                                                       │
//! │  CustomGameData ◀── codec (link) / storage (KeyValueStore)            │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use birthday_games_state::state::{
//!     config::GameConfig,
//!     screen::ScreenState,
//!     session::Session,
//!     storage::MemoryStore,
//! };
//! use birthday_games_state::games::{Dictionary, RngSource};
//!
//! let mut session = Session::new(GameConfig::default(), Dictionary::fallback(), RngSource::seeded(7));
//! session.start("?screen=rps", &MemoryStore::new());
//! assert_eq!(session.screen(), ScreenState::Rps);
//! ```

pub mod codec;
pub mod config;
pub mod custom;
pub mod effects;
pub mod screen;
pub mod session;
pub mod storage;
pub mod timer;

// Re-export commonly used types
pub use codec::{DecodeError, LinkParams, ShareError};
pub use config::{ConfigError, GameConfig};
pub use custom::{CustomGameData, Field, FieldError};
pub use effects::{Effect, EffectQueue, SoundEffect};
pub use screen::{
    InvalidTransition, ReplayMode, ScreenEvent, ScreenState, Sequencer, Transition, UnknownScreen,
};
pub use session::{ActiveGame, KeypadSubmit, Session, SessionEntry, SessionError};
pub use storage::{KeyValueStore, MemoryStore, DEFAULT_STORAGE_KEY};
pub use timer::{ScheduledTimer, TimerAction, TimerId, TimerQueue};
