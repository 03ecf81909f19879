//! Birthday Games State Library
//!
//! This crate provides the state behind a shareable birthday greeting: a
//! fixed run of screens with four mini-games, personalised by whoever made
//! the link.
//!
//! # Overview
//!
//! - **Screen Sequencer** - Walks create → greeting → intro → games →
//!   congratulations, with validated retry and replay transitions.
//!
//! - **Mini-Games** - Guess-the-number, rock-paper-scissors, Wordle and a
//!   password screen, each a small evaluator with its own rules.
//!
//! - **Custom Data** - Name, hint, password and secret message, validated,
//!   persisted to a key-value store and carried in a base64 link token.
//!
//! - **Session** - Wires the above together, owns screen timers, and queues
//!   sound and confetti effects for the host.
//!
//! # Design Principles
//!
//! 1. **No I/O** - Hosts supply the store, the clock and the random source.
//!
//! 2. **Deterministic under test** - Every random draw goes through
//!    [`games::RandomSource`], every deadline through a caller-supplied `now`.
//!
//! 3. **Serialization-ready** - Games and sessions render to JSON for clients.
//!
//! # Example
//!
//! ```rust
//! use birthday_games_state::games::{Dictionary, ScriptedSource};
//! use birthday_games_state::state::{
//!     CustomGameData, GameConfig, MemoryStore, ScreenState, Session,
//! };
//!
//! let mut store = MemoryStore::new();
//! // First draw picks the secret number: 1 + 4 = 5
//! let mut session = Session::new(
//!     GameConfig::default(),
//!     Dictionary::fallback(),
//!     ScriptedSource::new([4]),
//! );
//!
//! session.start("", &store);
//! let form = CustomGameData::new("Ada", "First programmer", "ENGINE", "Happy birthday!");
//! session.play(&form, &mut store).unwrap();
//! assert_eq!(session.screen(), ScreenState::Birthday);
//!
//! session.advance();
//! session.advance();
//! let now = chrono::Utc::now();
//! session.guess_number(5, now).unwrap();
//!
//! let later = now + chrono::Duration::seconds(3);
//! session.tick(later);
//! assert_eq!(session.screen(), ScreenState::Rps);
//! ```

pub mod games;
pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
