//! Session orchestration.
//!
//! A [`Session`] owns the sequencer, the custom data, and whichever game is
//! mounted on the active screen. Games are created when their screen is
//! entered and dropped when it is left; timers scheduled by a screen are
//! cancelled at the same moment.

use std::fmt;

use chrono::{DateTime, Utc};

use super::codec::{self, DecodeError, LinkParams, ShareError};
use super::config::GameConfig;
use super::custom::{CustomGameData, FieldError};
use super::effects::{Effect, EffectQueue, SoundEffect};
use super::screen::{InvalidTransition, ReplayMode, ScreenState, Sequencer, Transition};
use super::storage::{self, KeyValueStore};
use super::timer::{TimerAction, TimerQueue};
use crate::games::{
    Choice, Dictionary, GameOutcome, GuessError, GuessNumberGame, GuessResult, GuessStatus,
    PasswordCheck, PasswordGame, RandomSource, RoundOutcome, RoundResult, RpsError, RpsGame,
    Submission, Terminal, WordleError, WordleGame,
};

/// How a session was entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEntry {
    /// A shared link decoded; starts at the greeting
    SharedLink,
    /// A shared link was present but unusable; starts at the form
    RejectedLink(DecodeError),
    /// Direct navigation to a named screen
    TestScreen(ScreenState),
    /// Plain start at the form
    Default,
}

/// Game mounted on the active screen.
#[derive(Debug, Clone)]
pub enum ActiveGame {
    GuessNumber(GuessNumberGame),
    Rps(RpsGame),
    Wordle(WordleGame),
    Password(PasswordGame),
}

/// Result of submitting the mounted keypad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeypadSubmit {
    Wordle(Submission),
    Password(PasswordCheck),
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Input meant for another screen
    WrongScreen {
        expected: ScreenState,
        actual: ScreenState,
    },
    /// Key input while no Wordle or password screen is active
    NoKeypad(ScreenState),
    Transition(InvalidTransition),
    Field(FieldError),
    Share(ShareError),
    Guess(GuessError),
    Rps(RpsError),
    Wordle(WordleError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongScreen { expected, actual } => {
                write!(f, "Expected screen {} but {} is active", expected, actual)
            }
            Self::NoKeypad(screen) => write!(f, "Screen {} takes no key input", screen),
            Self::Transition(e) => write!(f, "{}", e),
            Self::Field(e) => write!(f, "{}", e),
            Self::Share(e) => write!(f, "{}", e),
            Self::Guess(e) => write!(f, "{}", e),
            Self::Rps(e) => write!(f, "{}", e),
            Self::Wordle(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<InvalidTransition> for SessionError {
    fn from(e: InvalidTransition) -> Self {
        Self::Transition(e)
    }
}

impl From<FieldError> for SessionError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

impl From<ShareError> for SessionError {
    fn from(e: ShareError) -> Self {
        Self::Share(e)
    }
}

impl From<GuessError> for SessionError {
    fn from(e: GuessError) -> Self {
        Self::Guess(e)
    }
}

impl From<RpsError> for SessionError {
    fn from(e: RpsError) -> Self {
        Self::Rps(e)
    }
}

impl From<WordleError> for SessionError {
    fn from(e: WordleError) -> Self {
        Self::Wordle(e)
    }
}

/// One playthrough of the experience.
pub struct Session {
    config: GameConfig,
    dictionary: Dictionary,
    rng: Box<dyn RandomSource>,
    sequencer: Sequencer,
    custom: Option<CustomGameData>,
    active: Option<ActiveGame>,
    timers: TimerQueue,
    effects: EffectQueue,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("screen", &self.sequencer.screen())
            .field("custom", &self.custom)
            .field("active", &self.active)
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session parked on the form.
    pub fn new(
        config: GameConfig,
        dictionary: Dictionary,
        rng: impl RandomSource + 'static,
    ) -> Self {
        Self {
            config,
            dictionary,
            rng: Box::new(rng),
            sequencer: Sequencer::new(),
            custom: None,
            active: None,
            timers: TimerQueue::new(),
            effects: EffectQueue::new(),
        }
    }

    /// Resolve the entry screen from the page query and stored data.
    ///
    /// A decodable shared link wins and opens the greeting. A link that
    /// fails to decode is logged and the form is shown. Without a link, a
    /// named test screen is honored. Stored data is resumed unless a shared
    /// link supplied its own.
    pub fn start(&mut self, query: &str, store: &dyn KeyValueStore) -> SessionEntry {
        let params = LinkParams::from_query(query, &self.config.share_param, &self.config.screen_param);

        let (entry, screen, custom) = match params.share_token {
            Some(token) => match codec::decode(&token) {
                Ok(data) => (SessionEntry::SharedLink, ScreenState::Birthday, Some(data)),
                Err(err) => {
                    tracing::warn!(kind = err.kind(), error = %err, "shared game link rejected");
                    (
                        SessionEntry::RejectedLink(err),
                        ScreenState::Create,
                        self.stored(store),
                    )
                }
            },
            None => match params.screen.as_deref().map(str::parse::<ScreenState>) {
                Some(Ok(screen)) => (SessionEntry::TestScreen(screen), screen, self.stored(store)),
                Some(Err(err)) => {
                    tracing::warn!(error = %err, "ignoring test screen parameter");
                    (SessionEntry::Default, ScreenState::Create, self.stored(store))
                }
                None => (SessionEntry::Default, ScreenState::Create, self.stored(store)),
            },
        };

        let from = self.sequencer.screen();
        self.sequencer = Sequencer::at(screen);
        self.custom = custom;
        self.timers = TimerQueue::new();
        self.effects = EffectQueue::new();
        self.active = self.mount(screen);
        tracing::info!(?entry, %from, to = %screen, "session started");

        entry
    }

    fn stored(&self, store: &dyn KeyValueStore) -> Option<CustomGameData> {
        storage::load_custom_data(store, &self.config.storage_key)
    }

    /// Active screen.
    pub fn screen(&self) -> ScreenState {
        self.sequencer.screen()
    }

    /// True while confetti should show.
    pub fn is_celebrating(&self) -> bool {
        self.sequencer.is_celebrating()
    }

    /// Session tunables.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Word list used by Wordle.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Custom data in effect, if any.
    pub fn custom_data(&self) -> Option<&CustomGameData> {
        self.custom.as_ref()
    }

    /// Game mounted on the active screen.
    pub fn active_game(&self) -> Option<&ActiveGame> {
        self.active.as_ref()
    }

    /// Name shown on the greeting.
    pub fn display_name(&self) -> &str {
        match &self.custom {
            Some(data) if !data.name.is_empty() => &data.name,
            _ => &self.config.default_name,
        }
    }

    /// Hint shown on the password screen.
    pub fn password_hint(&self) -> &str {
        match &self.custom {
            Some(data) if !data.hint.is_empty() => &data.hint,
            _ => &self.config.default_hint,
        }
    }

    /// Message revealed on the congratulations screen.
    pub fn secret_message(&self) -> Option<&str> {
        self.custom
            .as_ref()
            .map(|data| data.secret_message.as_str())
            .filter(|message| !message.is_empty())
    }

    /// Drain effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        self.effects.take()
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next_deadline()
    }

    fn expect_screen(&self, expected: ScreenState) -> Result<(), SessionError> {
        let actual = self.sequencer.screen();
        if actual == expected {
            Ok(())
        } else {
            Err(SessionError::WrongScreen { expected, actual })
        }
    }

    fn wrong_screen(&self, expected: ScreenState) -> SessionError {
        SessionError::WrongScreen {
            expected,
            actual: self.sequencer.screen(),
        }
    }

    // Content creation

    /// Persist the form without leaving it.
    pub fn save(
        &mut self,
        form: &CustomGameData,
        store: &mut dyn KeyValueStore,
    ) -> Result<(), SessionError> {
        self.expect_screen(ScreenState::Create)?;
        form.validate()?;
        storage::save_custom_data(store, &self.config.storage_key, form);
        self.effects.sound(SoundEffect::Success);
        Ok(())
    }

    /// Persist the form and start the greeting. Every field must be filled.
    ///
    /// The data is read back from `store` before the transition, so the
    /// greeting always sees what was saved.
    pub fn play(
        &mut self,
        form: &CustomGameData,
        store: &mut dyn KeyValueStore,
    ) -> Result<Transition, SessionError> {
        self.expect_screen(ScreenState::Create)?;
        form.validate_complete()?;
        storage::save_custom_data(store, &self.config.storage_key, form);

        self.custom = match self.stored(store) {
            Some(data) => Some(data),
            None => {
                tracing::warn!("store did not keep custom game data, using form directly");
                Some(form.clone())
            }
        };
        self.effects.sound(SoundEffect::Click);

        let transition = self.sequencer.advance();
        self.enter(transition);
        Ok(transition)
    }

    /// Shareable link for `form`.
    pub fn share_link(&mut self, form: &CustomGameData, base_url: &str) -> Result<String, SessionError> {
        let link = codec::share_link(base_url, &self.config.share_param, form)?;
        self.effects.sound(SoundEffect::Success);
        Ok(link)
    }

    // Sequencing

    /// Move to the next screen.
    pub fn advance(&mut self) -> Transition {
        let transition = self.sequencer.advance();
        self.enter(transition);
        transition
    }

    /// Restart a game screen. Custom data is untouched.
    pub fn retry(&mut self, screen: ScreenState) -> Result<Transition, SessionError> {
        let transition = self.sequencer.retry(screen)?;
        self.effects.sound(SoundEffect::Click);
        self.enter(transition);
        Ok(transition)
    }

    /// Play again. Going back to the form discards the custom data.
    pub fn replay(&mut self, mode: ReplayMode) -> Result<Transition, SessionError> {
        let transition = self.sequencer.replay(mode)?;
        if mode == ReplayMode::Create {
            self.custom = None;
        }
        self.effects.sound(SoundEffect::Click);
        self.enter(transition);
        Ok(transition)
    }

    /// Tear down the screen that was left and mount the one entered.
    fn enter(&mut self, transition: Transition) {
        let cancelled = self.timers.cancel_owned_by(transition.from);
        if cancelled > 0 {
            tracing::debug!(screen = %transition.from, cancelled, "cancelled timers of left screen");
        }
        self.active = self.mount(transition.to);
        if transition.celebrate {
            self.effects.sound(SoundEffect::Win);
            self.effects.celebrate();
        }
        tracing::info!(from = %transition.from, to = %transition.to, "screen transition");
    }

    fn mount(&mut self, screen: ScreenState) -> Option<ActiveGame> {
        match screen {
            ScreenState::GuessNumber => Some(ActiveGame::GuessNumber(GuessNumberGame::new(
                self.rng.as_mut(),
            ))),
            ScreenState::Rps => Some(ActiveGame::Rps(RpsGame::new())),
            ScreenState::Wordle => Some(ActiveGame::Wordle(WordleGame::new(
                &self.dictionary,
                self.rng.as_mut(),
            ))),
            ScreenState::Password => {
                let expected = match &self.custom {
                    Some(data) if !data.password.is_empty() => data.password.clone(),
                    _ => self.config.default_password.clone(),
                };
                let hint = self.password_hint().to_string();
                Some(ActiveGame::Password(PasswordGame::new(expected, hint)))
            }
            _ => None,
        }
    }

    fn schedule_advance(&mut self, now: DateTime<Utc>) {
        let screen = self.sequencer.screen();
        let delay = self
            .config
            .win_delay(screen)
            .unwrap_or_else(chrono::Duration::zero);
        self.timers.schedule(screen, TimerAction::Advance, delay, now);
        tracing::debug!(%screen, delay_ms = delay.num_milliseconds(), "auto-advance scheduled");
    }

    /// Fire timers due at `now`. Returns the transitions they caused.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Transition> {
        let mut transitions = Vec::new();
        for timer in self.timers.take_due(now) {
            if timer.owner != self.sequencer.screen() {
                tracing::debug!(owner = %timer.owner, "dropping stale timer");
                continue;
            }
            match timer.action {
                TimerAction::Advance => transitions.push(self.advance()),
            }
        }
        transitions
    }

    // Game input

    /// Guess on the number screen.
    pub fn guess_number(&mut self, n: u8, now: DateTime<Utc>) -> Result<GuessResult, SessionError> {
        let Some(ActiveGame::GuessNumber(game)) = self.active.as_mut() else {
            return Err(self.wrong_screen(ScreenState::GuessNumber));
        };
        let result = game.guess(n)?;

        self.effects.sound(SoundEffect::Click);
        match result.status {
            GuessStatus::Correct => {
                self.effects.sound(SoundEffect::GoodResult);
                self.schedule_advance(now);
            }
            GuessStatus::Higher | GuessStatus::Lower | GuessStatus::Exhausted { .. } => {
                self.effects.sound(SoundEffect::Error);
            }
        }
        Ok(result)
    }

    /// Play a rock-paper-scissors round.
    pub fn play_rps(&mut self, choice: Choice, now: DateTime<Utc>) -> Result<RoundResult, SessionError> {
        let Some(ActiveGame::Rps(game)) = self.active.as_mut() else {
            return Err(self.wrong_screen(ScreenState::Rps));
        };
        let result = game.play(choice, self.rng.as_mut())?;

        self.effects.sound(SoundEffect::Click);
        self.effects.sound(match result.outcome {
            RoundOutcome::Win => SoundEffect::Success,
            RoundOutcome::Lose => SoundEffect::Error,
            RoundOutcome::Draw => SoundEffect::Tie,
        });
        match result.game {
            GameOutcome::Won => {
                self.effects.sound(SoundEffect::GoodResult);
                self.schedule_advance(now);
            }
            GameOutcome::Lost => self.effects.sound(SoundEffect::Lose),
            GameOutcome::Pending => {}
        }
        Ok(result)
    }

    /// Submit a Wordle row.
    pub fn submit_wordle(&mut self, guess: &str, now: DateTime<Utc>) -> Result<Submission, SessionError> {
        let Some(ActiveGame::Wordle(game)) = self.active.as_mut() else {
            return Err(self.wrong_screen(ScreenState::Wordle));
        };
        let result = game.submit(guess, &self.dictionary);
        self.wordle_submitted(result, now)
    }

    fn wordle_submitted(
        &mut self,
        result: Result<Submission, WordleError>,
        now: DateTime<Utc>,
    ) -> Result<Submission, SessionError> {
        let submission = match result {
            Ok(submission) => submission,
            Err(err) => {
                if err.is_invalid_guess() {
                    self.effects.sound(SoundEffect::Error);
                }
                return Err(err.into());
            }
        };

        self.effects.sound(SoundEffect::Enter);
        match submission.terminal {
            Some(Terminal::Won) => {
                self.effects.sound(SoundEffect::GoodResult);
                self.schedule_advance(now);
            }
            Some(Terminal::Lost { .. }) => self.effects.sound(SoundEffect::Lose),
            None => {}
        }
        Ok(submission)
    }

    /// Check a password attempt. Every attempt is judged on its own.
    pub fn check_password(&mut self, input: &str, now: DateTime<Utc>) -> Result<PasswordCheck, SessionError> {
        let Some(ActiveGame::Password(game)) = self.active.as_mut() else {
            return Err(self.wrong_screen(ScreenState::Password));
        };
        if game.is_solved() {
            return Ok(game.check(input));
        }
        let result = game.attempt(input);
        self.password_attempted(result, now);
        Ok(result)
    }

    fn password_attempted(&mut self, result: PasswordCheck, now: DateTime<Utc>) {
        if result.is_match() {
            self.effects.sound(SoundEffect::GoodResult);
            self.schedule_advance(now);
        } else {
            self.effects.sound(SoundEffect::Error);
        }
    }

    /// Solve the password as soon as the buffer spells it.
    fn password_typed(&mut self, now: DateTime<Utc>) {
        let Some(ActiveGame::Password(game)) = self.active.as_mut() else {
            return;
        };
        if game.check(game.input()).is_match() {
            game.submit();
            self.effects.sound(SoundEffect::GoodResult);
            self.schedule_advance(now);
        }
    }

    fn no_keypad(&self) -> SessionError {
        SessionError::NoKeypad(self.sequencer.screen())
    }

    // Keypad input

    /// Type a key on the Wordle or password keypad. Returns whether the key
    /// went into the buffer.
    pub fn type_key(&mut self, key: char, now: DateTime<Utc>) -> Result<bool, SessionError> {
        match self.active.as_mut() {
            Some(ActiveGame::Wordle(game)) => {
                let accepted = game.type_letter(key);
                if accepted {
                    self.effects.sound(SoundEffect::Type);
                }
                Ok(accepted)
            }
            Some(ActiveGame::Password(game)) => {
                if game.is_solved() {
                    return Ok(false);
                }
                self.effects.sound(SoundEffect::Type);
                let accepted = game.type_key(key);
                if accepted {
                    self.password_typed(now);
                }
                Ok(accepted)
            }
            _ => Err(self.no_keypad()),
        }
    }

    /// Drop the last typed key. Returns whether anything was removed.
    pub fn backspace(&mut self) -> Result<bool, SessionError> {
        match self.active.as_mut() {
            Some(ActiveGame::Wordle(game)) => {
                if game.outcome().is_terminal() {
                    return Ok(false);
                }
                self.effects.sound(SoundEffect::Type);
                Ok(game.backspace())
            }
            Some(ActiveGame::Password(game)) => {
                if game.is_solved() {
                    return Ok(false);
                }
                self.effects.sound(SoundEffect::Type);
                Ok(game.backspace())
            }
            _ => Err(self.no_keypad()),
        }
    }

    /// Press enter on the keypad.
    pub fn submit_typed(&mut self, now: DateTime<Utc>) -> Result<KeypadSubmit, SessionError> {
        match self.active.as_mut() {
            Some(ActiveGame::Wordle(game)) => {
                let result = game.submit_current(&self.dictionary);
                self.wordle_submitted(result, now).map(KeypadSubmit::Wordle)
            }
            Some(ActiveGame::Password(game)) => {
                if game.is_solved() {
                    return Ok(KeypadSubmit::Password(PasswordCheck::Match));
                }
                self.effects.sound(SoundEffect::Type);
                let result = game.submit();
                self.password_attempted(result, now);
                Ok(KeypadSubmit::Password(result))
            }
            _ => Err(self.no_keypad()),
        }
    }

    /// Snapshot for hosts and debugging.
    pub fn to_json(&self) -> serde_json::Value {
        let game = match &self.active {
            Some(ActiveGame::GuessNumber(g)) => g.to_json(),
            Some(ActiveGame::Rps(g)) => g.to_json(),
            Some(ActiveGame::Wordle(g)) => g.to_json(),
            Some(ActiveGame::Password(g)) => g.to_json(),
            None => serde_json::Value::Null,
        };
        serde_json::json!({
            "screen": self.sequencer.screen().as_str(),
            "celebrating": self.sequencer.is_celebrating(),
            "name": self.display_name(),
            "has_custom_data": self.custom.is_some(),
            "game": game,
            "pending_timers": self.timers.len()
        })
    }
}
