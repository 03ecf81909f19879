//! Session configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```json
//! { "default_name": "Sam", "wordle_win_delay_ms": 1000 }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::screen::ScreenState;
use super::storage::DEFAULT_STORAGE_KEY;

/// Longest delay honored; larger values are capped.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Tunables for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Greeting name when no custom data is supplied
    pub default_name: String,
    /// Password when no custom data is supplied
    pub default_password: String,
    pub default_hint: String,
    pub guess_number_win_delay_ms: u64,
    pub rps_win_delay_ms: u64,
    pub wordle_win_delay_ms: u64,
    /// Delay between solving the password and the congratulations screen
    pub password_win_delay_ms: u64,
    /// Query parameter carrying a shared game
    pub share_param: String,
    /// Query parameter naming a test screen
    pub screen_param: String,
    pub storage_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_name: "Jeet".into(),
            default_password: "JEET".into(),
            default_hint: "The password is related to YOU.".into(),
            guess_number_win_delay_ms: 2500,
            rps_win_delay_ms: 3000,
            wordle_win_delay_ms: 2500,
            password_win_delay_ms: 1500,
            share_param: "game".into(),
            screen_param: "screen".into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
        }
    }
}

/// Config errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Empty(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Invalid config: {}", msg),
            Self::Empty(field) => write!(f, "Config field '{}' must not be empty", field),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse JSON config; missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty names and keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("default_password", &self.default_password),
            ("share_param", &self.share_param),
            ("screen_param", &self.screen_param),
            ("storage_key", &self.storage_key),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Empty(field));
            }
        }
        Ok(())
    }

    /// Auto-advance delay after winning the game on `screen`.
    pub fn win_delay(&self, screen: ScreenState) -> Option<chrono::Duration> {
        let ms = match screen {
            ScreenState::GuessNumber => self.guess_number_win_delay_ms,
            ScreenState::Rps => self.rps_win_delay_ms,
            ScreenState::Wordle => self.wordle_win_delay_ms,
            ScreenState::Password => self.password_win_delay_ms,
            _ => return None,
        };
        Some(chrono::Duration::milliseconds(ms.min(MAX_DELAY_MS) as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{"default_name": "Sam", "rps_win_delay_ms": 10}"#).unwrap();

        assert_eq!(config.default_name, "Sam");
        assert_eq!(config.rps_win_delay_ms, 10);
        assert_eq!(config.default_password, "JEET");
        assert_eq!(config.storage_key, "customBirthdayGame");
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(GameConfig::from_json("[1, 2]"), Err(ConfigError::Parse(_))));
        assert_eq!(
            GameConfig::from_json(r#"{"share_param": ""}"#),
            Err(ConfigError::Empty("share_param"))
        );
    }

    #[test]
    fn test_win_delays() {
        let config = GameConfig::default();
        assert_eq!(
            config.win_delay(ScreenState::Rps),
            Some(chrono::Duration::milliseconds(3000))
        );
        assert_eq!(config.win_delay(ScreenState::Intro), None);
    }
}
