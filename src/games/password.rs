//! Password puzzle.
//!
//! The player types a password guided by a hint. Every submission is checked
//! on its own; there is no attempt limit and no lockout.

/// Longest input the keypad accepts.
pub const MAX_INPUT_LEN: usize = 20;

/// Result of a password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Match,
    NoMatch,
}

impl PasswordCheck {
    /// Wire name of the result.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::NoMatch => "no-match",
        }
    }

    /// True for [`PasswordCheck::Match`].
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Password state for one playthrough.
#[derive(Debug, Clone)]
pub struct PasswordGame {
    expected: String,
    hint: String,
    input: String,
    solved: bool,
}

impl PasswordGame {
    /// Start a puzzle; `expected` is compared case-insensitively.
    pub fn new(expected: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            expected: expected.into().to_uppercase(),
            hint: hint.into(),
            input: String::new(),
            solved: false,
        }
    }

    /// Hint shown above the keypad.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Current keypad buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether a matching password has been entered.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Case-insensitive full-string comparison. Does not touch state.
    pub fn check(&self, input: &str) -> PasswordCheck {
        if input.to_uppercase() == self.expected {
            PasswordCheck::Match
        } else {
            PasswordCheck::NoMatch
        }
    }

    /// Check `input` and remember a match.
    pub fn attempt(&mut self, input: &str) -> PasswordCheck {
        let result = self.check(input);
        if result.is_match() {
            self.solved = true;
        }
        result
    }

    /// Append a letter or digit to the keypad buffer. Returns false if ignored.
    pub fn type_key(&mut self, key: char) -> bool {
        if self.solved
            || !key.is_ascii_alphanumeric()
            || self.input.chars().count() >= MAX_INPUT_LEN
        {
            return false;
        }
        self.input.push(key.to_ascii_uppercase());
        true
    }

    /// Drop the last key. Returns false if nothing changed.
    pub fn backspace(&mut self) -> bool {
        if self.solved {
            return false;
        }
        self.input.pop().is_some()
    }

    /// Check the keypad buffer.
    pub fn submit(&mut self) -> PasswordCheck {
        let input = self.input.clone();
        self.attempt(&input)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "hint": self.hint,
            "input": self.input,
            "solved": self.solved
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_is_case_insensitive() {
        let game = PasswordGame::new("Jeet", "It's you");

        assert_eq!(game.check("jeet"), PasswordCheck::Match);
        assert_eq!(game.check("JEET"), PasswordCheck::Match);
        assert_eq!(game.check("jee"), PasswordCheck::NoMatch);
        assert_eq!(game.check("jeet "), PasswordCheck::NoMatch);
        assert!(!game.is_solved());
    }

    #[test]
    fn test_no_lockout() {
        let mut game = PasswordGame::new("cake2024", "");

        for _ in 0..50 {
            assert_eq!(game.attempt("pie"), PasswordCheck::NoMatch);
        }
        assert_eq!(game.attempt("CAKE2024"), PasswordCheck::Match);
        assert!(game.is_solved());
    }

    #[test]
    fn test_keypad_buffer() {
        let mut game = PasswordGame::new("AB", "");
        for c in "abcdefghijklmnopqrstuvwxyz".chars() {
            game.type_key(c);
        }
        assert_eq!(game.input().len(), MAX_INPUT_LEN);
        assert_eq!(game.submit(), PasswordCheck::NoMatch);

        while game.backspace() {}
        game.type_key('a');
        game.type_key('b');
        assert_eq!(game.submit(), PasswordCheck::Match);

        // Solved keypad ignores further input
        assert!(!game.type_key('c'));
        assert!(!game.backspace());
        assert_eq!(game.input(), "AB");
    }

    #[test]
    fn test_keypad_takes_letters_and_digits_only() {
        let mut game = PasswordGame::new("R2D2", "");

        for key in [' ', '-', '!', 'é', '\n'] {
            assert!(!game.type_key(key));
        }
        for key in "r2d2".chars() {
            assert!(game.type_key(key));
        }
        assert_eq!(game.input(), "R2D2");
        assert_eq!(game.submit(), PasswordCheck::Match);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(PasswordCheck::Match.as_str(), "match");
        assert_eq!(PasswordCheck::NoMatch.as_str(), "no-match");
    }
}
