//! User-authored personalization carried through every screen.
//!
//! Field rules follow the creation form:
//!
//! | field            | max chars | allowed                 |
//! |------------------|-----------|-------------------------|
//! | `name`           | 20        | ASCII letters, spaces   |
//! | `hint`           | 40        | anything                |
//! | `password`       | 20        | ASCII letters, digits   |
//! | `secret_message` | 500       | anything                |

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 20;
pub const MAX_HINT_LEN: usize = 40;
pub const MAX_PASSWORD_LEN: usize = 20;
pub const MAX_SECRET_MESSAGE_LEN: usize = 500;

/// Custom greeting content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomGameData {
    pub name: String,
    pub hint: String,
    pub password: String,
    pub secret_message: String,
}

/// Which field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Hint,
    Password,
    SecretMessage,
}

impl Field {
    /// Form field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Hint => "hint",
            Self::Password => "password",
            Self::SecretMessage => "secretMessage",
        }
    }
}

/// Field validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    TooLong { field: Field, max: usize },
    InvalidCharacter { field: Field, found: char },
    Missing(Field),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {} characters", field.as_str(), max)
            }
            Self::InvalidCharacter { field, found } => {
                write!(f, "{} may not contain '{}'", field.as_str(), found)
            }
            Self::Missing(field) => write!(f, "{} is required", field.as_str()),
        }
    }
}

impl std::error::Error for FieldError {}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' '
}

fn is_password_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn filter_truncate(value: &str, allowed: impl Fn(char) -> bool, max: usize) -> String {
    value.chars().filter(|c| allowed(*c)).take(max).collect()
}

/// Letters and spaces only, at most 20 characters.
pub fn sanitize_name(value: &str) -> String {
    filter_truncate(value, is_name_char, MAX_NAME_LEN)
}

/// Letters and digits only, at most 20 characters.
pub fn sanitize_password(value: &str) -> String {
    filter_truncate(value, is_password_char, MAX_PASSWORD_LEN)
}

/// At most 40 characters.
pub fn sanitize_hint(value: &str) -> String {
    filter_truncate(value, |_| true, MAX_HINT_LEN)
}

/// At most 500 characters.
pub fn sanitize_secret_message(value: &str) -> String {
    filter_truncate(value, |_| true, MAX_SECRET_MESSAGE_LEN)
}

fn check_field(
    field: Field,
    value: &str,
    allowed: impl Fn(char) -> bool,
    max: usize,
) -> Result<(), FieldError> {
    if let Some(found) = value.chars().find(|c| !allowed(*c)) {
        return Err(FieldError::InvalidCharacter { field, found });
    }
    if value.chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(())
}

impl CustomGameData {
    /// Build from raw values without sanitizing.
    pub fn new(
        name: impl Into<String>,
        hint: impl Into<String>,
        password: impl Into<String>,
        secret_message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
            password: password.into(),
            secret_message: secret_message.into(),
        }
    }

    /// Build from raw form input, stripping what the form would reject.
    pub fn from_form(name: &str, hint: &str, password: &str, secret_message: &str) -> Self {
        Self {
            name: sanitize_name(name),
            hint: sanitize_hint(hint),
            password: sanitize_password(password),
            secret_message: sanitize_secret_message(secret_message),
        }
    }

    /// Check every field rule.
    pub fn validate(&self) -> Result<(), FieldError> {
        check_field(Field::Name, &self.name, is_name_char, MAX_NAME_LEN)?;
        check_field(Field::Hint, &self.hint, |_| true, MAX_HINT_LEN)?;
        check_field(
            Field::Password,
            &self.password,
            is_password_char,
            MAX_PASSWORD_LEN,
        )?;
        check_field(
            Field::SecretMessage,
            &self.secret_message,
            |_| true,
            MAX_SECRET_MESSAGE_LEN,
        )
    }

    /// First empty field, if any.
    pub fn missing_field(&self) -> Option<Field> {
        [
            (Field::Name, &self.name),
            (Field::Hint, &self.hint),
            (Field::Password, &self.password),
            (Field::SecretMessage, &self.secret_message),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
    }

    /// Every field filled in (needed to share a link).
    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Valid and complete.
    pub fn validate_complete(&self) -> Result<(), FieldError> {
        self.validate()?;
        match self.missing_field() {
            Some(field) => Err(FieldError::Missing(field)),
            None => Ok(()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "hint": self.hint,
            "password": self.password,
            "secretMessage": self.secret_message
        })
    }
}
