//! Shareable-link codec.
//!
//! Custom data travels in a single query parameter as base64-encoded JSON:
//!
//! ```text
//! https://example.com/?game=eyJuYW1lIjoiQWRhIiwiaGludCI6Ii4uLiJ9
//!                      └──┘ └──────────────────────────────────┘
//!                      param  base64({"name":..,"hint":..,"password":..,"secretMessage":..})
//! ```
//!
//! Decoding never panics; each failure stage has its own error variant.

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use url::Url;

use super::custom::{CustomGameData, FieldError};

/// Standard alphabet, padded on encode, padding optional on decode.
const LINK_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Why a token could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Token is not valid base64
    Base64(String),
    /// Decoded bytes are not JSON
    Json(String),
    /// JSON has the wrong shape or breaks a field rule
    Schema(String),
}

impl DecodeError {
    /// Short name of the failing stage.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Base64(_) => "base64",
            Self::Json(_) => "json",
            Self::Schema(_) => "schema",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64(msg) => write!(f, "Malformed base64: {}", msg),
            Self::Json(msg) => write!(f, "Malformed JSON: {}", msg),
            Self::Schema(msg) => write!(f, "Unexpected game data: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<FieldError> for DecodeError {
    fn from(err: FieldError) -> Self {
        Self::Schema(err.to_string())
    }
}

/// Encode custom data into a link token.
pub fn encode(data: &CustomGameData) -> String {
    LINK_ENGINE.encode(data.to_json().to_string())
}

/// Decode a link token back into custom data.
///
/// Spaces are read as `+`, since query parsing turns an unescaped `+` into a
/// space. Payloads that are not UTF-8 are read as Latin-1, one byte per
/// character, which is what browser `btoa` tokens contain.
pub fn decode(token: &str) -> Result<CustomGameData, DecodeError> {
    let token = token.trim().replace(' ', "+");
    let bytes = LINK_ENGINE
        .decode(token.as_bytes())
        .map_err(|e| DecodeError::Base64(e.to_string()))?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.as_bytes().iter().map(|&b| char::from(b)).collect(),
    };
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| DecodeError::Json(e.to_string()))?;
    let data: CustomGameData =
        serde_json::from_value(value).map_err(|e| DecodeError::Schema(e.to_string()))?;
    data.validate()?;
    Ok(data)
}

/// Share-link errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    InvalidData(FieldError),
    InvalidBaseUrl(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidData(err) => write!(f, "Cannot share incomplete game: {}", err),
            Self::InvalidBaseUrl(msg) => write!(f, "Invalid base URL: {}", msg),
        }
    }
}

impl std::error::Error for ShareError {}

/// Build a shareable URL carrying `data` in the `param` query parameter.
///
/// Other query parameters on `base_url` are kept; an existing `param` is
/// replaced.
pub fn share_link(base_url: &str, param: &str, data: &CustomGameData) -> Result<String, ShareError> {
    data.validate_complete().map_err(ShareError::InvalidData)?;
    let mut url = Url::parse(base_url).map_err(|e| ShareError::InvalidBaseUrl(e.to_string()))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let token = encode(data);
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(param, &token);

    Ok(url.to_string())
}

/// Parameters read from a page's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkParams {
    /// Shared-game token
    pub share_token: Option<String>,
    /// Requested test screen
    pub screen: Option<String>,
}

impl LinkParams {
    /// Parse a query string (leading `?` optional). The first occurrence of
    /// each parameter wins.
    pub fn from_query(query: &str, share_param: &str, screen_param: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key == share_param && params.share_token.is_none() {
                params.share_token = Some(value.into_owned());
            } else if key == screen_param && params.screen.is_none() {
                params.screen = Some(value.into_owned());
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use pretty_assertions::assert_eq;

    fn sample() -> CustomGameData {
        CustomGameData::new("Grace Hopper", "Find the bug 🐛", "COBOL1959", "Nanoseconds are 30cm long.")
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            sample(),
            CustomGameData::default(),
            CustomGameData::new("A", "?", "1", "+/="),
            CustomGameData::new("a".repeat(20), "é".repeat(40), "Z9".repeat(10), "🎉".repeat(500)),
        ];
        for data in samples {
            assert_eq!(decode(&encode(&data)), Ok(data));
        }
    }

    #[test]
    fn test_decode_errors_are_distinguished() {
        assert_eq!(decode("not*base64!").unwrap_err().kind(), "base64");

        let not_json = STANDARD.encode("hello there");
        assert_eq!(decode(&not_json).unwrap_err().kind(), "json");

        let wrong_shape = STANDARD.encode(r#"{"name": "Ada"}"#);
        assert_eq!(decode(&wrong_shape).unwrap_err().kind(), "schema");

        let bad_field = STANDARD.encode(
            r#"{"name":"Ada 2","hint":"","password":"x","secretMessage":""}"#,
        );
        assert_eq!(decode(&bad_field).unwrap_err().kind(), "schema");
    }

    #[test]
    fn test_decode_accepts_browser_style_tokens() {
        // Unpadded, and with '+' turned into spaces by query parsing
        let token = encode(&CustomGameData::new("Ok", "~~~>", "p", "?"));
        assert!(token.contains('+') && token.ends_with('='));
        let mangled = token.trim_end_matches('=').replace('+', " ");

        assert_eq!(decode(&mangled), decode(&token));
        assert!(decode(&mangled).is_ok());
    }

    #[test]
    fn test_decode_latin1_tokens() {
        // btoa() of {"name":"Zoe","hint":"Café au lait",...}: one byte per char
        let token = "eyJuYW1lIjoiWm9lIiwiaGludCI6IkNhZukgYXUgbGFpdCIsInBhc3N3b3JkIjoiYWJjIiwic2VjcmV0TWVzc2FnZSI6IlRy6HMgYmllbiEifQ==";

        assert_eq!(
            decode(token),
            Ok(CustomGameData::new("Zoe", "Café au lait", "abc", "Très bien!"))
        );
    }

    #[test]
    fn test_share_link_round_trip() {
        let link = share_link("https://example.com/party/?lang=en&game=old", "game", &sample()).unwrap();
        let url = Url::parse(&link).unwrap();

        let params = LinkParams::from_query(url.query().unwrap(), "game", "screen");
        assert_eq!(decode(&params.share_token.unwrap()), Ok(sample()));
        assert!(link.contains("lang=en"));
        assert!(!link.contains("game=old"));
    }

    #[test]
    fn test_share_link_requires_complete_data() {
        let mut data = sample();
        data.hint.clear();
        assert!(matches!(
            share_link("https://example.com/", "game", &data),
            Err(ShareError::InvalidData(_))
        ));
        assert!(matches!(
            share_link("not a url", "game", &sample()),
            Err(ShareError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_link_params() {
        let params = LinkParams::from_query("?screen=wordle&game=abc&screen=rps", "game", "screen");
        assert_eq!(
            params,
            LinkParams {
                share_token: Some("abc".to_string()),
                screen: Some("wordle".to_string()),
            }
        );
        assert_eq!(LinkParams::from_query("", "game", "screen"), LinkParams::default());
    }
}
