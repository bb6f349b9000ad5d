//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not an acceptable phone number.
#[derive(thiserror::Error, Debug, Clone)]
#[error("Phone number must be like +1234567890 or 123-456-7890")]
pub struct PhoneError;

/// A customer phone number.
///
/// Accepted shape: an optional leading `+`, then a digit, then six or more
/// digits/hyphens, ending in a digit. Examples: `+1234567890`,
/// `123-456-7890`. Anything shorter than eight digits/hyphens (after the
/// optional `+`) is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError`] when the input does not match the accepted
    /// shape. Empty input is an error here; optionality is the caller's
    /// concern.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits = s.strip_prefix('+').unwrap_or(s);
        let bytes = digits.as_bytes();

        // digit, then 6+ of [digit or -], then digit
        if bytes.len() < 8 {
            return Err(PhoneError);
        }
        let first_ok = bytes.first().is_some_and(u8::is_ascii_digit);
        let last_ok = bytes.last().is_some_and(u8::is_ascii_digit);
        let body_ok = bytes.iter().all(|b| b.is_ascii_digit() || *b == b'-');

        if first_ok && last_ok && body_ok {
            Ok(Self(s.to_owned()))
        } else {
            Err(PhoneError)
        }
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
