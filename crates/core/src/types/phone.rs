//! Customer phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The normalized number has too few digits.
    #[error("phone number must contain at least {min} digits")]
    TooShort {
        /// Minimum number of digits.
        min: usize,
    },
    /// The normalized number has too many digits.
    #[error("phone number must contain at most {max} digits")]
    TooLong {
        /// Maximum number of digits.
        max: usize,
    },
    /// The input contains a character that is neither a digit nor accepted
    /// punctuation.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// A customer phone number.
///
/// Checkout and quick-order forms accept numbers the way people type them -
/// with spaces, dashes, dots, and parentheses - so parsing normalizes the
/// input down to its digits (keeping a single leading `+`) before checking
/// length.
///
/// ## Constraints
///
/// - 10-15 digits after normalization (roughly the E.164 envelope)
/// - An optional leading `+`
/// - Accepted punctuation: spaces, `-`, `.`, `(`, `)`
///
/// ## Examples
///
/// ```
/// use sadok_core::Phone;
///
/// let phone = Phone::parse("+380 (63) 650-74-49").unwrap();
/// assert_eq!(phone.as_str(), "+380636507449");
///
/// assert!(Phone::parse("12345").is_err());      // too short
/// assert!(Phone::parse("phone me").is_err());   // not a number
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits after normalization.
    pub const MIN_DIGITS: usize = 10;
    /// Maximum number of digits after normalization (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string, normalizing punctuation away.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty (after trimming)
    /// - Contains characters other than digits, `+`, and accepted punctuation
    /// - Normalizes to fewer than 10 or more than 15 digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for (i, c) in trimmed.chars().enumerate() {
            match c {
                '+' if i == 0 => normalized.push('+'),
                '0'..='9' => normalized.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        let digits = normalized.chars().filter(char::is_ascii_digit).count();
        if digits < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_phones() {
        assert!(Phone::parse("+380636507449").is_ok());
        assert!(Phone::parse("0636507449").is_ok());
        assert!(Phone::parse("+380 (63) 650-74-49").is_ok());
        assert!(Phone::parse("380.63.650.74.49").is_ok());
    }

    #[test]
    fn test_parse_normalizes_punctuation() {
        let phone = Phone::parse("+380 (95) 251-03-47").unwrap();
        assert_eq!(phone.as_str(), "+380952510347");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(Phone::parse("   "), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Phone::parse("063 650"),
            Err(PhoneError::TooShort { min: 10 })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Phone::parse("+3806365074491234"),
            Err(PhoneError::TooLong { max: 15 })
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            Phone::parse("063-650-74-4x"),
            Err(PhoneError::InvalidCharacter('x'))
        ));
        // '+' is only accepted in the leading position
        assert!(matches!(
            Phone::parse("063+6507449"),
            Err(PhoneError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("+380636507449").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+380636507449\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }

    #[test]
    fn test_from_str() {
        let phone: Phone = "0636507449".parse().unwrap();
        assert_eq!(phone.as_str(), "0636507449");
    }
}
