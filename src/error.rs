//! Error types for formatting and parsing
//!
//! Both errors are raised synchronously and never carry a partial result:
//! a call either produces a complete string or fails.

use std::fmt;

/// Errors that can occur while formatting a value
///
/// Variants:
/// - InvalidValue: the value is not a finite number (NaN, ±Infinity, malformed text)
/// - InvalidOptions: the options contradict each other or are out of range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Value cannot be formatted (includes a description of the value)
    InvalidValue(String),
    /// Options are contradictory or out of range (includes the reason)
    InvalidOptions(String),
}

impl FormatError {
    pub(crate) fn invalid_value(value: impl fmt::Display) -> Self {
        Self::InvalidValue(value.to_string())
    }

    pub(crate) fn invalid_options(reason: impl Into<String>) -> Self {
        Self::InvalidOptions(reason.into())
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(value) => write!(f, "Invalid value: {}", value),
            Self::InvalidOptions(reason) => write!(f, "Invalid options: {}", reason),
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors that can occur while reading a formatted string back into a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The options used for parsing are themselves invalid
    Options(FormatError),
    /// Text does not start with the configured prefix
    MissingPrefix,
    /// Text does not end with the configured suffix
    MissingSuffix,
    /// Nothing is left once prefix, suffix and sign are removed
    Empty,
    /// A character that is neither a digit nor a separator (includes the offending text)
    InvalidDigits(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options(err) => write!(f, "{}", err),
            Self::MissingPrefix => write!(f, "Text does not start with the configured prefix"),
            Self::MissingSuffix => write!(f, "Text does not end with the configured suffix"),
            Self::Empty => write!(f, "No digits found"),
            Self::InvalidDigits(text) => write!(f, "Unexpected characters in {:?}", text),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Options(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for ParseError {
    fn from(err: FormatError) -> Self {
        Self::Options(err)
    }
}
