//! Reading formatted text back into numbers
//!
//! The inverse of formatting with the same options: strip prefix and suffix,
//! read the sign, drop group separators and swap the decimal separator for
//! `.`. Re-formatting a parsed value with the same options reproduces the
//! original text.

use crate::decimal::Decimal;
use crate::error::ParseError;
use crate::options::FormatOptions;

/// Parse text produced by formatting with `options`
///
/// # Examples
/// ```
/// use statfmt::{parse_formatted, FormatOptions};
///
/// let options = FormatOptions::default().with_prefix("$");
/// let value = parse_formatted("$-1,234.5", &options).unwrap();
/// assert_eq!(value.to_string(), "-1234.5");
/// ```
pub fn parse_formatted(text: &str, options: &FormatOptions) -> Result<Decimal, ParseError> {
    options.validate()?;
    parse_with(text, options)
}

/// Parse formatted text into an `f64`
pub fn parse_value(text: &str, options: &FormatOptions) -> Result<f64, ParseError> {
    parse_formatted(text, options).map(|value| value.to_f64())
}

/// Parse with options that are already known to be valid
pub(crate) fn parse_with(text: &str, options: &FormatOptions) -> Result<Decimal, ParseError> {
    let body = text
        .strip_prefix(options.prefix.as_str())
        .ok_or(ParseError::MissingPrefix)?;
    let body = body
        .strip_suffix(options.suffix.as_str())
        .ok_or(ParseError::MissingSuffix)?;

    let (negative, magnitude) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    if magnitude.is_empty() {
        return Err(ParseError::Empty);
    }

    let (integer, fraction) = match magnitude.split_once(options.decimal_separator.as_str()) {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (magnitude, None),
    };

    let integer = if options.group_separator.is_empty() {
        integer.to_string()
    } else {
        integer.replace(options.group_separator.as_str(), "")
    };

    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(integer.as_str()) || fraction.is_some_and(|f| !is_digits(f)) {
        return Err(ParseError::InvalidDigits(text.to_string()));
    }

    let mut canonical = String::with_capacity(magnitude.len() + 1);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(&integer);
    if let Some(fraction) = fraction {
        canonical.push('.');
        canonical.push_str(fraction);
    }

    canonical
        .parse()
        .map_err(|_| ParseError::InvalidDigits(text.to_string()))
}
