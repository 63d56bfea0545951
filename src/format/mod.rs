//! Numeric display formatting
//!
//! `value + options -> display string`:
//! 1. Resolve the effective precision (explicit, or the value's natural digits)
//! 2. Round the decimal digits with the configured mode
//! 3. Group the integer digits, pad or strip the fraction
//! 4. Assemble `prefix + sign + integer [+ decimal separator + fraction] + suffix`
//!
//! Every step works on decimal digits (see [`Decimal`]).

mod grouping;

pub use grouping::group_digits;

use crate::decimal::Decimal;
use crate::error::{FormatError, ParseError};
use crate::options::FormatOptions;
use crate::parse;

/// Conventional fallback display for values that cannot be formatted
pub const PLACEHOLDER: &str = "—";

/// A validated set of options, reusable across many values
///
/// Validation happens once in [`Formatter::new`]; every later call can only
/// fail on the value itself.
#[derive(Debug, Clone)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Result<Self, FormatError> {
        if let Err(err) = options.validate() {
            tracing::debug!(error = %err, "Rejected format options");
            return Err(err);
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format a finite float
    pub fn format(&self, value: f64) -> Result<String, FormatError> {
        let decimal = Decimal::from_f64(value)?;
        Ok(self.format_decimal(&decimal))
    }

    /// Format decimal text exactly, without passing through `f64`
    pub fn format_str(&self, value: &str) -> Result<String, FormatError> {
        let decimal: Decimal = value.parse()?;
        Ok(self.format_decimal(&decimal))
    }

    pub fn format_decimal(&self, value: &Decimal) -> String {
        let options = &self.options;

        let (rounded, precision) = match options.precision {
            Some(precision) => {
                let precision = precision as usize;
                (value.round(precision, options.rounding), precision)
            }
            None => (value.clone(), value.scale()),
        };

        let integer = group_digits(&rounded.integer_digits(), &options.group_separator);
        let mut fraction = rounded.fraction_digits();
        if options.show_trailing_zeros && fraction.len() < precision {
            fraction.push_str(&"0".repeat(precision - fraction.len()));
        }

        let mut output = String::with_capacity(
            options.prefix.len()
                + 1
                + integer.len()
                + options.decimal_separator.len()
                + fraction.len()
                + options.suffix.len(),
        );
        output.push_str(&options.prefix);
        if rounded.is_negative() {
            output.push('-');
        }
        output.push_str(&integer);
        if !fraction.is_empty() {
            output.push_str(&options.decimal_separator);
            output.push_str(&fraction);
        }
        output.push_str(&options.suffix);

        tracing::trace!(input = %value, output = %output, "Formatted value");
        output
    }

    /// Read text produced with these options back into a decimal
    pub fn parse(&self, text: &str) -> Result<Decimal, ParseError> {
        parse::parse_with(text, &self.options)
    }
}

/// Format `value` for display
///
/// # Examples
/// ```
/// use statfmt::{format, FormatOptions, RoundingMode};
///
/// assert_eq!(format(1234567.123, &FormatOptions::default()).unwrap(), "1,234,567.123");
///
/// let options = FormatOptions::default()
///     .with_precision(2)
///     .with_rounding(RoundingMode::Floor);
/// assert_eq!(format(1234.56789, &options).unwrap(), "1,234.56");
/// ```
pub fn format(value: f64, options: &FormatOptions) -> Result<String, FormatError> {
    Formatter::new(options.clone())?.format(value)
}

/// Format decimal text (e.g. `"1.005"`, `"-2.5e3"`) for display
pub fn format_str(value: &str, options: &FormatOptions) -> Result<String, FormatError> {
    Formatter::new(options.clone())?.format_str(value)
}

/// Format `value`, or return `fallback` if either the value or the options are invalid
///
/// # Examples
/// ```
/// use statfmt::{format_or, FormatOptions, PLACEHOLDER};
///
/// assert_eq!(format_or(f64::NAN, &FormatOptions::default(), PLACEHOLDER), "—");
/// assert_eq!(format_or(1500.0, &FormatOptions::default(), PLACEHOLDER), "1,500");
/// ```
pub fn format_or(value: f64, options: &FormatOptions, fallback: &str) -> String {
    format(value, options).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "Falling back to placeholder display");
        fallback.to_string()
    })
}
