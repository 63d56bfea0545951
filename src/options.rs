//! Formatting options
//!
//! `FormatOptions` is a plain immutable record: every field has a default,
//! and callers override only what they need with the `with_*` helpers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Largest accepted `precision`
pub const MAX_PRECISION: u32 = 1000;

// ─────────────────────────────────────────────────────────────────────────────
// Rounding Mode
// ─────────────────────────────────────────────────────────────────────────────

/// How digits beyond the effective precision are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Round half away from zero (default)
    #[default]
    Round,
    /// Round toward negative infinity
    Floor,
    /// Round toward positive infinity
    Ceil,
    /// Discard extra digits (round toward zero)
    #[serde(alias = "trunc")]
    Truncate,
}

impl RoundingMode {
    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Truncate => "truncate",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "round" => Ok(Self::Round),
            "floor" => Ok(Self::Floor),
            "ceil" => Ok(Self::Ceil),
            "truncate" | "trunc" => Ok(Self::Truncate),
            other => Err(FormatError::invalid_options(format!(
                "unknown rounding mode {:?} (expected round, floor, ceil or truncate)",
                other
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Options
// ─────────────────────────────────────────────────────────────────────────────

/// Options controlling how a value is displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Fractional digits to display; `None` keeps the value's natural digits
    pub precision: Option<u32>,

    /// Rounding applied at the effective precision
    pub rounding: RoundingMode,

    /// Pad the fraction with zeros up to `precision`
    pub show_trailing_zeros: bool,

    /// Inserted every three integer digits; empty disables grouping
    pub group_separator: String,

    /// Placed between integer and fractional digits
    pub decimal_separator: String,

    /// Emitted before the sign
    pub prefix: String,

    /// Emitted after the last digit
    pub suffix: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: None,
            rounding: RoundingMode::Round,
            show_trailing_zeros: false,
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl FormatOptions {
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_trailing_zeros(mut self, show: bool) -> Self {
        self.show_trailing_zeros = show;
        self
    }

    pub fn with_group_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_separator = separator.into();
        self
    }

    pub fn with_decimal_separator(mut self, separator: impl Into<String>) -> Self {
        self.decimal_separator = separator.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Check that the options describe an unambiguous display format
    ///
    /// Rejected:
    /// - a precision above [`MAX_PRECISION`]
    /// - equal group and decimal separators, or one containing the other
    /// - an empty decimal separator
    /// - separators containing ASCII digits or `-` (they would read as part of the number)
    pub fn validate(&self) -> Result<(), FormatError> {
        if let Some(precision) = self.precision.filter(|&p| p > MAX_PRECISION) {
            return Err(FormatError::invalid_options(format!(
                "precision {} exceeds the maximum of {}",
                precision, MAX_PRECISION
            )));
        }

        if self.decimal_separator.is_empty() {
            return Err(FormatError::invalid_options(
                "decimal separator must not be empty",
            ));
        }

        if self.group_separator == self.decimal_separator {
            return Err(FormatError::invalid_options(format!(
                "group separator and decimal separator are both {:?}",
                self.decimal_separator
            )));
        }

        if !self.group_separator.is_empty()
            && (self.group_separator.contains(self.decimal_separator.as_str())
                || self.decimal_separator.contains(self.group_separator.as_str()))
        {
            return Err(FormatError::invalid_options(format!(
                "group separator {:?} and decimal separator {:?} overlap",
                self.group_separator, self.decimal_separator
            )));
        }

        for (name, separator) in [
            ("group", &self.group_separator),
            ("decimal", &self.decimal_separator),
        ] {
            if separator.chars().any(|c| c.is_ascii_digit() || c == '-') {
                return Err(FormatError::invalid_options(format!(
                    "{} separator {:?} must not contain digits or '-'",
                    name, separator
                )));
            }
        }

        Ok(())
    }
}
