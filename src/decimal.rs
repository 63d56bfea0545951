//! Fixed-point decimal values
//!
//! Rounding and grouping operate on decimal digits, never on binary
//! floating-point arithmetic. A finite `f64` enters through its shortest
//! round-trip decimal representation, so `1.005` is the digits `1005` with
//! scale 3 and rounds to `1.01` as a reader would expect.

use std::fmt;
use std::str::FromStr;

use fixed_decimal::{
    Decimal as FixedDecimal, FloatPrecision, Sign, SignedRoundingMode, UnsignedRoundingMode,
};

use crate::error::FormatError;
use crate::options::RoundingMode;

/// Largest decimal exponent accepted in text input (`1e1000`)
pub const MAX_EXPONENT: i64 = 1000;

/// Most mantissa digits accepted in text input
pub const MAX_DIGITS: usize = 8192;

/// A signed decimal number
///
/// Always normalized: no leading integer zeros, no trailing fractional zeros,
/// and zero is never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Decimal {
    inner: FixedDecimal,
}

fn signed_mode(mode: RoundingMode) -> SignedRoundingMode {
    match mode {
        RoundingMode::Round => SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfExpand),
        RoundingMode::Floor => SignedRoundingMode::Floor,
        RoundingMode::Ceil => SignedRoundingMode::Ceil,
        RoundingMode::Truncate => SignedRoundingMode::Unsigned(UnsignedRoundingMode::Trunc),
    }
}

impl Decimal {
    pub fn zero() -> Self {
        Self::normalized(FixedDecimal::from(0i32))
    }

    /// Convert a finite float through its shortest round-trip representation
    pub fn from_f64(value: f64) -> Result<Self, FormatError> {
        if !value.is_finite() {
            return Err(FormatError::invalid_value(value));
        }
        FixedDecimal::try_from_f64(value, FloatPrecision::RoundTrip)
            .map(Self::normalized)
            .map_err(|_| FormatError::invalid_value(value))
    }

    fn normalized(mut inner: FixedDecimal) -> Self {
        inner.absolute.trim_start();
        inner.absolute.trim_end();
        if inner.absolute.is_zero() || inner.sign == Sign::Positive {
            inner.sign = Sign::None;
        }
        Self { inner }
    }

    pub fn is_zero(&self) -> bool {
        self.inner.absolute.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.inner.sign == Sign::Negative
    }

    /// Number of significant fractional digits
    pub fn scale(&self) -> usize {
        let lowest = *self.inner.absolute.magnitude_range().start();
        usize::from(lowest.unsigned_abs())
    }

    /// Integer digits of the magnitude (at least `"0"`)
    pub fn integer_digits(&self) -> String {
        let highest = *self.inner.absolute.magnitude_range().end();
        self.digits((0..=highest).rev())
    }

    /// Fractional digits of the magnitude, without trailing zeros
    pub fn fraction_digits(&self) -> String {
        let lowest = *self.inner.absolute.magnitude_range().start();
        self.digits((lowest..0).rev())
    }

    fn digits(&self, magnitudes: impl Iterator<Item = i16>) -> String {
        magnitudes
            .map(|magnitude| char::from(b'0' + self.inner.absolute.digit_at(magnitude)))
            .collect()
    }

    /// Round to at most `precision` fractional digits
    pub fn round(&self, precision: usize, mode: RoundingMode) -> Self {
        if self.scale() <= precision {
            return self.clone();
        }

        // scale() fits in i16, so a precision below it does too
        let position = -(precision as i16);
        let mut inner = self.inner.clone();
        inner.round_with_mode(position, signed_mode(mode));
        Self::normalized(inner)
    }

    pub fn to_f64(&self) -> f64 {
        // The canonical form is always valid float syntax
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

fn parse_exponent(text: &str, original: &str) -> Result<i64, FormatError> {
    let exponent: i64 = text
        .parse()
        .map_err(|_| FormatError::invalid_value(format!("{:?} has a malformed exponent", original)))?;

    if exponent.abs() > MAX_EXPONENT {
        return Err(FormatError::invalid_value(format!(
            "{:?} has an exponent beyond ±{}",
            original, MAX_EXPONENT
        )));
    }

    Ok(exponent)
}

impl FromStr for Decimal {
    type Err = FormatError;

    /// Parse plain decimal text: `12`, `-0.5`, `.5`, `+3.`, `1.5e3`
    ///
    /// `NaN` and infinities in any spelling are rejected like any other
    /// non-number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        if matches!(
            unsigned.to_ascii_lowercase().as_str(),
            "nan" | "inf" | "infinity"
        ) {
            return Err(FormatError::invalid_value(text));
        }

        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => (&unsigned[..pos], parse_exponent(&unsigned[pos + 1..], text)?),
            None => (unsigned, 0),
        };

        let (integer_part, fraction_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (integer_part.is_empty() && fraction_part.is_empty())
            || !all_digits(integer_part)
            || !all_digits(fraction_part)
        {
            return Err(FormatError::invalid_value(format!(
                "{:?} is not a number",
                text
            )));
        }

        if integer_part.len() + fraction_part.len() > MAX_DIGITS {
            return Err(FormatError::invalid_value(format!(
                "{:?} has more than {} digits",
                text, MAX_DIGITS
            )));
        }

        let integer_part = if integer_part.is_empty() { "0" } else { integer_part };
        let canonical = if fraction_part.is_empty() {
            integer_part.to_string()
        } else {
            format!("{}.{}", integer_part, fraction_part)
        };

        let mut inner = FixedDecimal::try_from_str(&canonical)
            .map_err(|_| FormatError::invalid_value(format!("{:?} is not a number", text)))?;
        // Bounded by MAX_EXPONENT
        inner.multiply_pow10(exponent as i16);
        if negative {
            inner.sign = Sign::Negative;
        }

        Ok(Self::normalized(inner))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}", self.inner.absolute)
    }
}

impl TryFrom<f64> for Decimal {
    type Error = FormatError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}
