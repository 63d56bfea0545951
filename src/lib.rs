//! statfmt - decimal-exact numeric display formatting
//!
//! Turns a raw number and a [`FormatOptions`] record into a display string:
//! grouped integer digits, rounding at a chosen precision, optional zero
//! padding, custom separators and a prefix/suffix.
//!
//! ```
//! use statfmt::{format, FormatOptions};
//!
//! let options = FormatOptions::default()
//!     .with_precision(2)
//!     .with_trailing_zeros(true)
//!     .with_prefix("$");
//! assert_eq!(format(1234.5, &options).unwrap(), "$1,234.50");
//! ```
//!
//! Formatting is pure: no global state, no mutation of inputs, safe to call
//! from any number of threads.

pub mod decimal;
pub mod error;
pub mod format;
pub mod options;
pub mod parse;

pub use decimal::Decimal;
pub use error::{FormatError, ParseError};
pub use format::{format, format_or, format_str, Formatter, PLACEHOLDER};
pub use options::{FormatOptions, RoundingMode, MAX_PRECISION};
pub use parse::{parse_formatted, parse_value};
