//! Formatting sections: `[format]` and `[profiles.NAME]`
//!
//! Both sections share one shape. `[format]` is layered over the built-in
//! defaults, and every profile is layered over the resolved `[format]`.

use serde::Deserialize;
use statfmt::{FormatError, FormatOptions};

/// Formatting settings as loaded from config file
///
/// `precision` is signed here so a negative value in the file is reported
/// instead of failing as a type mismatch.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FileFormat {
    pub precision: Option<i64>,
    pub rounding: Option<String>,
    pub show_trailing_zeros: Option<bool>,
    pub group_separator: Option<String>,
    pub decimal_separator: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl FileFormat {
    /// Layer these settings over `base` and validate the result
    pub fn apply_to(&self, base: &FormatOptions) -> Result<FormatOptions, FormatError> {
        let precision = match self.precision {
            Some(p) if p < 0 => {
                return Err(FormatError::InvalidOptions(format!(
                    "precision must be non-negative, got {}",
                    p
                )))
            }
            Some(p) => Some(u32::try_from(p).map_err(|_| {
                FormatError::InvalidOptions(format!("precision {} is too large", p))
            })?),
            None => base.precision,
        };

        let rounding = match &self.rounding {
            Some(mode) => mode.parse()?,
            None => base.rounding,
        };

        let options = FormatOptions {
            precision,
            rounding,
            show_trailing_zeros: self
                .show_trailing_zeros
                .unwrap_or(base.show_trailing_zeros),
            group_separator: self
                .group_separator
                .clone()
                .unwrap_or_else(|| base.group_separator.clone()),
            decimal_separator: self
                .decimal_separator
                .clone()
                .unwrap_or_else(|| base.decimal_separator.clone()),
            prefix: self.prefix.clone().unwrap_or_else(|| base.prefix.clone()),
            suffix: self.suffix.clone().unwrap_or_else(|| base.suffix.clone()),
        };

        options.validate()?;
        Ok(options)
    }
}
