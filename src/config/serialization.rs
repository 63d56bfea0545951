//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use statfmt::FormatOptions;

use super::Config;

/// Quote a string as a TOML value (escapes quotes, backslashes, control chars)
fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

/// Table key: bare when possible, quoted otherwise
fn toml_key(s: &str) -> String {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        s.to_string()
    } else {
        toml_string(s)
    }
}

impl Config {
    /// Serialize one set of formatting options as `key = value` lines
    fn options_to_toml(options: &FormatOptions) -> String {
        let precision = match options.precision {
            Some(p) => format!("precision = {}", p),
            None => "# precision = 2            # omit to keep each value's natural digits".to_string(),
        };

        format!(
            r#"{precision}
rounding = "{rounding}"
show_trailing_zeros = {trailing}
group_separator = {group}
decimal_separator = {decimal}
prefix = {prefix}
suffix = {suffix}
"#,
            precision = precision,
            rounding = options.rounding.as_str(),
            trailing = options.show_trailing_zeros,
            group = toml_string(&options.group_separator),
            decimal = toml_string(&options.decimal_separator),
            prefix = toml_string(&options.prefix),
            suffix = toml_string(&options.suffix),
        )
    }

    /// Serialize profiles to TOML sections
    fn profiles_to_toml(&self) -> String {
        if self.profiles.is_empty() {
            // Show example comments when no profiles configured
            return r#"
# [profiles.usd]
# precision = 2
# show_trailing_zeros = true
# prefix = "$"
#
# [profiles.percent]
# precision = 1
# suffix = "%"
#
# [profiles.de]
# group_separator = "."
# decimal_separator = ","
"#
            .to_string();
        }

        let mut output = String::new();
        // BTreeMap keeps keys sorted for deterministic output
        for (name, options) in &self.profiles {
            output.push_str(&format!("\n[profiles.{}]\n", toml_key(name)));
            output.push_str(&Self::options_to_toml(options));
        }
        output
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let default_profile = match &self.default_profile {
            Some(name) => format!("default_profile = {}", toml_string(name)),
            None => "# default_profile = \"usd\"".to_string(),
        };

        format!(
            r#"# statfmt configuration
#
# Options are layered: built-in defaults, then [format], then the selected
# profile, then command-line flags.

# Profile used when --profile is not given (STATFMT_PROFILE overrides)
{default_profile}

# Base options for every value
# rounding: round (half away from zero), floor, ceil, truncate
# An empty group_separator disables grouping
[format]
{format}
# Named option sets, each inherits from [format]
{profiles}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = {file_dir}
file_rotation = "{file_rotation}"
file_prefix = {file_prefix}
"#,
            default_profile = default_profile,
            format = Self::options_to_toml(&self.format),
            profiles = self.profiles_to_toml(),
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = toml_string(&self.logging.file_dir.display().to_string()),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = toml_string(&self.logging.file_prefix),
        )
    }
}
