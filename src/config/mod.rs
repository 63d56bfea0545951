//! Configuration for the formatter CLI
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/statfmt/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! Command-line flags are applied on top of the resolved options by the CLI.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use statfmt::FormatOptions;
use std::collections::BTreeMap;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod formatting;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use formatting::FileFormat;
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Base formatting options (built-in defaults + `[format]`)
    pub format: FormatOptions,

    /// Profile used when none is named on the command line
    pub default_profile: Option<String>,

    /// Named option sets, each already layered over `format`
    pub profiles: BTreeMap<String, FormatOptions>,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Config file the settings came from (`None` when running on defaults)
    pub source: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub default_profile: Option<String>,

    /// Optional [format] section
    pub format: Option<FileFormat>,

    /// Optional [profiles.X] sections
    #[serde(default)]
    pub profiles: BTreeMap<String, FileFormat>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: $STATFMT_CONFIG, else ~/.config/statfmt/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("STATFMT_CONFIG").filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|p| p.join(".config").join("statfmt").join("config.toml"))
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error: a broken config should fail fast, not silently
    /// fall back to defaults while the user debugs the wrong thing.
    fn load_file_config() -> Result<(FileConfig, Option<PathBuf>)> {
        match Self::config_path() {
            Some(path) => Self::read_file_config(path),
            None => Ok((FileConfig::default(), None)),
        }
    }

    /// Read `path`, returning it as the source only when the file exists
    pub(crate) fn read_file_config(path: PathBuf) -> Result<(FileConfig, Option<PathBuf>)> {
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let file = toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?;
                Ok((file, Some(path)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok((FileConfig::default(), None))
            }
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let (file, source) = Self::load_file_config()?;

        // Profile: env > file
        let profile = std::env::var("STATFMT_PROFILE")
            .ok()
            .filter(|p| !p.trim().is_empty());

        let mut config = Self::from_file(file, profile)?;
        config.source = source;
        Ok(config)
    }

    /// Resolve a parsed config file into validated options
    pub(crate) fn from_file(file: FileConfig, profile_override: Option<String>) -> Result<Self> {
        let format = file
            .format
            .unwrap_or_default()
            .apply_to(&FormatOptions::default())
            .context("Invalid [format] section")?;

        let mut profiles = BTreeMap::new();
        for (name, section) in &file.profiles {
            let options = section
                .apply_to(&format)
                .with_context(|| format!("Invalid [profiles.{}] section", name))?;
            profiles.insert(name.clone(), options);
        }

        let default_profile = profile_override.or(file.default_profile);
        if let Some(name) = &default_profile {
            if !profiles.contains_key(name) {
                bail!(
                    "Default profile {:?} is not defined (available: {})",
                    name,
                    Self::profile_list(&profiles)
                );
            }
        }

        let logging = LoggingConfig::from_file(file.logging)?;

        Ok(Self {
            format,
            default_profile,
            profiles,
            logging,
            source: None,
        })
    }

    /// Options for a named profile, the default profile, or the base `[format]`
    pub fn options_for(&self, profile: Option<&str>) -> Result<FormatOptions> {
        match profile.or(self.default_profile.as_deref()) {
            Some(name) => self.profiles.get(name).cloned().with_context(|| {
                format!(
                    "Unknown profile {:?} (available: {})",
                    name,
                    Self::profile_list(&self.profiles)
                )
            }),
            None => Ok(self.format.clone()),
        }
    }

    fn profile_list(profiles: &BTreeMap<String, FormatOptions>) -> String {
        if profiles.is_empty() {
            "none".to_string()
        } else {
            profiles.keys().cloned().collect::<Vec<_>>().join(", ")
        }
    }

    /// Write the default configuration to `path`, creating parent directories
    pub fn write_default(path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Error creating directory {}", parent.display()))?;
        }

        // Config::default().to_toml() is the single source of truth
        std::fs::write(path, Self::default().to_toml())
            .with_context(|| format!("Error writing config {}", path.display()))
    }
}
