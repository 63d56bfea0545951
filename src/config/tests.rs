//! Configuration tests
//!
//! Round-trip tests guard the hand-written TOML serialization: when a field
//! is added to the config, these fail until `to_toml()` writes it and the
//! file layer reads it back.

use super::*;
use statfmt::RoundingMode;

fn parse(toml_str: &str) -> Result<Config> {
    let file: FileConfig = toml::from_str(toml_str)?;
    Config::from_file(file, None)
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let reloaded = parse(&toml_str).expect("default config should resolve");
    assert_eq!(reloaded.format, FormatOptions::default());
    assert!(reloaded.profiles.is_empty());
    assert_eq!(reloaded.default_profile, None);
}

/// Every option of every profile survives serialization, including
/// separators that need escaping.
#[test]
fn test_config_roundtrip_with_profiles() {
    let mut config = Config::default();
    config.format = FormatOptions::default()
        .with_precision(3)
        .with_rounding(RoundingMode::Floor);
    config.profiles.insert(
        "usd".to_string(),
        config
            .format
            .clone()
            .with_precision(2)
            .with_trailing_zeros(true)
            .with_prefix("$"),
    );
    config.profiles.insert(
        "swiss quote".to_string(),
        FormatOptions::default()
            .with_precision(0)
            .with_group_separator("'")
            .with_suffix(" \"CHF\"")
            .with_rounding(RoundingMode::Truncate),
    );
    config.default_profile = Some("usd".to_string());
    config.logging.level = "debug".to_string();
    config.logging.file_rotation = LogRotation::Hourly;

    let toml_str = config.to_toml();
    let reloaded = parse(&toml_str).unwrap_or_else(|e| {
        panic!("Config with profiles should round-trip.\nTOML:\n{}\nError: {:?}", toml_str, e)
    });

    assert_eq!(reloaded.format, config.format);
    assert_eq!(reloaded.profiles, config.profiles);
    assert_eq!(reloaded.default_profile.as_deref(), Some("usd"));
    assert_eq!(reloaded.logging.level, "debug");
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = parse("").unwrap();
    assert_eq!(config.format, FormatOptions::default());
    assert_eq!(config.logging.level, "warn");
    assert!(!config.logging.file_enabled);
    assert_eq!(config.options_for(None).unwrap(), FormatOptions::default());
}

#[test]
fn test_profiles_inherit_from_format_section() {
    let config = parse(
        r#"
[format]
precision = 1
group_separator = " "

[profiles.usd]
precision = 2
prefix = "$"
"#,
    )
    .unwrap();

    let usd = config.options_for(Some("usd")).unwrap();
    assert_eq!(usd.precision, Some(2));
    assert_eq!(usd.prefix, "$");
    assert_eq!(usd.group_separator, " ", "inherited from [format]");

    let base = config.options_for(None).unwrap();
    assert_eq!(base.precision, Some(1));
    assert!(base.prefix.is_empty());
}

#[test]
fn test_default_profile_and_override() {
    let toml_str = r#"
default_profile = "pct"

[profiles.pct]
suffix = "%"

[profiles.usd]
prefix = "$"
"#;
    let config = parse(toml_str).unwrap();
    assert_eq!(config.options_for(None).unwrap().suffix, "%");
    assert_eq!(config.options_for(Some("usd")).unwrap().prefix, "$");

    // STATFMT_PROFILE takes precedence over the file
    let file: FileConfig = toml::from_str(toml_str).unwrap();
    let config = Config::from_file(file, Some("usd".to_string())).unwrap();
    assert_eq!(config.options_for(None).unwrap().prefix, "$");
}

#[test]
fn test_unknown_profiles_are_errors() {
    let err = parse("default_profile = \"eur\"").unwrap_err();
    assert!(err.to_string().contains("eur"), "got: {}", err);

    let config = parse("[profiles.usd]\nprefix = \"$\"").unwrap();
    let err = config.options_for(Some("gbp")).unwrap_err();
    assert!(err.to_string().contains("usd"), "should list available profiles: {}", err);
}

#[test]
fn test_negative_precision_rejected() {
    let err = parse("[format]\nprecision = -1").unwrap_err();
    assert!(
        format!("{:#}", err).contains("non-negative"),
        "got: {:#}",
        err
    );
}

#[test]
fn test_unknown_rounding_rejected() {
    let err = parse("[profiles.x]\nrounding = \"bankers\"").unwrap_err();
    assert!(format!("{:#}", err).contains("profiles.x"), "got: {:#}", err);
}

#[test]
fn test_equal_separators_rejected() {
    let err = parse("[format]\ngroup_separator = \".\"\ndecimal_separator = \".\"").unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid options"), "got: {:#}", err);
}

#[test]
fn test_precision_above_maximum_rejected() {
    let err = parse("[format]\nprecision = 5000").unwrap_err();
    assert!(format!("{:#}", err).contains("maximum"), "got: {:#}", err);
}

#[test]
fn test_unknown_log_rotation_rejected() {
    let err = parse("[logging]\nfile_rotation = \"weekly\"").unwrap_err();
    assert!(format!("{:#}", err).contains("[logging]"), "got: {:#}", err);
}

#[test]
fn test_logging_section() {
    let config = parse(
        r#"
[logging]
level = "trace"
file_enabled = true
file_dir = "/tmp/statfmt-logs"
file_rotation = "never"
"#,
    )
    .unwrap();

    assert_eq!(config.logging.level, "trace");
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.file_dir, PathBuf::from("/tmp/statfmt-logs"));
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.file_prefix, "statfmt");
}

#[test]
fn test_write_default_creates_parseable_file() {
    let dir = std::env::temp_dir().join(format!("statfmt-config-test-{}", std::process::id()));
    let path = dir.join("nested").join("config.toml");

    Config::write_default(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(parse(&contents).is_ok());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_read_file_config_reports_source() {
    let dir = std::env::temp_dir().join(format!("statfmt-source-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let missing = dir.join("missing.toml");
    let (file, source) = Config::read_file_config(missing).unwrap();
    assert!(file.format.is_none());
    assert_eq!(source, None);

    let present = dir.join("config.toml");
    std::fs::write(&present, "[format]\nprefix = \"$\"\n").unwrap();
    let (file, source) = Config::read_file_config(present.clone()).unwrap();
    assert_eq!(file.format.and_then(|f| f.prefix).as_deref(), Some("$"));
    assert_eq!(source, Some(present));

    let _ = std::fs::remove_dir_all(&dir);
}
