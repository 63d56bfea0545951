// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - format: Format values for display
// - parse: Read formatted text back into numbers
// - config --show / --path / --reset: Configuration management

use crate::config::{Config, LoggingConfig, VERSION};
use crate::logging;
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use statfmt::{FormatOptions, Formatter, RoundingMode};
use std::io::{BufRead, Write};
use tracing_appender::non_blocking::WorkerGuard;

/// statfmt - Decimal-exact number formatting for display
#[derive(Parser, Debug)]
#[command(name = "statfmt")]
#[command(version = VERSION)]
#[command(about = "Format numbers for display: grouping, rounding, padding", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format values (reads one value per line from stdin when none are given)
    Format {
        /// Values to format, e.g. 1234.5 -0.25 1e6
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        #[command(flatten)]
        style: StyleArgs,

        /// Print this instead of failing when a value cannot be formatted
        #[arg(long, value_name = "TEXT")]
        fallback: Option<String>,

        /// Emit one JSON object per value
        #[arg(long)]
        json: bool,
    },

    /// Recover numbers from formatted text (use `--` before text starting with '-')
    Parse {
        /// Formatted text, e.g. "$1,234.50"
        texts: Vec<String>,

        #[command(flatten)]
        style: StyleArgs,

        /// Emit one JSON object per value
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Skip the overwrite confirmation for --reset
        #[arg(long, requires = "reset")]
        yes: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Formatting flags, applied on top of the config file and profile
#[derive(Args, Debug, Default, Clone)]
pub struct StyleArgs {
    /// Named profile from the config file
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Fractional digits to display
    #[arg(short, long, value_name = "N")]
    pub precision: Option<u32>,

    /// round, floor, ceil or truncate
    #[arg(short, long, value_name = "MODE")]
    pub rounding: Option<RoundingMode>,

    /// Pad the fraction with zeros up to the precision
    #[arg(long)]
    pub trailing_zeros: bool,

    /// Separator between groups of three integer digits
    #[arg(long, value_name = "SEP")]
    pub group_sep: Option<String>,

    /// Disable digit grouping
    #[arg(long, conflicts_with = "group_sep")]
    pub no_grouping: bool,

    /// Separator between integer and fractional digits
    #[arg(long, value_name = "SEP")]
    pub decimal_sep: Option<String>,

    /// Text before the number (and before its sign)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text after the number
    #[arg(long)]
    pub suffix: Option<String>,
}

impl StyleArgs {
    /// Layer the flags over `base`
    pub fn apply(&self, base: FormatOptions) -> FormatOptions {
        let mut options = base;
        if let Some(precision) = self.precision {
            options.precision = Some(precision);
        }
        if let Some(rounding) = self.rounding {
            options.rounding = rounding;
        }
        if self.trailing_zeros {
            options.show_trailing_zeros = true;
        }
        if let Some(sep) = &self.group_sep {
            options.group_separator = sep.clone();
        }
        if self.no_grouping {
            options.group_separator = String::new();
        }
        if let Some(sep) = &self.decimal_sep {
            options.decimal_separator = sep.clone();
        }
        if let Some(prefix) = &self.prefix {
            options.prefix = prefix.clone();
        }
        if let Some(suffix) = &self.suffix {
            options.suffix = suffix.clone();
        }
        options
    }

    /// Resolve defaults -> config -> profile -> flags into a validated formatter
    fn formatter(&self, config: &Config) -> Result<Formatter> {
        let base = config.options_for(self.profile.as_deref())?;
        let options = self.apply(base);
        tracing::debug!(?options, "Resolved format options");
        Formatter::new(options).context("Invalid formatting options")
    }
}

/// One line of `--json` output
#[derive(Debug, Serialize)]
struct Record<'a> {
    input: &'a str,
    output: Option<String>,
    error: Option<String>,
}

/// Parse arguments and dispatch to the selected command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Format {
            values,
            style,
            fallback,
            json,
        } => {
            let (config, _guard) = load_config(cli.verbose)?;
            let formatter = style.formatter(&config)?;
            let inputs = collect_inputs(values)?;
            let mut stdout = std::io::stdout().lock();
            handle_format(&formatter, &inputs, fallback.as_deref(), json, &mut stdout)
        }
        Commands::Parse { texts, style, json } => {
            let (config, _guard) = load_config(cli.verbose)?;
            let formatter = style.formatter(&config)?;
            let inputs = collect_inputs(texts)?;
            let mut stdout = std::io::stdout().lock();
            handle_parse(&formatter, &inputs, json, &mut stdout)
        }
        Commands::Config {
            show,
            reset,
            yes,
            path,
        } => {
            // The file may be broken (that is what --reset is for), so log with defaults
            let _guard = logging::init(&LoggingConfig::default(), cli.verbose);
            if path {
                handle_config_path()
            } else if show {
                handle_config_show()
            } else if reset {
                handle_config_reset(yes)
            } else {
                // No flag provided, show help
                println!("Usage: statfmt config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults (--yes skips confirmation)");
                println!("  --path    Show config file path");
                Ok(())
            }
        }
    }
}

/// Load the configuration and start logging with its settings
fn load_config(verbosity: u8) -> Result<(Config, Option<WorkerGuard>)> {
    let config = Config::from_env()?;
    let guard = logging::init(&config.logging, verbosity);
    log_config_source(&config);
    Ok((config, guard))
}

fn log_config_source(config: &Config) {
    match &config.source {
        Some(path) => tracing::debug!(path = %path.display(), "Loaded config file"),
        None => tracing::debug!("No config file, using defaults"),
    }
}

/// Use the arguments, or one value per non-blank stdin line when there are none
fn collect_inputs(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    read_lines(std::io::stdin().lock()).context("Failed to read values from stdin")
}

fn read_lines(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

fn write_record(out: &mut impl Write, record: &Record<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, record).context("Failed to write JSON output")?;
    writeln!(out)?;
    Ok(())
}

/// Format every input; without a fallback the first failure aborts
/// (in JSON mode every value is reported and the failure count is returned)
fn handle_format(
    formatter: &Formatter,
    inputs: &[String],
    fallback: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut failures = 0usize;

    for input in inputs {
        let (output, error) = match formatter.format_str(input) {
            Ok(formatted) => (Some(formatted), None),
            Err(err) => match fallback {
                Some(text) => {
                    tracing::warn!(input = %input, error = %err, "Using fallback display");
                    (Some(text.to_string()), Some(err.to_string()))
                }
                None if json => {
                    failures += 1;
                    (None, Some(err.to_string()))
                }
                None => return Err(err).with_context(|| format!("Cannot format {:?}", input)),
            },
        };

        if json {
            write_record(
                out,
                &Record {
                    input,
                    output,
                    error,
                },
            )?;
        } else if let Some(output) = output {
            writeln!(out, "{}", output)?;
        }
    }

    if failures > 0 {
        bail!("{} of {} values could not be formatted", failures, inputs.len());
    }
    Ok(())
}

fn handle_parse(
    formatter: &Formatter,
    inputs: &[String],
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut failures = 0usize;

    for input in inputs {
        match formatter.parse(input) {
            Ok(value) if json => write_record(
                out,
                &Record {
                    input,
                    output: Some(value.to_string()),
                    error: None,
                },
            )?,
            Ok(value) => writeln!(out, "{}", value)?,
            Err(err) if json => {
                failures += 1;
                write_record(
                    out,
                    &Record {
                        input,
                        output: None,
                        error: Some(err.to_string()),
                    },
                )?;
            }
            Err(err) => return Err(err).with_context(|| format!("Cannot parse {:?}", input)),
        }
    }

    if failures > 0 {
        bail!("{} of {} values could not be parsed", failures, inputs.len());
    }
    Ok(())
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;
    log_config_source(&config);

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    match &config.source {
        Some(path) => println!("# Source: {}", path.display()),
        None => println!("# Source: defaults (no config file)"),
    }
    Ok(())
}

fn handle_config_reset(yes: bool) -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() && !yes {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::write_default(&path)?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(options: FormatOptions) -> Formatter {
        Formatter::new(options).unwrap()
    }

    fn run_format(
        formatter: &Formatter,
        inputs: &[&str],
        fallback: Option<&str>,
        json: bool,
    ) -> (Result<()>, String) {
        let inputs: Vec<String> = inputs.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let result = handle_format(formatter, &inputs, fallback, json, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_parses_negative_values_and_flags() {
        let cli = Cli::try_parse_from([
            "statfmt",
            "format",
            "-1234.5",
            "2.5",
            "--precision",
            "0",
            "--rounding",
            "floor",
            "--prefix",
            "$",
        ])
        .unwrap();

        match cli.command {
            Commands::Format { values, style, .. } => {
                assert_eq!(values, vec!["-1234.5", "2.5"]);
                assert_eq!(style.precision, Some(0));
                assert_eq!(style.rounding, Some(RoundingMode::Floor));
                assert_eq!(style.prefix.as_deref(), Some("$"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_precision_beyond_maximum_is_rejected() {
        let cli = Cli::try_parse_from([
            "statfmt",
            "format",
            "1",
            "-p",
            "4294967295",
            "--trailing-zeros",
        ])
        .unwrap();

        match cli.command {
            Commands::Format { style, .. } => {
                let err = style.formatter(&Config::default()).unwrap_err();
                assert!(format!("{:#}", err).contains("maximum"), "got: {:#}", err);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_rounding() {
        let result = Cli::try_parse_from(["statfmt", "format", "1", "--rounding", "bankers"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_grouping_flags_conflict() {
        let result = Cli::try_parse_from([
            "statfmt",
            "format",
            "1",
            "--group-sep",
            " ",
            "--no-grouping",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_style_args_override_base() {
        let base = FormatOptions::default().with_prefix("$").with_precision(3);
        let style = StyleArgs {
            precision: Some(1),
            trailing_zeros: true,
            no_grouping: true,
            suffix: Some(" USD".to_string()),
            ..Default::default()
        };

        let options = style.apply(base);
        assert_eq!(options.precision, Some(1));
        assert!(options.show_trailing_zeros);
        assert_eq!(options.group_separator, "");
        assert_eq!(options.prefix, "$", "untouched fields keep the base value");
        assert_eq!(options.suffix, " USD");
    }

    #[test]
    fn test_style_args_use_profile() {
        let mut config = Config::default();
        config.profiles.insert(
            "usd".to_string(),
            FormatOptions::default().with_prefix("$").with_precision(2),
        );
        let style = StyleArgs {
            profile: Some("usd".to_string()),
            ..Default::default()
        };

        let formatter = style.formatter(&config).unwrap();
        assert_eq!(formatter.format(1234.567).unwrap(), "$1,234.57");

        let missing = StyleArgs {
            profile: Some("eur".to_string()),
            ..Default::default()
        };
        assert!(missing.formatter(&config).is_err());
    }

    #[test]
    fn test_format_writes_one_line_per_value() {
        let formatter = formatter(FormatOptions::default().with_precision(2));
        let (result, output) = run_format(&formatter, &["1234.567", "-0.001", "1.005"], None, false);
        assert!(result.is_ok());
        assert_eq!(output, "1,234.57\n0\n1.01\n");
    }

    #[test]
    fn test_format_aborts_without_fallback() {
        let formatter = formatter(FormatOptions::default());
        let (result, output) = run_format(&formatter, &["1", "NaN", "2"], None, false);
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("NaN"), "got: {:#}", err);
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_format_uses_fallback() {
        let formatter = formatter(FormatOptions::default());
        let (result, output) =
            run_format(&formatter, &["1000", "inf", "abc"], Some(statfmt::PLACEHOLDER), false);
        assert!(result.is_ok());
        assert_eq!(output, "1,000\n—\n—\n");
    }

    #[test]
    fn test_format_json_reports_every_value() {
        let formatter = formatter(FormatOptions::default());
        let (result, output) = run_format(&formatter, &["1500", "oops"], None, true);
        assert!(result.is_err(), "a failed value should fail the run");

        let records: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["input"], "1500");
        assert_eq!(records[0]["output"], "1,500");
        assert!(records[0]["error"].is_null());
        assert!(records[1]["output"].is_null());
        assert!(records[1]["error"].as_str().unwrap().contains("Invalid value"));
    }

    #[test]
    fn test_parse_command_output() {
        let formatter = formatter(FormatOptions::default().with_prefix("$"));
        let inputs = vec!["$1,234.50".to_string(), "$-7".to_string()];
        let mut out = Vec::new();
        handle_parse(&formatter, &inputs, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1234.5\n-7\n");

        let bad = vec!["1,234".to_string()];
        let mut out = Vec::new();
        assert!(handle_parse(&formatter, &bad, false, &mut out).is_err());
    }

    #[test]
    fn test_read_lines_skips_blank_lines() {
        let input = "1\n\n  2.5  \n\t\n-3\n";
        let lines = read_lines(std::io::Cursor::new(input)).unwrap();
        assert_eq!(lines, vec!["1", "2.5", "-3"]);
    }
}
