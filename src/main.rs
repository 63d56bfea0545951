// statfmt - Numeric display formatting from the command line
//
// Formats raw numbers for dashboards, reports and shell pipelines using the
// statfmt library: decimal-exact rounding, digit grouping, zero padding and
// custom separators.
//
// Architecture:
// - CLI (clap): subcommands and per-invocation flags
// - Config: TOML file with base options, named profiles and logging settings
// - Logging (tracing): stderr output, optional rolling JSON log files

mod cli;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
