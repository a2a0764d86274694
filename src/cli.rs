//! CLI argument definitions.
//!
//! Kept apart from the entrypoint so tests can parse arguments without
//! running anything.

use crate::config::ConfigOverrides;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

/// Inspect the release targets of a Foundries.io factory.
#[derive(Parser, Debug)]
#[command(name = "fioctl-targets")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Summarise version 42 across platforms:\n",
    "    $ fioctl-targets --factory acme show 42\n\n",
    "  Show the files and compose data of one app:\n",
    "    $ fioctl-targets --factory acme show 42 shellhttpd\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Factory to operate on.
    #[arg(short, long, global = true, env = "FIOCTL_FACTORY", value_name = "FACTORY")]
    pub factory: Option<String>,

    /// API token sent with each request.
    #[arg(long, global = true, env = "FIOCTL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the API [default: public Foundries.io endpoint].
    #[arg(long, global = true, env = "FIOCTL_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Configuration file [default: platform config directory].
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show details of a specific target version.
    Show(ShowArgs),
}

/// Arguments for the `show` command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ShowArgs {
    /// Version of the target to show.
    pub version: String,

    /// Show only this compose app.
    pub app: Option<String>,
}

impl Cli {
    /// Settings given on the command line or through the environment.
    #[must_use]
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            factory: self.factory.clone(),
            token: self.token.clone(),
            api_url: self.api_url.clone(),
            config_path: self.config.clone(),
        }
    }

    /// Log level implied by `--quiet` and `--verbose`.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
