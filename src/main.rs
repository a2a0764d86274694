//! `fioctl-targets` CLI entrypoint.
//!
//! Parses arguments, resolves configuration, runs the requested command, and
//! maps any fatal error to an `ERROR:` line on stderr and exit status 1.

use clap::Parser;
use fioctl_targets::api::HttpApi;
use fioctl_targets::cli::{Cli, Command};
use fioctl_targets::config::Config;
use fioctl_targets::error::Result;
use fioctl_targets::show::run_show;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let config = Config::load(&cli.config_overrides())?;
    let api = HttpApi::from_config(&config);

    match &cli.command {
        Command::Show(args) => run_show(&api, &config, args, stdout, stderr),
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("ERROR: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
