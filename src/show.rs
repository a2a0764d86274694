//! The `show` command.
//!
//! Inspection runs to completion before anything reaches `stdout`, so a
//! fatal error never leaves a partial summary behind.

use crate::api::TargetsApi;
use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::inspect::show_summary;
use crate::render::render;
use std::io::Write;

/// Inspect the requested version and print the result.
///
/// # Errors
///
/// Returns an error if inspection fails or output cannot be written.
pub fn run_show(
    api: &dyn TargetsApi,
    config: &Config,
    args: &ShowArgs,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let inspection = show_summary(
        api,
        &config.factory,
        &args.version,
        args.app.as_deref(),
        stderr,
    )?;
    render(&inspection, stdout)
}
