//! Text rendering of inspection results.

use crate::error::{Result, SourceRepo};
use crate::inspect::{AppDetails, Inspection, TargetSummary};
use crate::table::Table;
use std::io::Write;

/// Write an inspection result to `out`.
///
/// # Errors
///
/// Returns an error if writing fails or the compose data cannot be
/// serialised.
pub fn render(inspection: &Inspection, out: &mut dyn Write) -> Result<()> {
    match inspection {
        Inspection::Summary(summary) => render_summary(summary, out),
        Inspection::App(details) => render_app(details, out),
    }
}

/// CI build page for a version.
///
/// # Examples
///
/// ```
/// use fioctl_targets::render::ci_url;
///
/// assert_eq!(
///     ci_url("acme", "42"),
///     "https://ci.foundries.io/projects/acme/lmp/builds/42/"
/// );
/// ```
#[must_use]
pub fn ci_url(factory: &str, version: &str) -> String {
    format!("https://ci.foundries.io/projects/{factory}/lmp/builds/{version}/")
}

/// Commit page of a factory source repository.
#[must_use]
pub fn source_url(factory: &str, repo: SourceRepo, sha: &str) -> String {
    format!(
        "https://source.foundries.io/factories/{factory}/{}/commit/?id={sha}",
        repo.repository()
    )
}

/// Write the cross-platform summary of a version.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render_summary(summary: &TargetSummary, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Tags:\t{}", summary.tags.join(","))?;
    writeln!(out, "CI:\t{}", ci_url(&summary.factory, &summary.version))?;

    writeln!(out, "Source:")?;
    for repo in SourceRepo::ALL {
        if let Some(sha) = summary.sources.get(repo) {
            writeln!(out, "\t{}", source_url(&summary.factory, repo, sha))?;
        }
    }
    writeln!(out)?;

    let mut hashes = Table::new(["TARGET NAME", "OSTREE HASH - SHA256"]);
    for (name, hash) in &summary.hashes {
        hashes.add_row([name.as_str(), hash.as_str()]);
    }
    hashes.write_to(out)?;
    writeln!(out)?;

    let has_docker_apps = !summary.docker_apps.is_empty();
    if has_docker_apps {
        let mut apps = Table::new(["DOCKER APP", "VERSION"]);
        for (name, app) in &summary.docker_apps {
            // Both references are shown when a target carries both.
            if !app.file_name.is_empty() {
                apps.add_row([name.as_str(), app.file_name.as_str()]);
            }
            if !app.uri.is_empty() {
                apps.add_row([name.as_str(), app.uri.as_str()]);
            }
        }
        apps.write_to(out)?;
    }

    if !summary.compose_apps.is_empty() {
        if has_docker_apps {
            writeln!(out)?;
        }
        let mut apps = Table::new(["COMPOSE APP", "VERSION"]);
        for (name, app) in &summary.compose_apps {
            apps.add_row([name.as_str(), app.uri.as_str()]);
        }
        apps.write_to(out)?;
    }

    Ok(())
}

/// Write the file list and compose configuration of one app.
///
/// # Errors
///
/// Returns an error if writing fails or the compose data cannot be
/// serialised.
pub fn render_app(details: &AppDetails, out: &mut dyn Write) -> Result<()> {
    let pretty = serde_json::to_string_pretty(&details.bundle.compose_ref)?;

    writeln!(out, "Files:")?;
    for file in &details.bundle.files {
        writeln!(out, "\t{file}")?;
    }
    writeln!(out)?;
    writeln!(out, "docker-compose data:")?;
    writeln!(out, "{pretty}")?;
    Ok(())
}
