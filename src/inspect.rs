//! Target inspection for the `show` command.
//!
//! A release version is built once per platform, producing one target per
//! platform. [`show_summary`] gathers those targets, checks that they were
//! built from the same source commits, and collects what the summary view
//! prints. When an app name is given it hands over to [`show_app`] for the
//! first matching target instead.
//!
//! Targets are scanned in name order. Later targets replace the tags and app
//! lists recorded from earlier ones, so the summary reflects the last target
//! by name.

use crate::api::{
    AppBundle, ComposeApp, DockerApp, TargetCustom, TargetFormat, TargetHash, TargetsApi,
    decode_custom,
};
use crate::error::{Result, SourceRepo, TargetsError};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io::Write;

/// Outcome of inspecting a version.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection {
    /// Cross-platform summary of a version.
    Summary(TargetSummary),
    /// Details of a single app in one target.
    App(AppDetails),
}

/// Aggregated metadata of every OSTree target of a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSummary {
    /// Factory the targets belong to.
    pub factory: String,
    /// Version that was inspected.
    pub version: String,
    /// Tags of the last target scanned.
    pub tags: Vec<String>,
    /// Source commits agreed on by every target.
    pub sources: SourceCommits,
    /// Base64 SHA-256 OSTree hash keyed by target name.
    pub hashes: BTreeMap<String, String>,
    /// Legacy docker apps of the last target scanned.
    pub docker_apps: BTreeMap<String, DockerApp>,
    /// Compose apps of the last target scanned.
    pub compose_apps: BTreeMap<String, ComposeApp>,
}

/// Commits of the source repositories a version was built from.
///
/// Empty strings mean no target reported a commit for that repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCommits {
    /// Commit of `lmp-manifest.git`.
    pub manifest: String,
    /// Commit of `meta-subscriber-overrides.git`.
    pub overrides: String,
    /// Commit of `containers.git`.
    pub containers: String,
}

impl SourceCommits {
    /// Return the recorded commit for `repo`, if any.
    #[must_use]
    pub fn get(&self, repo: SourceRepo) -> Option<&str> {
        let sha = match repo {
            SourceRepo::LmpManifest => &self.manifest,
            SourceRepo::MetaSubscriberOverrides => &self.overrides,
            SourceRepo::Containers => &self.containers,
        };
        Some(sha.as_str()).filter(|sha| !sha.is_empty())
    }

    /// Merge the commits reported by one target.
    ///
    /// # Errors
    ///
    /// Returns [`TargetsError::HashMismatch`] when the target reports a
    /// commit that differs from one recorded earlier.
    pub fn record(&mut self, custom: &TargetCustom) -> Result<()> {
        confirm(
            &mut self.containers,
            &custom.containers_sha,
            SourceRepo::Containers,
        )?;
        confirm(
            &mut self.manifest,
            &custom.lmp_manifest_sha,
            SourceRepo::LmpManifest,
        )?;
        confirm(
            &mut self.overrides,
            &custom.overrides_sha,
            SourceRepo::MetaSubscriberOverrides,
        )
    }
}

fn confirm(recorded: &mut String, candidate: &str, repo: SourceRepo) -> Result<()> {
    if candidate.is_empty() {
        return Ok(());
    }
    if !recorded.is_empty() && recorded.as_str() != candidate {
        return Err(TargetsError::HashMismatch {
            repository: repo,
            first: recorded.clone(),
            second: candidate.to_owned(),
        });
    }
    candidate.clone_into(recorded);
    Ok(())
}

/// A compose app bundle fetched for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct AppDetails {
    /// Target the bundle belongs to.
    pub target: String,
    /// App name.
    pub app: String,
    /// Files and compose configuration of the app.
    pub bundle: AppBundle,
}

/// Fetch the bundle of `app_name` from `target_name`.
///
/// # Errors
///
/// Returns [`TargetsError::AppNotFound`] if the target's metadata does not
/// list the app as a compose app, or the API error if the fetch fails.
pub fn show_app(
    api: &dyn TargetsApi,
    factory: &str,
    target_name: &str,
    app_name: &str,
    custom: &TargetCustom,
) -> Result<AppDetails> {
    if !custom.compose_apps.contains_key(app_name) {
        return Err(TargetsError::AppNotFound {
            app: app_name.to_owned(),
            target: target_name.to_owned(),
        });
    }
    debug!("fetching {app_name} from {target_name}");
    let bundle = api.fetch_app_bundle(factory, target_name, app_name)?;
    Ok(AppDetails {
        target: target_name.to_owned(),
        app: app_name.to_owned(),
        bundle,
    })
}

/// Inspect every OSTree target of `version` in `factory`.
///
/// Targets whose metadata cannot be decoded are reported on `diagnostics`
/// and skipped.
///
/// # Errors
///
/// Returns an error if the target list cannot be fetched, if the targets
/// disagree on a source commit, or if the app lookup fails.
pub fn show_summary(
    api: &dyn TargetsApi,
    factory: &str,
    version: &str,
    app: Option<&str>,
    diagnostics: &mut dyn Write,
) -> Result<Inspection> {
    debug!("showing target for {factory} {version}");
    let targets = api.list_targets(factory)?;

    let mut summary = TargetSummary {
        factory: factory.to_owned(),
        version: version.to_owned(),
        ..TargetSummary::default()
    };

    for (name, target) in &targets {
        let custom = match decode_custom(name, target) {
            Ok(custom) => custom,
            Err(err) => {
                warn!("{err}");
                report(diagnostics, &err);
                continue;
            }
        };
        if custom.version != version {
            continue;
        }
        if custom.target_format != TargetFormat::Ostree {
            debug!("skipping non-ostree target {name} ({})", custom.target_format);
            continue;
        }
        if let Some(app_name) = app {
            return show_app(api, factory, name, app_name, &custom).map(Inspection::App);
        }

        summary.sources.record(&custom)?;
        let hash = target
            .sha256()
            .map(TargetHash::to_base64)
            .unwrap_or_default();
        debug!("recorded {name}");
        summary.hashes.insert(name.clone(), hash);
        summary.docker_apps = custom.docker_apps;
        summary.compose_apps = custom.compose_apps;
        summary.tags = custom.tags;
    }

    Ok(Inspection::Summary(summary))
}

fn report(diagnostics: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(diagnostics, "ERROR: {message}").is_err() {
        // Best-effort reporting; the warning has already been logged.
    }
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
