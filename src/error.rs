//! Error types for the targets CLI.
//!
//! Every fatal condition of the `show` command is a [`TargetsError`]
//! variant. Only the binary entrypoint turns one into an exit status.

use crate::api::ApiError;
use crate::config::ConfigError;
use std::fmt;
use thiserror::Error;

/// Source repositories whose commits must agree across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRepo {
    /// `lmp-manifest.git`
    LmpManifest,
    /// `meta-subscriber-overrides.git`
    MetaSubscriberOverrides,
    /// `containers.git`
    Containers,
}

impl SourceRepo {
    /// Repositories in the order their links are printed.
    pub const ALL: [Self; 3] = [
        Self::LmpManifest,
        Self::MetaSubscriberOverrides,
        Self::Containers,
    ];

    /// Repository name as hosted by the source server.
    #[must_use]
    pub const fn repository(self) -> &'static str {
        match self {
            Self::LmpManifest => "lmp-manifest.git",
            Self::MetaSubscriberOverrides => "meta-subscriber-overrides.git",
            Self::Containers => "containers.git",
        }
    }
}

impl fmt::Display for SourceRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.repository())
    }
}

/// Errors that end a `show` invocation.
#[derive(Debug, Error)]
pub enum TargetsError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A call to the targets API failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested app is not part of the matching target.
    #[error("App {app} not found in target {target}")]
    AppNotFound {
        /// Name of the requested app.
        app: String,
        /// Target that was searched.
        target: String,
    },

    /// Platforms of one version were built from different commits.
    #[error("Git hashes for {repository} do not match across platforms ({first} != {second})")]
    HashMismatch {
        /// Repository whose commits disagree.
        repository: SourceRepo,
        /// Commit recorded from an earlier target.
        first: String,
        /// Conflicting commit from a later target.
        second: String,
    },

    /// The compose configuration could not be serialised.
    #[error("failed to format compose data: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type alias using [`TargetsError`].
pub type Result<T> = std::result::Result<T, TargetsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::manifest(SourceRepo::LmpManifest, "lmp-manifest.git")]
    #[case::overrides(SourceRepo::MetaSubscriberOverrides, "meta-subscriber-overrides.git")]
    #[case::containers(SourceRepo::Containers, "containers.git")]
    fn hash_mismatch_names_the_repository(#[case] repo: SourceRepo, #[case] name: &str) {
        let err = TargetsError::HashMismatch {
            repository: repo,
            first: "aaa".to_owned(),
            second: "bbb".to_owned(),
        };

        let message = err.to_string();
        assert!(message.contains(&format!("Git hashes for {name}")), "{message}");
        assert!(message.contains("do not match across platforms"));
    }

    #[test]
    fn app_not_found_mentions_app_and_target() {
        let err = TargetsError::AppNotFound {
            app: "shellhttpd".to_owned(),
            target: "qemu-lmp-3".to_owned(),
        };

        assert_eq!(
            err.to_string(),
            "App shellhttpd not found in target qemu-lmp-3"
        );
    }

    #[test]
    fn source_links_follow_manifest_overrides_containers_order() {
        let names: Vec<_> = SourceRepo::ALL.iter().map(|repo| repo.repository()).collect();
        assert_eq!(
            names,
            ["lmp-manifest.git", "meta-subscriber-overrides.git", "containers.git"]
        );
    }
}
