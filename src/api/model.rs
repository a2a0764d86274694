//! Wire types for the targets API.
//!
//! Targets arrive inside a signed TUF document. Only the fields the CLI
//! reads are modelled; unknown fields are ignored so that server-side
//! additions do not break decoding.

use super::target_hash::TargetHash;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Targets keyed by name, iterated in name order.
pub type TargetSet = BTreeMap<String, Target>;

/// The signed TUF targets document returned by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetsDocument {
    /// The signed portion of the document.
    pub signed: SignedTargets,
}

/// Signed payload of a TUF targets document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignedTargets {
    /// Targets keyed by name.
    #[serde(default)]
    pub targets: TargetSet,
}

/// A single release artefact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Target {
    /// Content hashes keyed by digest algorithm, e.g. `sha256`.
    #[serde(default)]
    pub hashes: BTreeMap<String, TargetHash>,
    /// Size of the artefact in bytes.
    #[serde(default)]
    pub length: u64,
    /// Undecoded custom metadata; see [`super::decode_custom`].
    #[serde(default)]
    pub custom: serde_json::Value,
}

impl Target {
    /// Return the SHA-256 content hash, if the target carries one.
    #[must_use]
    pub fn sha256(&self) -> Option<&TargetHash> {
        self.hashes.get("sha256")
    }
}

/// Release metadata embedded in a target.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TargetCustom {
    /// Target name without the version suffix.
    pub name: String,
    /// Build version shared by every platform of a release.
    pub version: String,
    /// Image format of the target.
    #[serde(rename = "targetFormat")]
    pub target_format: TargetFormat,
    /// Hardware identifiers the image is built for.
    #[serde(rename = "hardwareIds")]
    pub hardware_ids: Vec<String>,
    /// Tags assigned to the target.
    pub tags: Vec<String>,
    /// Commit of `containers.git` the release was built from.
    #[serde(rename = "containers-sha")]
    pub containers_sha: String,
    /// Commit of `lmp-manifest.git` the release was built from.
    #[serde(rename = "lmp-manifest-sha")]
    pub lmp_manifest_sha: String,
    /// Commit of `meta-subscriber-overrides.git` the release was built from.
    #[serde(rename = "meta-subscriber-overrides-sha")]
    pub overrides_sha: String,
    /// Legacy docker apps keyed by app name.
    pub docker_apps: BTreeMap<String, DockerApp>,
    /// Compose apps keyed by app name.
    #[serde(rename = "docker_compose_apps")]
    pub compose_apps: BTreeMap<String, ComposeApp>,
    /// Location of the image.
    pub uri: String,
    /// Creation timestamp as reported by the server.
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Last update timestamp as reported by the server.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Image format of a target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TargetFormat {
    /// An OSTree filesystem image.
    Ostree,
    /// A raw binary image.
    Binary,
    /// Any other, or an absent, format string.
    Other(String),
}

impl TargetFormat {
    /// Return the format as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ostree => "OSTREE",
            Self::Binary => "BINARY",
            Self::Other(value) => value,
        }
    }
}

impl Default for TargetFormat {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for TargetFormat {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OSTREE" => Self::Ostree,
            "BINARY" => Self::Binary,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A legacy docker app reference.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DockerApp {
    /// Versioned file name of the app definition.
    #[serde(rename = "filename")]
    pub file_name: String,
    /// Registry URI of the app.
    pub uri: String,
}

/// A compose app reference.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComposeApp {
    /// Pinned registry URI of the app bundle.
    pub uri: String,
}

/// Contents of a compose app as stored for a specific target.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppBundle {
    /// Files shipped in the app bundle.
    pub files: Vec<String>,
    /// The parsed compose configuration.
    #[serde(rename = "compose")]
    pub compose_ref: serde_json::Value,
}
