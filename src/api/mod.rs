//! Access to the factory targets API.
//!
//! The [`TargetsApi`] trait covers the two remote calls the `show` command
//! needs, so inspection logic can be exercised against mocks and in-memory
//! fakes. [`HttpApi`] is the production implementation.

pub mod http;
pub mod model;
pub mod target_hash;

pub use http::HttpApi;
pub use model::{AppBundle, ComposeApp, DockerApp, Target, TargetCustom, TargetFormat, TargetSet};
pub use target_hash::TargetHash;

use serde::Deserialize;

/// Remote operations consumed by the target inspector.
///
/// # Examples
///
/// ```no_run
/// use fioctl_targets::api::{HttpApi, TargetsApi};
/// use std::time::Duration;
///
/// let api = HttpApi::new("https://api.foundries.io", None, Duration::from_secs(30));
/// let targets = api.list_targets("acme")?;
/// # Ok::<(), fioctl_targets::api::ApiError>(())
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait TargetsApi {
    /// Fetch every target known to `factory`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    fn list_targets(&self, factory: &str) -> Result<TargetSet, ApiError>;

    /// Fetch the file manifest and compose configuration of one app in a
    /// target.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    fn fetch_app_bundle(
        &self,
        factory: &str,
        target: &str,
        app: &str,
    ) -> Result<AppBundle, ApiError>;
}

/// Errors arising from targets API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request failed.
    #[error("request to {url} failed: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The API rejected the credentials (HTTP 401 or 403).
    #[error("not authorised to access {url}; check the API token")]
    Unauthorized {
        /// The URL that rejected the request.
        url: String,
    },

    /// The response body was not the expected JSON document.
    #[error("unexpected response from {url}: {reason}")]
    InvalidResponse {
        /// The URL that produced the response.
        url: String,
        /// Description of the decode failure.
        reason: String,
    },

    /// A target's custom metadata could not be decoded.
    #[error("invalid custom metadata for target {target}: {source}")]
    Decode {
        /// Name of the target carrying the metadata.
        target: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Decode the custom metadata attached to a target.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the metadata is missing or malformed.
///
/// # Examples
///
/// ```
/// use fioctl_targets::api::{Target, TargetFormat, decode_custom};
/// use serde_json::json;
///
/// let target: Target = serde_json::from_value(json!({
///     "hashes": {"sha256": "00ff"},
///     "custom": {"version": "42", "targetFormat": "OSTREE"}
/// }))?;
/// let custom = decode_custom("raspberrypi4-64-lmp-42", &target)?;
/// assert_eq!(custom.version, "42");
/// assert_eq!(custom.target_format, TargetFormat::Ostree);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_custom(name: &str, target: &Target) -> Result<TargetCustom, ApiError> {
    TargetCustom::deserialize(&target.custom).map_err(|source| ApiError::Decode {
        target: name.to_owned(),
        source,
    })
}
