//! HTTP implementation of [`TargetsApi`] using `ureq`.

use super::model::{AppBundle, TargetSet, TargetsDocument};
use super::{ApiError, TargetsApi};
use crate::config::Config;
use log::debug;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Header carrying the API token.
const TOKEN_HEADER: &str = "OSF-TOKEN";

/// Upper bound on response bodies; large factories carry many targets.
const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Targets API client speaking JSON over HTTPS.
pub struct HttpApi {
    base_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl HttpApi {
    /// Create a client for `base_url`, sending `token` with each request.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token,
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// Create a client from resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.as_str(), config.token.clone(), config.timeout)
    }

    /// URL of the TUF targets document for `factory`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fioctl_targets::api::HttpApi;
    /// use std::time::Duration;
    ///
    /// let api = HttpApi::new("https://api.example.test/", None, Duration::from_secs(5));
    /// assert_eq!(
    ///     api.targets_url("acme"),
    ///     "https://api.example.test/ota/repo/acme/api/v1/user_repo/targets.json"
    /// );
    /// ```
    #[must_use]
    pub fn targets_url(&self, factory: &str) -> String {
        format!(
            "{}/ota/repo/{factory}/api/v1/user_repo/targets.json",
            self.base_url
        )
    }

    /// URL of a compose app bundle within a target.
    #[must_use]
    pub fn app_bundle_url(&self, factory: &str, target: &str, app: &str) -> String {
        format!(
            "{}/ota/factories/{factory}/targets/{target}/compose-apps/{app}/",
            self.base_url
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {url}");
        let mut request = self.agent.get(url);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token.as_str());
        }
        let response = request.call().map_err(|e| map_ureq_error(url, &e))?;
        let body = response
            .into_body()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(|e| ApiError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse {
            url: url.to_owned(),
            reason: e.to_string(),
        })
    }
}

impl TargetsApi for HttpApi {
    fn list_targets(&self, factory: &str) -> Result<TargetSet, ApiError> {
        let document: TargetsDocument = self.get_json(&self.targets_url(factory))?;
        Ok(document.signed.targets)
    }

    fn fetch_app_bundle(
        &self,
        factory: &str,
        target: &str,
        app: &str,
    ) -> Result<AppBundle, ApiError> {
        self.get_json(&self.app_bundle_url(factory, target, app))
    }
}

/// Map a ureq error to an [`ApiError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> ApiError {
    match err {
        ureq::Error::StatusCode(404) => ApiError::NotFound {
            url: url.to_owned(),
        },
        ureq::Error::StatusCode(401 | 403) => ApiError::Unauthorized {
            url: url.to_owned(),
        },
        other => ApiError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
