//! Factory configuration.
//!
//! Settings are layered: command-line flags (which clap also fills from
//! `FIOCTL_*` environment variables) take precedence over the TOML config
//! file, which takes precedence over built-in defaults. The resolved
//! [`Config`] is passed explicitly to everything that needs the factory name
//! or API location.

use camino::{Utf8Path, Utf8PathBuf};
use directories_next::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.foundries.io";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File name looked up in the platform configuration directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors arising while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path of the file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path of the file.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// No factory was given on the command line, environment, or file.
    #[error("no factory configured; pass --factory, set FIOCTL_FACTORY, or add `factory` to the config file")]
    MissingFactory,
}

/// Result type alias using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Factory whose targets are inspected.
    pub factory: String,
    /// Base URL of the API.
    pub api_url: String,
    /// Token sent with API requests.
    pub token: Option<String>,
    /// Global timeout for each request.
    pub timeout: Duration,
}

/// Contents of the TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Default factory name.
    pub factory: Option<String>,
    /// API token.
    pub token: Option<String>,
    /// Base URL of the API.
    pub api_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid TOML or
    /// contains unknown keys.
    pub fn parse(path: &Utf8Path, contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }

    /// Load the configuration file.
    ///
    /// An explicitly requested file must exist. When no path is given the
    /// platform default is used, and its absence yields an empty
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(explicit: Option<&Utf8Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::read(&path),
                Some(path) => {
                    debug!("no config file at {path}; using defaults");
                    Ok(Self::default())
                }
                None => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Utf8Path) -> Result<Self> {
        debug!("reading config file {path}");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(path, &contents)
    }
}

/// Settings supplied on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Factory name.
    pub factory: Option<String>,
    /// API token.
    pub token: Option<String>,
    /// Base URL of the API.
    pub api_url: Option<String>,
    /// Explicit configuration file.
    pub config_path: Option<Utf8PathBuf>,
}

impl Config {
    /// Resolve configuration from overrides and the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is unreadable or invalid,
    /// or if no factory is configured.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let file = ConfigFile::load(overrides.config_path.as_deref())?;
        Self::resolve(overrides, file)
    }

    /// Merge overrides over file settings and fill in defaults.
    ///
    /// Blank values count as absent, so an empty `FIOCTL_FACTORY` does not
    /// mask the factory from the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFactory`] if neither source names a
    /// factory.
    ///
    /// # Examples
    ///
    /// ```
    /// use fioctl_targets::config::{Config, ConfigFile, ConfigOverrides};
    ///
    /// let file = ConfigFile {
    ///     factory: Some("acme".to_owned()),
    ///     ..ConfigFile::default()
    /// };
    /// let config = Config::resolve(&ConfigOverrides::default(), file)?;
    /// assert_eq!(config.factory, "acme");
    /// assert_eq!(config.api_url, "https://api.foundries.io");
    /// # Ok::<(), fioctl_targets::config::ConfigError>(())
    /// ```
    pub fn resolve(overrides: &ConfigOverrides, file: ConfigFile) -> Result<Self> {
        let factory = pick(overrides.factory.as_deref(), file.factory)
            .ok_or(ConfigError::MissingFactory)?;
        let api_url = pick(overrides.api_url.as_deref(), file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let token = pick(overrides.token.as_deref(), file.token);
        let timeout = Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            factory,
            api_url,
            token,
            timeout,
        })
    }
}

/// Return the first non-blank value, trimmed.
fn pick(preferred: Option<&str>, fallback: Option<String>) -> Option<String> {
    preferred
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .or_else(|| {
            fallback
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        })
}

/// Platform-specific location of the configuration file.
#[must_use]
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("io", "foundries", "fioctl")?;
    let dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
    Some(dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn overrides_with_factory(factory: &str) -> ConfigOverrides {
        ConfigOverrides {
            factory: Some(factory.to_owned()),
            ..ConfigOverrides::default()
        }
    }

    #[rstest]
    fn defaults_fill_api_url_and_timeout() {
        let config = Config::resolve(&overrides_with_factory("acme"), ConfigFile::default())
            .expect("factory is set");

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.token.is_none());
    }

    #[rstest]
    fn overrides_win_over_file_values() {
        let file = ConfigFile {
            factory: Some("from-file".to_owned()),
            token: Some("file-token".to_owned()),
            api_url: Some("https://file.example.test".to_owned()),
            timeout_secs: Some(5),
        };
        let overrides = ConfigOverrides {
            factory: Some("from-cli".to_owned()),
            token: Some("cli-token".to_owned()),
            api_url: None,
            config_path: None,
        };

        let config = Config::resolve(&overrides, file).expect("factory is set");

        assert_eq!(config.factory, "from-cli");
        assert_eq!(config.token.as_deref(), Some("cli-token"));
        assert_eq!(config.api_url, "https://file.example.test");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case::absent(None)]
    #[case::blank(Some("   "))]
    fn missing_factory_is_an_error(#[case] factory: Option<&str>) {
        let overrides = ConfigOverrides {
            factory: factory.map(str::to_owned),
            ..ConfigOverrides::default()
        };

        let err = Config::resolve(&overrides, ConfigFile::default()).expect_err("no factory");
        assert!(matches!(err, ConfigError::MissingFactory));
    }

    #[rstest]
    fn blank_override_falls_back_to_file() {
        let file = ConfigFile {
            factory: Some("acme".to_owned()),
            ..ConfigFile::default()
        };

        let config = Config::resolve(&overrides_with_factory(""), file).expect("file factory");
        assert_eq!(config.factory, "acme");
    }

    #[rstest]
    fn parses_all_keys_from_toml() {
        let source = concat!(
            "factory = \"acme\"\n",
            "token = \"secret\"\n",
            "api_url = \"https://api.example.test\"\n",
            "timeout_secs = 10\n",
        );

        let file = ConfigFile::parse(Utf8Path::new("config.toml"), source).expect("valid TOML");
        assert_eq!(file.factory.as_deref(), Some("acme"));
        assert_eq!(file.timeout_secs, Some(10));
    }

    #[rstest]
    fn rejects_unknown_keys() {
        let err = ConfigFile::parse(Utf8Path::new("config.toml"), "colour = true\n")
            .expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[rstest]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("fioctl.toml")).expect("UTF-8 path");
        std::fs::write(&path, "factory = \"acme\"\n").expect("write config");

        let file = ConfigFile::load(Some(path.as_path())).expect("readable config");
        assert_eq!(file.factory.as_deref(), Some("acme"));
    }

    #[rstest]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.toml")).expect("UTF-8 path");

        let err = ConfigFile::load(Some(path.as_path())).expect_err("file does not exist");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
