//! Client configuration.
//!
//! Values are layered from lowest to highest precedence: built-in defaults,
//! the optional `config.toml` in the platform configuration directory, the
//! `VITE_API_BASE_URL`/`VITE_API_URL` variables for the backend origin, and
//! finally `TASKBOARD_*` variables which override any key.

use crate::api::normalise_base_url;
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};
use thiserror::Error;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Notification polling interval used when nothing else is configured.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Prefix of the environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "TASKBOARD";

/// Directory name under the platform configuration directory.
pub const APP_DIR: &str = "taskboard";

/// Configuration file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

const VITE_BASE_URL_VARS: [&str; 2] = ["VITE_API_BASE_URL", "VITE_API_URL"];

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ClientConfigError {
    /// A source could not be read or deserialised.
    #[error(transparent)]
    Load(#[from] ConfigError),

    /// The backend origin is not an `http://` or `https://` URL.
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The polling interval must be at least one second.
    #[error("poll interval must be at least one second")]
    ZeroPollInterval,

    /// No session directory was configured and the platform has none.
    #[error("no configuration directory available; set {ENV_PREFIX}_SESSION_DIR")]
    NoConfigDir,

    /// The platform configuration directory is not valid UTF-8.
    #[error("configuration directory is not valid UTF-8: {0}")]
    NonUtf8Path(String),
}

/// Settings shared by the API client, the poller, and the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, including the `/api` prefix.
    pub api_base_url: String,
    /// Seconds between notification polls.
    pub poll_interval_secs: u64,
    /// Per-request timeout in seconds; no timeout when absent.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Directory holding `session.json`.
    #[serde(default)]
    pub session_dir: Option<Utf8PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: None,
            session_dir: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the platform config file and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError`] when a source is malformed or the result
    /// fails validation.
    pub fn load() -> Result<Self, ClientConfigError> {
        let file = default_config_file()?;
        Self::load_from(file.as_deref(), std::env::vars())
    }

    /// Loads configuration from an explicit file and environment variables.
    ///
    /// A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from(
        file: Option<&Utf8Path>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ClientConfigError> {
        let env: HashMap<String, String> = vars.into_iter().collect();
        let mut builder = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("poll_interval_secs", DEFAULT_POLL_INTERVAL_SECS)?;
        if let Some(path) = file {
            builder = builder.add_source(File::from(path.as_std_path()).required(false));
        }

        let explicit_url = env.contains_key(&format!("{ENV_PREFIX}_API_BASE_URL"));
        let vite_url = vite_base_url(&env);
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .source(Some(env))
                .try_parsing(true),
        );
        if let Some(url) = vite_url.filter(|_| !explicit_url) {
            builder = builder.set_override("api_base_url", url)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the loaded values.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::InvalidBaseUrl`] or
    /// [`ClientConfigError::ZeroPollInterval`].
    pub fn validate(&self) -> Result<(), ClientConfigError> {
        normalise_base_url(&self.api_base_url)
            .map_err(|_| ClientConfigError::InvalidBaseUrl(self.api_base_url.clone()))?;
        if self.poll_interval_secs == 0 {
            return Err(ClientConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Returns the notification polling interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Returns the request timeout, when one is configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Returns the directory holding the persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError::NoConfigDir`] or
    /// [`ClientConfigError::NonUtf8Path`] when no directory is configured and
    /// the platform directory cannot be used.
    pub fn session_dir(&self) -> Result<Utf8PathBuf, ClientConfigError> {
        self.session_dir.clone().map_or_else(app_dir, Ok)
    }
}

fn vite_base_url(env: &HashMap<String, String>) -> Option<String> {
    VITE_BASE_URL_VARS
        .iter()
        .filter_map(|key| env.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}

fn app_dir() -> Result<Utf8PathBuf, ClientConfigError> {
    let platform = dirs::config_dir().ok_or(ClientConfigError::NoConfigDir)?;
    let base = Utf8PathBuf::from_path_buf(platform)
        .map_err(|path| ClientConfigError::NonUtf8Path(path.display().to_string()))?;
    Ok(base.join(APP_DIR))
}

/// Returns `<config dir>/taskboard/config.toml`, or `None` when the platform
/// has no configuration directory.
///
/// # Errors
///
/// Returns [`ClientConfigError::NonUtf8Path`] when the directory is not valid
/// UTF-8.
pub fn default_config_file() -> Result<Option<Utf8PathBuf>, ClientConfigError> {
    match app_dir() {
        Ok(dir) => Ok(Some(dir.join(CONFIG_FILE))),
        Err(ClientConfigError::NoConfigDir) => Ok(None),
        Err(err) => Err(err),
    }
}
