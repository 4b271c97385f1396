//! Client settings loaded with the `config` crate.
//!
//! Sources, lowest to highest precedence: built-in defaults, a TOML file
//! (`tandem.toml` in the working directory unless a path is given), then
//! `TANDEM_*` environment variables (`TANDEM_BASE_URL`, `TANDEM_TIMEOUT_MS`, ...).

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use tandem_domain::{AuthScheme, RefreshFailurePolicy};
use url::Url;

use crate::error::InfrastructureError;

/// Default refresh endpoint path.
pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/refresh";

/// Settings for building the shared client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    /// Backend origin, e.g. `https://ide.example.com`.
    pub base_url: String,
    /// Default per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Path of the token refresh endpoint.
    pub refresh_path: String,
    /// `raw` or `bearer`.
    pub auth_scheme: AuthScheme,
    /// `proceed` or `abort`.
    pub refresh_failure_policy: RefreshFailurePolicy,
    /// Share one in-flight refresh between concurrent requests.
    pub coalesce_refresh: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 30_000,
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            auth_scheme: AuthScheme::Raw,
            refresh_failure_policy: RefreshFailurePolicy::Proceed,
            coalesce_refresh: true,
        }
    }
}

impl ClientSettings {
    /// Loads settings from defaults, an optional file and the environment.
    ///
    /// With `path = None`, `tandem.toml` is read if it exists.
    ///
    /// # Errors
    /// Returns `Config` if a source cannot be read or a value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, InfrastructureError> {
        Self::load_layers(path, Environment::with_prefix("TANDEM").try_parsing(true))
    }

    /// Like [`load`](Self::load), but reads `TANDEM_*` variables from `vars`
    /// instead of the process environment.
    ///
    /// # Errors
    /// Returns `Config` if a source cannot be read or a value is invalid.
    pub fn load_with_env<I>(path: Option<&Path>, vars: I) -> Result<Self, InfrastructureError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: config::Map<String, String> = vars.into_iter().collect();
        Self::load_layers(
            path,
            Environment::with_prefix("TANDEM")
                .try_parsing(true)
                .source(Some(vars)),
        )
    }

    fn load_layers(path: Option<&Path>, env: Environment) -> Result<Self, InfrastructureError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("timeout_ms", defaults.timeout_ms)?
            .set_default("refresh_path", defaults.refresh_path)?
            .set_default("auth_scheme", "raw")?
            .set_default("refresh_failure_policy", "proceed")?
            .set_default("coalesce_refresh", defaults.coalesce_refresh)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("tandem").required(false)),
        };

        let settings: Self = builder
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the base URL and refresh endpoint are usable.
    ///
    /// # Errors
    /// Returns `Config` describing the first invalid value.
    pub fn validate(&self) -> Result<(), InfrastructureError> {
        self.base_url()?;
        self.refresh_url()?;
        if self.timeout_ms == 0 {
            return Err(InfrastructureError::Config(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed base URL. Only http and https are accepted.
    ///
    /// # Errors
    /// Returns `Config` for unparsable or non-HTTP URLs.
    pub fn base_url(&self) -> Result<Url, InfrastructureError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| InfrastructureError::Config(format!("invalid base_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(InfrastructureError::Config(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        Ok(url)
    }

    /// Absolute URL of the refresh endpoint.
    ///
    /// # Errors
    /// Returns `Config` if the joined URL is invalid.
    pub fn refresh_url(&self) -> Result<Url, InfrastructureError> {
        let base = self.base_url()?;
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            self.refresh_path.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|e| InfrastructureError::Config(format!("invalid refresh_path: {e}")))
    }

    /// Default request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
