//! Connection settings for the v20 REST server, loaded from TOML.
//!
//! ```toml
//! hostname = "api-fxpractice.oanda.com"
//! token = "xxxxxxxx-xxxxxxxx"
//! port = 443            # optional, 443 with ssl and 80 without
//! ssl = true            # optional
//! application = "history_fetcher"
//! datetime_format = "RFC3339"   # or "UNIX"
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! ```
//!
//! Unknown keys are ignored.

use core::fmt;
use std::path::Path;
use std::time::Duration;

use oandata_core::OandataError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Timestamp encoding requested from the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatetimeFormat {
    /// RFC 3339 strings with nanosecond precision.
    #[default]
    #[serde(rename = "RFC3339")]
    Rfc3339,
    /// Seconds since the epoch as a decimal string.
    #[serde(rename = "UNIX")]
    Unix,
}

impl DatetimeFormat {
    /// Value of the `Accept-Datetime-Format` header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rfc3339 => "RFC3339",
            Self::Unix => "UNIX",
        }
    }
}

fn default_ssl() -> bool {
    true
}

fn default_application() -> String {
    "history_fetcher".to_string()
}

/// Settings used to build the v20 HTTP client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V20Config {
    /// REST server host, e.g. `api-fxpractice.oanda.com`.
    pub hostname: String,
    /// Personal access token sent as a bearer token.
    pub token: String,
    /// Server port; defaults follow `ssl`.
    #[serde(default)]
    pub port: Option<u16>,
    /// Use HTTPS.
    #[serde(default = "default_ssl")]
    pub ssl: bool,
    /// Value of the `OANDA-Agent` header.
    #[serde(default = "default_application")]
    pub application: String,
    /// Timestamp encoding requested from the server.
    #[serde(default)]
    pub datetime_format: DatetimeFormat,
    /// Whole-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Connection timeout in seconds.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl fmt::Debug for V20Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("V20Config")
            .field("hostname", &self.hostname)
            .field("token", &"<redacted>")
            .field("port", &self.port)
            .field("ssl", &self.ssl)
            .field("application", &self.application)
            .field("datetime_format", &self.datetime_format)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl V20Config {
    /// Settings for `hostname` with every optional key at its default.
    pub fn new(hostname: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            token: token.into(),
            port: None,
            ssl: default_ssl(),
            application: default_application(),
            datetime_format: DatetimeFormat::default(),
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }

    /// Parse and validate settings from TOML text.
    ///
    /// # Errors
    /// Returns `Config` when the text is not valid TOML, a key has the wrong
    /// type, or `hostname`/`token` is missing or empty.
    pub fn from_toml_str(s: &str) -> Result<Self, OandataError> {
        let cfg: Self = toml::from_str(s).map_err(|e| {
            OandataError::Config(format!(
                "{}; hostname and token are required",
                e.message()
            ))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate settings from a TOML file.
    ///
    /// # Errors
    /// Returns `Config` when the file cannot be read or its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OandataError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| OandataError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Check the required keys.
    ///
    /// # Errors
    /// Returns `Config` when `hostname` or `token` is empty.
    pub fn validate(&self) -> Result<(), OandataError> {
        if self.hostname.trim().is_empty() {
            return Err(OandataError::Config("hostname must not be empty".into()));
        }
        if self.token.trim().is_empty() {
            return Err(OandataError::Config("token must not be empty".into()));
        }
        Ok(())
    }

    /// Port actually used.
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(if self.ssl { 443 } else { 80 })
    }

    /// Root URL of the REST server.
    ///
    /// # Errors
    /// Returns `Config` when the hostname does not form a valid URL.
    pub fn base_url(&self) -> Result<Url, OandataError> {
        let scheme = if self.ssl { "https" } else { "http" };
        let raw = format!("{scheme}://{}:{}/", self.hostname, self.effective_port());
        Url::parse(&raw).map_err(|e| OandataError::Config(format!("{raw}: {e}")))
    }

    /// Request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Connection timeout, if configured.
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}
