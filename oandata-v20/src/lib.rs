//! oandata-v20
//!
//! Candle provider for the OANDA v20 REST API. Implements `CandleProvider`
//! on top of `reqwest`, with connection settings read from a TOML file.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// TOML connection settings.
pub mod config;
/// Serde models of the v20 payloads.
pub mod wire;

use std::path::Path;
use std::sync::Arc;

use adapter::{CandleParams, RealAdapter, V20Candles};
use async_trait::async_trait;
use chrono::Utc;
use oandata_core::{CandleFragment, CandleProvider, CandleQuery, OandataError};

pub use config::{DatetimeFormat, V20Config};

/// Public connector type. Production users construct it with
/// [`V20Connector::from_config`] or [`V20Connector::from_path`].
pub struct V20Connector {
    candles: Arc<dyn V20Candles>,
}

impl V20Connector {
    /// Provider name used to tag errors.
    pub const NAME: &'static str = "oandata-v20";

    fn normalize_error(e: OandataError) -> OandataError {
        match e {
            OandataError::Other(msg) => OandataError::provider(Self::NAME, msg),
            other => other,
        }
    }

    /// Build from validated connection settings.
    ///
    /// # Errors
    /// Returns `Config` if the settings are invalid or the HTTP client cannot be built.
    pub fn from_config(cfg: &V20Config) -> Result<Self, OandataError> {
        let adapter = RealAdapter::new(cfg)?;
        Ok(Self::from_adapter(Arc::new(adapter)))
    }

    /// Read connection settings from a TOML file and build the connector.
    ///
    /// # Errors
    /// Returns `Config` if the file is missing, malformed, or lacks `hostname`/`token`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OandataError> {
        Self::from_config(&V20Config::from_path(path)?)
    }

    /// Build from a provided `reqwest::Client`, e.g. one with a proxy configured.
    ///
    /// The client's own timeouts apply; `timeout_secs` and
    /// `connect_timeout_secs` in `cfg` are ignored.
    ///
    /// # Errors
    /// Returns `Config` if the settings are invalid.
    pub fn with_reqwest_client(
        http: reqwest::Client,
        cfg: &V20Config,
    ) -> Result<Self, OandataError> {
        Ok(Self::from_adapter(Arc::new(RealAdapter::with_client(
            http, cfg,
        )?)))
    }

    /// For tests/injection.
    #[must_use]
    pub fn from_adapter(candles: Arc<dyn V20Candles>) -> Self {
        Self { candles }
    }
}

#[async_trait]
impl CandleProvider for V20Connector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "OANDA"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "oandata_v20::candles",
            skip(self, query),
            fields(
                instrument = %query.instrument,
                from = %query.from,
                to = %query.to,
                granularity = %query.granularity,
            ),
        )
    )]
    async fn candles(&self, query: &CandleQuery) -> Result<CandleFragment, OandataError> {
        let (from, to) = query.window(Utc::now());
        let params = CandleParams {
            granularity: query.granularity,
            price: query.price,
            from,
            to,
        };
        let raw = self
            .candles
            .candles(&query.instrument, &params)
            .await
            .map_err(Self::normalize_error)?;
        raw.candles
            .into_iter()
            .map(wire::WireCandle::into_raw)
            .collect::<Result<Vec<_>, _>>()
            .map(CandleFragment::new)
    }
}
