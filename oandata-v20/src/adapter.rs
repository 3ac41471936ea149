use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use oandata_core::{Granularity, OandataError, PriceKind};
use reqwest::StatusCode;
use url::Url;

use crate::config::{DatetimeFormat, V20Config};
use crate::wire::{CandlesResponse, ErrorBody};

const PROVIDER: &str = "oandata-v20";

/// Parameters of one candles request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleParams {
    /// Candle width.
    pub granularity: Granularity,
    /// Requested price kind.
    pub price: PriceKind,
    /// Window start (inclusive).
    pub from: DateTime<Utc>,
    /// Window end (exclusive).
    pub to: DateTime<Utc>,
}

/// Candles abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait V20Candles: Send + Sync {
    /// Fetch candles for `instrument` within the window in `params`.
    async fn candles(
        &self,
        instrument: &str,
        params: &CandleParams,
    ) -> Result<CandlesResponse, OandataError>;
}

/// Production adapter backed by `reqwest`.
///
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
    token: String,
    application: String,
    datetime_format: DatetimeFormat,
}

impl RealAdapter {
    /// Build an HTTP client from connection settings.
    ///
    /// # Errors
    /// Returns `Config` if the settings are invalid or the HTTP client cannot be built.
    pub fn new(cfg: &V20Config) -> Result<Self, OandataError> {
        cfg.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(t) = cfg.timeout() {
            builder = builder.timeout(t);
        }
        if let Some(t) = cfg.connect_timeout() {
            builder = builder.connect_timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| OandataError::Config(format!("building HTTP client: {e}")))?;
        Self::with_client(http, cfg)
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `Config` if the settings are invalid.
    pub fn with_client(http: reqwest::Client, cfg: &V20Config) -> Result<Self, OandataError> {
        cfg.validate()?;
        Ok(Self {
            http,
            base: cfg.base_url()?,
            token: cfg.token.clone(),
            application: cfg.application.clone(),
            datetime_format: cfg.datetime_format,
        })
    }

    fn endpoint(&self, instrument: &str) -> Result<Url, OandataError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| OandataError::Config(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(["v3", "instruments", instrument, "candles"]);
        Ok(url)
    }

    fn format_time(&self, t: DateTime<Utc>) -> String {
        match self.datetime_format {
            DatetimeFormat::Rfc3339 => t.to_rfc3339_opts(SecondsFormat::Secs, true),
            DatetimeFormat::Unix => t.timestamp().to_string(),
        }
    }
}

fn map_http_err(e: &reqwest::Error, context: &str) -> OandataError {
    if e.is_timeout() {
        OandataError::provider_timeout(PROVIDER)
    } else {
        OandataError::provider(PROVIDER, format!("{context}: {e}"))
    }
}

fn map_status(status: StatusCode, body: &str, context: &str) -> OandataError {
    let reason = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
    OandataError::provider(
        PROVIDER,
        format!("status {}: {reason} ({context})", status.as_u16()),
    )
}

#[async_trait]
impl V20Candles for RealAdapter {
    async fn candles(
        &self,
        instrument: &str,
        params: &CandleParams,
    ) -> Result<CandlesResponse, OandataError> {
        let context = format!("candles for {instrument}");
        let url = self.endpoint(instrument)?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept-Datetime-Format", self.datetime_format.as_str())
            .header("OANDA-Agent", &self.application)
            .query(&[
                ("price", params.price.code().to_string()),
                ("granularity", params.granularity.as_str().to_string()),
                ("from", self.format_time(params.from)),
                ("to", self.format_time(params.to)),
            ])
            .send()
            .await
            .map_err(|e| map_http_err(&e, &context))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| map_http_err(&e, &context))?;
        if !status.is_success() {
            return Err(map_status(status, &body, &context));
        }
        serde_json::from_str(&body).map_err(|e| {
            OandataError::provider(PROVIDER, format!("invalid response body ({context}): {e}"))
        })
    }
}

/* -------- Lightweight adapter constructors for tests and embedding ------- */

impl dyn V20Candles {
    /// Build a `V20Candles` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn V20Candles>
    where
        F: Send
            + Sync
            + 'static
            + Fn(String, CandleParams) -> Result<CandlesResponse, OandataError>,
    {
        struct FnCandles<F>(F);
        #[async_trait]
        impl<F> V20Candles for FnCandles<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, CandleParams) -> Result<CandlesResponse, OandataError>,
        {
            async fn candles(
                &self,
                instrument: &str,
                params: &CandleParams,
            ) -> Result<CandlesResponse, OandataError> {
                (self.0)(instrument.to_string(), params.clone())
            }
        }
        Arc::new(FnCandles(f))
    }
}
