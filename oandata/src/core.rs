use std::sync::Arc;

use chrono::NaiveDate;
use oandata_core::{CandleProvider, OandataConfig, OandataError};

/// Orchestrator that turns one long-range request into a sequence of bounded
/// provider calls and stitches the results into a single table.
pub struct Oandata {
    pub(crate) provider: Arc<dyn CandleProvider>,
    pub(crate) cfg: OandataConfig,
}

/// Builder for constructing an `Oandata` orchestrator with custom configuration.
pub struct OandataBuilder {
    provider: Option<Arc<dyn CandleProvider>>,
    cfg: OandataConfig,
}

impl Default for OandataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OandataBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: point cap 2500, three attempts per sub-range, and dates
    /// validated against the current UTC day. A provider must be registered
    /// via [`with_provider`](Self::with_provider) before building.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            cfg: OandataConfig::default(),
        }
    }

    /// Register the candle provider. A later call replaces an earlier one.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn CandleProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: OandataConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Upper bound on candles per provider request.
    ///
    /// Lower caps mean more, smaller requests; the derived split count never
    /// goes below one sub-range per day regardless.
    #[must_use]
    pub const fn point_cap(mut self, cap: u32) -> Self {
        self.cfg.point_cap = cap;
        self
    }

    /// Attempts per sub-range for requests that do not carry their own bound.
    #[must_use]
    pub const fn retry_bound(mut self, attempts: u32) -> Self {
        self.cfg.retry_bound = attempts;
        self
    }

    /// Validate end dates against `today` instead of the current UTC day.
    #[must_use]
    pub const fn as_of(mut self, today: NaiveDate) -> Self {
        self.cfg.as_of = Some(today);
        self
    }

    /// Build the `Oandata` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider was registered, or if the point cap
    /// or retry bound is zero.
    pub fn build(self) -> Result<Oandata, OandataError> {
        let Some(provider) = self.provider else {
            return Err(OandataError::InvalidArg(
                "no provider registered; add one via with_provider(...)".to_string(),
            ));
        };
        if self.cfg.point_cap == 0 {
            return Err(OandataError::InvalidArg(
                "point cap must be positive".to_string(),
            ));
        }
        if self.cfg.retry_bound == 0 {
            return Err(OandataError::InvalidArg(
                "expected a positive number of retries, but 0 was given".to_string(),
            ));
        }
        Ok(Oandata {
            provider,
            cfg: self.cfg,
        })
    }
}

/// Attribute an error to the provider that raised it.
///
/// Errors that already name a provider pass through; anything else becomes a
/// `Provider` error carrying the original message.
pub fn tag_err(provider: &str, e: OandataError) -> OandataError {
    match e {
        e @ (OandataError::Provider { .. }
        | OandataError::ProviderTimeout { .. }
        | OandataError::FetchFailed { .. }) => e,
        other => OandataError::Provider {
            provider: provider.to_string(),
            msg: other.to_string(),
        },
    }
}

impl Oandata {
    /// Start building a new `Oandata` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use oandata::Oandata;
    /// use oandata_mock::MockProvider;
    ///
    /// let oandata = Oandata::builder()
    ///     .with_provider(Arc::new(MockProvider::new()))
    ///     .retry_bound(5)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> OandataBuilder {
        OandataBuilder::new()
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &OandataConfig {
        &self.cfg
    }

    /// Name of the registered provider.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
