use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Granularity, OandataError, PriceKind};

/// Caller-facing request for a historical candle table.
///
/// Defaults: daily granularity, mid prices, derived split count, and the
/// orchestrator's configured retry bound. Requests validate on construction;
/// date order and the future-date check are left to
/// [`DateRange`](crate::DateRange), which knows what "today" is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    instrument: String,
    from: NaiveDate,
    to: NaiveDate,
    granularity: Granularity,
    price: PriceKind,
    split: Option<u32>,
    retry_bound: Option<u32>,
}

impl FetchRequest {
    /// Request `instrument` candles for the inclusive days `from..=to` with defaults.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `instrument` is empty.
    pub fn new(
        instrument: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Self, OandataError> {
        Self::builder(instrument, from, to).build()
    }

    /// Start a request with non-default options.
    pub fn builder(
        instrument: impl Into<String>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> FetchRequestBuilder {
        FetchRequestBuilder {
            inner: Self {
                instrument: instrument.into(),
                from,
                to,
                granularity: Granularity::D,
                price: PriceKind::Mid,
                split: None,
                retry_bound: None,
            },
        }
    }

    /// Instrument name.
    #[must_use]
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// First requested day.
    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last requested day (inclusive).
    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    /// Requested candle width.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Requested price kind.
    #[must_use]
    pub const fn price(&self) -> PriceKind {
        self.price
    }

    /// Explicit split count, if any.
    #[must_use]
    pub const fn split(&self) -> Option<u32> {
        self.split
    }

    /// Explicit retry bound, if any.
    #[must_use]
    pub const fn retry_bound(&self) -> Option<u32> {
        self.retry_bound
    }

    /// Re-check the calendar-independent invariants.
    ///
    /// Requests built through the builder already hold them; this guards
    /// requests that arrived through deserialization.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty instrument, a zero split count, or a
    /// zero retry bound.
    pub fn validate(&self) -> Result<(), OandataError> {
        if self.instrument.trim().is_empty() {
            return Err(OandataError::InvalidArg(
                "instrument must not be empty".to_string(),
            ));
        }
        if self.split == Some(0) {
            return Err(OandataError::InvalidArg(
                "expected a positive split count, but 0 was given".to_string(),
            ));
        }
        if self.retry_bound == Some(0) {
            return Err(OandataError::InvalidArg(
                "expected a positive number of retries, but 0 was given".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`FetchRequest`].
#[derive(Debug, Clone)]
pub struct FetchRequestBuilder {
    inner: FetchRequest,
}

impl FetchRequestBuilder {
    /// Set the candle width.
    #[must_use]
    pub const fn granularity(mut self, granularity: Granularity) -> Self {
        self.inner.granularity = granularity;
        self
    }

    /// Set the price kind.
    #[must_use]
    pub const fn price(mut self, price: PriceKind) -> Self {
        self.inner.price = price;
        self
    }

    /// Force the number of sub-ranges instead of deriving it from the point cap.
    #[must_use]
    pub const fn split(mut self, count: u32) -> Self {
        self.inner.split = Some(count);
        self
    }

    /// Optionally force the number of sub-ranges.
    #[must_use]
    pub const fn split_opt(mut self, count: Option<u32>) -> Self {
        self.inner.split = count;
        self
    }

    /// Set the number of attempts made per sub-range.
    #[must_use]
    pub const fn retry_bound(mut self, attempts: u32) -> Self {
        self.inner.retry_bound = Some(attempts);
        self
    }

    /// Validate and build the request.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty instrument, a zero split count, or a
    /// zero retry bound.
    pub fn build(self) -> Result<FetchRequest, OandataError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

/// What a provider is asked for when fetching one sub-range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandleQuery {
    /// Instrument name, e.g. `EUR_USD`.
    pub instrument: String,
    /// First day of the window.
    pub from: NaiveDate,
    /// Last day of the window (inclusive).
    pub to: NaiveDate,
    /// Candle width.
    pub granularity: Granularity,
    /// Which prices to return.
    pub price: PriceKind,
}

impl CandleQuery {
    /// Half-open UTC window covering the query's days.
    ///
    /// Starts at `from` 00:00 and ends at 00:00 of the day after `to`, clamped
    /// to `now` so the window never reaches into the future.
    #[must_use]
    pub fn window(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.from.and_time(NaiveTime::MIN).and_utc();
        let end = self.to.and_time(NaiveTime::MIN).and_utc() + Duration::days(1);
        (start, end.min(now))
    }
}
