//! Mock candle providers for CI-safe tests and offline runs.
//!
//! - [`MockProvider`] synthesizes deterministic candles for a few fixture
//!   instruments and mimics the price server's hard per-request limit.
//! - [`ScriptedProvider`] replays behaviors queued by a test and records every
//!   query it receives.
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use oandata_core::{
    CandleFragment, CandleProvider, CandleQuery, Decimal, OandataError, PriceKind, PriceQuad,
    RawCandle,
};

mod dynamic;
mod fixtures;

pub use dynamic::{MockBehavior, ScriptedController, ScriptedProvider};

/// Hard limit on candles per request enforced by the price server.
pub const SERVER_MAX_CANDLES: u64 = 5000;

/// Mock provider serving deterministic candles from static fixtures.
///
/// Known instruments are `EUR_USD`, `GBP_USD` and `USD_JPY`. The instrument
/// `FAIL` always fails and `TIMEOUT` always times out. Saturdays carry no
/// candles, so a window made of Saturdays yields an empty fragment.
pub struct MockProvider {
    now: Option<DateTime<Utc>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Provider whose notion of "now" is the wall clock.
    #[must_use]
    pub const fn new() -> Self {
        Self { now: None }
    }

    /// Provider with a frozen clock, for tests that check the `complete` flag.
    #[must_use]
    pub const fn with_now(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    fn maybe_fail_or_timeout(&self, instrument: &str) -> Result<(), OandataError> {
        match instrument {
            "FAIL" => Err(OandataError::provider(
                self.name(),
                "forced failure: candles",
            )),
            "TIMEOUT" => Err(OandataError::provider_timeout(self.name())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CandleProvider for MockProvider {
    fn name(&self) -> &'static str {
        "oandata-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn candles(&self, query: &CandleQuery) -> Result<CandleFragment, OandataError> {
        self.maybe_fail_or_timeout(&query.instrument)?;
        let fixture = fixtures::instruments::by_instrument(&query.instrument).ok_or_else(|| {
            OandataError::provider(
                self.name(),
                format!("Invalid value specified for 'instrument': {}", query.instrument),
            )
        })?;

        let now = self.now();
        let (start, end) = query.window(now);
        let width = query.granularity.seconds();
        let span = u64::try_from((end - start).num_seconds()).unwrap_or(0);
        let count = span.div_ceil(width);
        if count > SERVER_MAX_CANDLES {
            return Err(OandataError::provider(
                self.name(),
                format!(
                    "Maximum value for 'count' exceeded: {count} > {SERVER_MAX_CANDLES}"
                ),
            ));
        }

        let step = Duration::seconds(i64::try_from(width).unwrap_or(i64::MAX));
        let candles = (0..count)
            .filter_map(|i| {
                let offset = i64::try_from(i).ok()?;
                let time = start + step * i32::try_from(offset).ok()?;
                if time.weekday() == Weekday::Sat {
                    return None;
                }
                let mut candle = synthesize(&fixture, time, width, query.price);
                candle.complete = time + step <= now;
                Some(candle)
            })
            .collect();
        Ok(candles)
    }
}

fn synthesize(
    fixture: &fixtures::instruments::Fixture,
    time: DateTime<Utc>,
    width: u64,
    price: PriceKind,
) -> RawCandle {
    let slot = u64::try_from(time.timestamp()).unwrap_or(0) / width;
    let wiggle = i64::try_from(slot % 17).unwrap_or(0) - 8;
    let drift = i64::try_from(slot % 5).unwrap_or(0) - 2;

    let open = fixture.mid + fixture.pip * Decimal::from(wiggle);
    let close = open + fixture.pip * Decimal::from(drift);
    let mid = PriceQuad::new(
        open,
        open.max(close) + fixture.pip * Decimal::from(3),
        open.min(close) - fixture.pip * Decimal::from(3),
        close,
    );
    let half = fixture.pip * Decimal::from(fixture.spread_pips) / Decimal::from(2);
    let shift = |q: &PriceQuad, by: Decimal| PriceQuad::new(q.o + by, q.h + by, q.l + by, q.c + by);

    RawCandle {
        time,
        bid: (price == PriceKind::Bid).then(|| shift(&mid, -half)),
        ask: (price == PriceKind::Ask).then(|| shift(&mid, half)),
        mid: (price == PriceKind::Mid).then_some(mid),
        volume: 100 + slot % 50,
        complete: true,
    }
}
