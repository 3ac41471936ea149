// Re-export helpers so tests can `use helpers::*;`
use oandata::{CandleFragment, DateTime, Decimal, NaiveDate, Oandata, PriceQuad, RawCandle, Utc};
use oandata_mock::{MockBehavior, ScriptedController, ScriptedProvider};

/// Fixed "today" so date validation does not depend on the wall clock.
pub fn today() -> NaiveDate {
    d(2024, 6, 30)
}

/// Construct a `NaiveDate` for readability in tests.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

/// Midnight UTC of the given day.
pub fn midnight(y: i32, m: u32, day: u32) -> DateTime<Utc> {
    d(y, m, day).and_hms_opt(0, 0, 0).expect("valid time").and_utc()
}

/// A mid-priced candle at `time` with a recognizable close.
pub fn candle(time: DateTime<Utc>, close: i64) -> RawCandle {
    let q = PriceQuad::new(
        Decimal::new(close - 5, 4),
        Decimal::new(close + 10, 4),
        Decimal::new(close - 10, 4),
        Decimal::new(close, 4),
    );
    RawCandle {
        time,
        bid: None,
        ask: None,
        mid: Some(q),
        volume: 10,
        complete: true,
    }
}

/// One daily candle per listed day of January 2020.
pub fn daily(days: &[u32]) -> CandleFragment {
    days.iter()
        .map(|&day| candle(midnight(2020, 1, day), 11_000 + i64::from(day)))
        .collect()
}

/// A scripted provider plus an orchestrator wired to it.
pub fn scripted(retry_bound: u32) -> (Oandata, ScriptedController) {
    let (provider, controller) = ScriptedProvider::new_with_controller("scripted");
    let oandata = Oandata::builder()
        .with_provider(provider)
        .retry_bound(retry_bound)
        .as_of(today())
        .build()
        .expect("valid orchestrator");
    (oandata, controller)
}

/// Scripted success.
pub fn ok(fragment: CandleFragment) -> MockBehavior<CandleFragment> {
    MockBehavior::Return(fragment)
}

/// Scripted provider failure.
pub fn fail(msg: &str) -> MockBehavior<CandleFragment> {
    MockBehavior::Fail(oandata::OandataError::provider("scripted", msg))
}
