use std::sync::Arc;

use crate::helpers::*;
use chrono::{DateTime, Datelike, Weekday};
use oandata::{FetchRequest, Granularity, Oandata, OandataError};
use oandata_mock::MockProvider;

fn orchestrator() -> Oandata {
    let now = DateTime::parse_from_rfc3339("2024-06-30T12:00:00Z")
        .unwrap()
        .to_utc();
    Oandata::builder()
        .with_provider(Arc::new(MockProvider::with_now(now)))
        .as_of(today())
        .build()
        .unwrap()
}

#[tokio::test]
async fn derived_split_stitches_a_continuous_series() {
    let oandata = orchestrator();
    // 10 days of M5 is 2880 candles, above the 2500 cap: two requests.
    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 10))
        .granularity(Granularity::M5)
        .build()
        .unwrap();
    let table = oandata.fetch(&req).await.unwrap();

    // Nine weekdays-and-Sundays of 288 candles; Saturday 2020-01-04 is empty.
    assert_eq!(table.len(), 9 * 288);
    assert!(table.rows().windows(2).all(|w| w[0].time < w[1].time));
    assert!(table.rows().iter().all(|r| r.time.weekday() != Weekday::Sat));
    assert_eq!(table.rows().first().unwrap().time, midnight(2020, 1, 1));
    assert!(table.rows().iter().all(|r| r.complete));
}

#[tokio::test]
async fn forced_provider_failure_surfaces_as_fetch_failed() {
    let oandata = orchestrator();
    let req = FetchRequest::new("FAIL", d(2020, 1, 1), d(2020, 1, 2)).unwrap();
    let err = oandata.fetch(&req).await.unwrap_err();
    assert!(matches!(err, OandataError::FetchFailed { attempts: 3, .. }));
    assert!(matches!(err.root_cause(), OandataError::Provider { .. }));
}
