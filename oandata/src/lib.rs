//! Oandata fetches historical candles over long date ranges.
//!
//! Overview
//! - Splits a requested date range into sub-ranges small enough that each
//!   provider call stays under the per-request point cap.
//! - Fetches sub-ranges one at a time, in order, with a bounded number of
//!   attempts each and no delay between attempts.
//! - Stitches the returned fragments into one time-indexed table priced from a
//!   single price kind (bid, ask or mid).
//! - Writes tables as delimited text via [`export`].
//!
//! Key behaviors and trade-offs
//! - Sequential fetching keeps request pressure on the price server low at
//!   the cost of total latency on long ranges.
//! - A sub-range that fails on every attempt aborts the whole fetch; callers
//!   never see a table with silent holes.
//! - An empty fragment means "no data for that window" and is not an error.
//! - The orchestrator does not time out calls itself; the provider client
//!   enforces its own request timeout.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use oandata::{FetchRequest, Granularity, NaiveDate, Oandata, PriceKind};
//!
//! let oandata = Oandata::builder()
//!     .with_provider(Arc::new(connector))
//!     .build()?;
//!
//! let req = FetchRequest::builder(
//!     "EUR_USD",
//!     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2020, 3, 31).unwrap(),
//! )
//! .granularity(Granularity::M15)
//! .price(PriceKind::Bid)
//! .build()?;
//!
//! let table = oandata.fetch(&req).await?;
//! oandata::export::write_csv_path(&table, "eur_usd.csv", &Default::default())?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
pub mod export;
mod router;

pub use core::{Oandata, OandataBuilder, tag_err};
pub use export::{CsvOptions, write_csv, write_csv_path};

// Re-export core types for convenience
pub use oandata_core::{
    CandleFragment, CandleProvider, CandleQuery, CandleRow, CandleTable, DEFAULT_POINT_CAP,
    DEFAULT_RETRY_BOUND, DateRange, DateTime, Decimal, FetchRequest, FetchRequestBuilder,
    Granularity, NaiveDate, OandataConfig, OandataError, PriceKind, PriceQuad, RawCandle,
    SplitPlan, Utc, plan, seconds_per_unit,
};
