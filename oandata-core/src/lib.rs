//! oandata-core
//!
//! Core types, traits, and utilities shared across the oandata crates.
//!
//! - `types`: re-exports of errors, configuration, and the granularity catalog.
//! - `candle`: raw provider candles, fragments, and the assembled table.
//! - `request`: the caller-facing fetch request and the per-sub-range provider query.
//! - `connector`: the `CandleProvider` trait implemented by price-data clients.
//! - `timeseries`: date-range partitioning and fragment assembly.
#![warn(missing_docs)]

/// Raw candles, fragments, rows, and the assembled table.
pub mod candle;
/// The `CandleProvider` trait implemented by price-data clients.
pub mod connector;
/// Fetch requests and provider queries.
pub mod request;
/// Date-range partitioning and fragment assembly.
pub mod timeseries;
pub mod types;

pub use candle::{CandleFragment, CandleRow, CandleTable, PriceQuad, RawCandle};
pub use connector::CandleProvider;
pub use request::{CandleQuery, FetchRequest, FetchRequestBuilder};
pub use timeseries::assemble::{AppendStats, append_fragment, to_row};
pub use timeseries::split::{DateRange, SplitPlan, plan, plan_as_of, plan_range, split_count};
pub use types::*;
