//! Re-export of foundational types from `oandata-types`.
// Consolidated re-exports so downstream crates can depend on `oandata-core` only

pub use oandata_types::{DEFAULT_POINT_CAP, DEFAULT_RETRY_BOUND, OandataConfig, OandataError};
pub use oandata_types::{Granularity, PriceKind, seconds_per_unit};

pub use chrono::{DateTime, NaiveDate, Utc};
pub use rust_decimal::Decimal;
