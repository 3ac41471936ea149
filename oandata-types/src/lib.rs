//! oandata-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod granularity;

pub use config::{DEFAULT_POINT_CAP, DEFAULT_RETRY_BOUND, OandataConfig};
pub use error::OandataError;
pub use granularity::{Granularity, PriceKind, seconds_per_unit};
