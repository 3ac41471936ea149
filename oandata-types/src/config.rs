//! Configuration types shared by the orchestrator and its callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of candles the price server returns for one request
/// before it starts rejecting the request.
pub const DEFAULT_POINT_CAP: u32 = 2500;

/// Attempts made per sub-range before the whole fetch is aborted.
pub const DEFAULT_RETRY_BOUND: u32 = 3;

/// Global configuration for the `Oandata` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OandataConfig {
    /// Upper bound on candles per provider request; drives the derived split count.
    pub point_cap: u32,
    /// Retry bound used when a request does not carry its own.
    pub retry_bound: u32,
    /// Fixed "today" for end-date validation. `None` means the current UTC date.
    pub as_of: Option<NaiveDate>,
}

impl Default for OandataConfig {
    fn default() -> Self {
        Self {
            point_cap: DEFAULT_POINT_CAP,
            retry_bound: DEFAULT_RETRY_BOUND,
            as_of: None,
        }
    }
}

impl OandataConfig {
    /// The date requests are validated against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}
