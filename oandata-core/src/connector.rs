use async_trait::async_trait;

use crate::{CandleFragment, CandleQuery, OandataError};

/// A price-data client able to return candles for one date window.
///
/// Implementations perform the network round trip and map the provider's
/// payload into a [`CandleFragment`]. An empty fragment means "no data in
/// this window" and must not be reported as an error. Any `Err` is treated
/// by the orchestrator as transient and retried within its bound.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Stable provider name, used to tag errors and log records.
    fn name(&self) -> &'static str;

    /// Human-facing vendor label.
    fn vendor(&self) -> &'static str {
        self.name()
    }

    /// Fetch candles for `query.instrument` over the inclusive days `query.from..=query.to`.
    async fn candles(&self, query: &CandleQuery) -> Result<CandleFragment, OandataError>;
}
