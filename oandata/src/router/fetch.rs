use oandata_core::{
    CandleFragment, CandleQuery, CandleTable, DateRange, FetchRequest, OandataError,
    append_fragment, plan_as_of,
};

use super::retry::{AttemptState, Event};
use crate::Oandata;
use crate::core::tag_err;

impl Oandata {
    /// Fetch the candle table described by `req`.
    ///
    /// The request is validated before any provider call. The date range is
    /// then split so each provider call stays under the configured point cap,
    /// and sub-ranges are fetched one at a time, in order. Each sub-range gets
    /// up to `retry_bound` attempts with no delay between them.
    ///
    /// Behavior and trade-offs:
    /// - Sub-ranges with no data contribute nothing; a fetch where every
    ///   sub-range is empty returns an empty table rather than an error.
    /// - A sub-range that exhausts its attempts aborts the whole fetch. No
    ///   partial table is returned and later sub-ranges are never requested.
    /// - Rows are kept in provider order. A row whose timestamp does not move
    ///   past the previous one (a candle repeated at a window boundary) is
    ///   dropped, not re-sorted.
    ///
    /// # Errors
    /// - `InvalidArg` for an empty instrument, zero retry bound or split count,
    ///   `from > to`, or a `to` date after today.
    /// - `FetchFailed` when a sub-range fails on every attempt; its source is
    ///   the last provider error.
    /// - `Data` when the provider returns candles without the requested prices.
    pub async fn fetch(&self, req: &FetchRequest) -> Result<CandleTable, OandataError> {
        req.validate()?;
        let bound = req.retry_bound().unwrap_or(self.cfg.retry_bound);
        if bound == 0 {
            return Err(OandataError::InvalidArg(
                "expected a positive number of retries, but 0 was given".to_string(),
            ));
        }
        let plan = plan_as_of(
            req.from(),
            req.to(),
            self.cfg.today(),
            req.granularity(),
            self.cfg.point_cap,
            req.split(),
        )?;
        tracing::info!(
            instrument = req.instrument(),
            granularity = %req.granularity(),
            price = %req.price(),
            chunks = plan.len(),
            "splitting the period into {} chunk(s)",
            plan.len()
        );

        let mut table = CandleTable::new(req.instrument(), req.granularity(), req.price());
        for sub in plan.into_ranges() {
            tracing::info!(from = %sub.start(), to = %sub.end(), "fetching candles");
            let query = CandleQuery {
                instrument: req.instrument().to_string(),
                from: sub.start(),
                to: sub.end(),
                granularity: req.granularity(),
                price: req.price(),
            };
            let fragment = self.fetch_sub_range(&sub, &query, bound).await?;
            if fragment.is_empty() {
                tracing::warn!(
                    instrument = req.instrument(),
                    from = %sub.start(),
                    to = %sub.end(),
                    "no candles returned for sub-range"
                );
                continue;
            }
            let stats = append_fragment(&mut table, fragment)?;
            if stats.dropped > 0 {
                tracing::debug!(
                    from = %sub.start(),
                    to = %sub.end(),
                    dropped = stats.dropped,
                    "dropped candles not after the previous row"
                );
            }
        }
        Ok(table)
    }

    async fn fetch_sub_range(
        &self,
        sub: &DateRange,
        query: &CandleQuery,
        bound: u32,
    ) -> Result<CandleFragment, OandataError> {
        let name = self.provider.name();
        let mut state = AttemptState::start();
        loop {
            match state {
                AttemptState::Pending { attempt } => {
                    state = match self.provider.candles(query).await {
                        Ok(fragment) => state.handle(bound, Event::Fetched(fragment)),
                        Err(e) => {
                            let e = tag_err(name, e);
                            let msg = e.to_string();
                            let next = state.handle(bound, Event::Failed(e));
                            if !next.is_terminal() {
                                tracing::warn!(
                                    provider = name,
                                    from = %sub.start(),
                                    to = %sub.end(),
                                    attempt,
                                    bound,
                                    error = %msg,
                                    "fetch failed, retrying"
                                );
                            }
                            next
                        }
                    };
                }
                AttemptState::Succeeded(fragment) => return Ok(fragment),
                AttemptState::Aborted { attempts, last } => {
                    tracing::error!(
                        provider = name,
                        from = %sub.start(),
                        to = %sub.end(),
                        attempts,
                        "fetching {sub} failed, aborting"
                    );
                    return Err(OandataError::fetch_failed(
                        sub.start(),
                        sub.end(),
                        attempts,
                        last,
                    ));
                }
            }
        }
    }
}
