use crate::{CandleFragment, CandleRow, CandleTable, OandataError, PriceKind, RawCandle};

/// Rows appended to and dropped from a table by one [`append_fragment`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendStats {
    /// Rows that extended the table.
    pub appended: usize,
    /// Rows skipped because their timestamp was not after the table's last row.
    pub dropped: usize,
}

/// Convert a provider candle into a table row priced from `price`.
///
/// # Errors
/// Returns `Data` if the candle does not carry the quad for `price`.
pub fn to_row(raw: &RawCandle, price: PriceKind) -> Result<CandleRow, OandataError> {
    let quad = raw.quad(price).ok_or_else(|| {
        OandataError::Data(format!(
            "candle at {} has no {} prices",
            raw.time.to_rfc3339(),
            price.name()
        ))
    })?;
    Ok(CandleRow {
        time: raw.time,
        open: quad.o,
        high: quad.h,
        low: quad.l,
        close: quad.c,
        volume: raw.volume,
        complete: raw.complete,
    })
}

/// Append a fragment to `table` in provider order.
///
/// The whole fragment is converted before anything is appended, so a
/// conversion failure leaves the table untouched. Rows that would break the
/// strictly increasing timestamp order are dropped, not re-sorted.
///
/// # Errors
/// Returns `Data` if any candle lacks the table's price kind.
pub fn append_fragment(
    table: &mut CandleTable,
    fragment: CandleFragment,
) -> Result<AppendStats, OandataError> {
    let price = table.price();
    let rows = fragment
        .candles()
        .iter()
        .map(|c| to_row(c, price))
        .collect::<Result<Vec<_>, _>>()?;

    let mut stats = AppendStats::default();
    for row in rows {
        if table.push_row(row) {
            stats.appended += 1;
        } else {
            stats.dropped += 1;
        }
    }
    Ok(stats)
}
