use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Granularity, PriceKind};

/// Open/high/low/close prices for one side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuad {
    /// Opening price.
    pub o: Decimal,
    /// Highest price.
    pub h: Decimal,
    /// Lowest price.
    pub l: Decimal,
    /// Closing price.
    pub c: Decimal,
}

impl PriceQuad {
    /// Build a quad from its four prices.
    #[must_use]
    pub const fn new(o: Decimal, h: Decimal, l: Decimal, c: Decimal) -> Self {
        Self { o, h, l, c }
    }
}

/// One candle as returned by a provider.
///
/// Which of `bid`, `ask`, `mid` is present depends on the price kind requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandle {
    /// Start of the candle period.
    pub time: DateTime<Utc>,
    /// Bid prices, when requested.
    pub bid: Option<PriceQuad>,
    /// Ask prices, when requested.
    pub ask: Option<PriceQuad>,
    /// Midpoint prices, when requested.
    pub mid: Option<PriceQuad>,
    /// Number of price updates within the period.
    pub volume: u64,
    /// Whether the period had closed when the candle was fetched.
    pub complete: bool,
}

impl RawCandle {
    /// The price quad for `kind`, if the provider returned it.
    #[must_use]
    pub const fn quad(&self, kind: PriceKind) -> Option<&PriceQuad> {
        match kind {
            PriceKind::Bid => self.bid.as_ref(),
            PriceKind::Ask => self.ask.as_ref(),
            PriceKind::Mid => self.mid.as_ref(),
        }
    }
}

/// Candles returned for one sub-range.
///
/// An empty fragment means the provider had no data for the window; it is a
/// valid outcome, distinct from a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleFragment {
    candles: Vec<RawCandle>,
}

impl CandleFragment {
    /// A fragment holding no candles.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            candles: Vec::new(),
        }
    }

    /// Wrap provider candles in a fragment.
    #[must_use]
    pub const fn new(candles: Vec<RawCandle>) -> Self {
        Self { candles }
    }

    /// True when the provider returned no candles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Number of candles in the fragment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Borrow the candles.
    #[must_use]
    pub fn candles(&self) -> &[RawCandle] {
        &self.candles
    }

    /// Take ownership of the candles.
    #[must_use]
    pub fn into_candles(self) -> Vec<RawCandle> {
        self.candles
    }
}

impl From<Vec<RawCandle>> for CandleFragment {
    fn from(candles: Vec<RawCandle>) -> Self {
        Self::new(candles)
    }
}

impl FromIterator<RawCandle> for CandleFragment {
    fn from_iter<I: IntoIterator<Item = RawCandle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One row of the assembled table, priced from a single price kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleRow {
    /// Start of the candle period; the table index.
    pub time: DateTime<Utc>,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Number of price updates within the period.
    pub volume: u64,
    /// Whether the period had closed at fetch time.
    pub complete: bool,
}

/// Time-indexed candle table for one instrument, granularity, and price kind.
///
/// Row timestamps are unique and strictly increasing; [`CandleTable::push_row`]
/// refuses rows that would break that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleTable {
    instrument: String,
    granularity: Granularity,
    price: PriceKind,
    rows: Vec<CandleRow>,
}

impl CandleTable {
    /// An empty table.
    pub fn new(instrument: impl Into<String>, granularity: Granularity, price: PriceKind) -> Self {
        Self {
            instrument: instrument.into(),
            granularity,
            price,
            rows: Vec::new(),
        }
    }

    /// Instrument name, e.g. `EUR_USD`.
    #[must_use]
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Candle width of every row.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Price kind the OHLC columns were taken from.
    #[must_use]
    pub const fn price(&self) -> PriceKind {
        self.price
    }

    /// Rows in ascending timestamp order.
    #[must_use]
    pub fn rows(&self) -> &[CandleRow] {
        &self.rows
    }

    /// Take ownership of the rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<CandleRow> {
        self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows were assembled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Timestamp of the last row, if any.
    #[must_use]
    pub fn last_time(&self) -> Option<DateTime<Utc>> {
        self.rows.last().map(|r| r.time)
    }

    /// Append a row if its timestamp is strictly after the current last row.
    ///
    /// Returns `false` (and leaves the table untouched) otherwise.
    pub fn push_row(&mut self, row: CandleRow) -> bool {
        if self.last_time().is_some_and(|last| row.time <= last) {
            return false;
        }
        self.rows.push(row);
        true
    }
}
