//! Serde models of the v20 candles endpoint payloads.

use chrono::{DateTime, Utc};
use oandata_core::{OandataError, PriceQuad, RawCandle};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of a successful `GET /v3/instruments/{instrument}/candles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandlesResponse {
    /// Instrument the candles belong to.
    #[serde(default)]
    pub instrument: Option<String>,
    /// Granularity code echoed back by the server.
    #[serde(default)]
    pub granularity: Option<String>,
    /// Candles in ascending time order; absent or empty when there is no data.
    #[serde(default)]
    pub candles: Vec<WireCandle>,
}

/// One candlestick as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCandle {
    /// Period start, RFC 3339 or UNIX seconds depending on the requested format.
    pub time: String,
    /// Bid prices.
    #[serde(default)]
    pub bid: Option<WireQuad>,
    /// Ask prices.
    #[serde(default)]
    pub ask: Option<WireQuad>,
    /// Midpoint prices.
    #[serde(default)]
    pub mid: Option<WireQuad>,
    /// Number of price updates in the period.
    #[serde(default)]
    pub volume: u64,
    /// Whether the period has closed.
    #[serde(default)]
    pub complete: bool,
}

/// Open/high/low/close as decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireQuad {
    /// Open.
    pub o: Decimal,
    /// High.
    pub h: Decimal,
    /// Low.
    pub l: Decimal,
    /// Close.
    pub c: Decimal,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable reason.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl From<WireQuad> for PriceQuad {
    fn from(q: WireQuad) -> Self {
        Self::new(q.o, q.h, q.l, q.c)
    }
}

/// Parse a server timestamp in either RFC 3339 or UNIX (`secs.nanos`) form.
///
/// # Errors
/// Returns `Data` when the string is neither.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, OandataError> {
    let bad = || OandataError::Data(format!("unparsable candle time {s:?}"));
    if s.contains('T') {
        return DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| bad());
    }
    let (secs, frac) = s.split_once('.').unwrap_or((s, ""));
    let secs: i64 = secs.parse().map_err(|_| bad())?;
    let nanos = if frac.is_empty() {
        0
    } else {
        if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let padded = format!("{frac:0<9}");
        padded.parse::<u32>().map_err(|_| bad())?
    };
    DateTime::from_timestamp(secs, nanos).ok_or_else(bad)
}

impl WireCandle {
    /// Convert into the provider-neutral candle.
    ///
    /// # Errors
    /// Returns `Data` when the timestamp cannot be parsed.
    pub fn into_raw(self) -> Result<RawCandle, OandataError> {
        Ok(RawCandle {
            time: parse_time(&self.time)?,
            bid: self.bid.map(Into::into),
            ask: self.ask.map(Into::into),
            mid: self.mid.map(Into::into),
            volume: self.volume,
            complete: self.complete,
        })
    }
}
