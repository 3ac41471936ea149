use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::OandataError;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Candle bucket width accepted by the price server.
///
/// Codes follow the provider's wire names: `S5` is five seconds, `M1` one
/// minute, `H4` four hours. The bare `M` is one month, not a minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Granularity {
    /// 5 seconds.
    S5,
    /// 10 seconds.
    S10,
    /// 15 seconds.
    S15,
    /// 30 seconds.
    S30,
    /// 1 minute.
    M1,
    /// 2 minutes.
    M2,
    /// 4 minutes.
    M4,
    /// 5 minutes.
    M5,
    /// 10 minutes.
    M10,
    /// 15 minutes.
    M15,
    /// 30 minutes.
    M30,
    /// 1 hour.
    H1,
    /// 2 hours.
    H2,
    /// 3 hours.
    H3,
    /// 4 hours.
    H4,
    /// 6 hours.
    H6,
    /// 8 hours.
    H8,
    /// 12 hours.
    H12,
    /// 1 day.
    D,
    /// 1 week.
    W,
    /// 1 month, counted as 30 days.
    M,
}

impl Granularity {
    /// Every recognized granularity, finest first.
    pub const ALL: [Self; 21] = [
        Self::S5,
        Self::S10,
        Self::S15,
        Self::S30,
        Self::M1,
        Self::M2,
        Self::M4,
        Self::M5,
        Self::M10,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H6,
        Self::H8,
        Self::H12,
        Self::D,
        Self::W,
        Self::M,
    ];

    /// Wire code as used by the price server.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S5 => "S5",
            Self::S10 => "S10",
            Self::S15 => "S15",
            Self::S30 => "S30",
            Self::M1 => "M1",
            Self::M2 => "M2",
            Self::M4 => "M4",
            Self::M5 => "M5",
            Self::M10 => "M10",
            Self::M15 => "M15",
            Self::M30 => "M30",
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
            Self::H6 => "H6",
            Self::H8 => "H8",
            Self::H12 => "H12",
            Self::D => "D",
            Self::W => "W",
            Self::M => "M",
        }
    }

    /// Duration of one candle in seconds. Always strictly positive.
    #[must_use]
    pub const fn seconds(self) -> u64 {
        match self {
            Self::S5 => 5,
            Self::S10 => 10,
            Self::S15 => 15,
            Self::S30 => 30,
            Self::M1 => MINUTE,
            Self::M2 => 2 * MINUTE,
            Self::M4 => 4 * MINUTE,
            Self::M5 => 5 * MINUTE,
            Self::M10 => 10 * MINUTE,
            Self::M15 => 15 * MINUTE,
            Self::M30 => 30 * MINUTE,
            Self::H1 => HOUR,
            Self::H2 => 2 * HOUR,
            Self::H3 => 3 * HOUR,
            Self::H4 => 4 * HOUR,
            Self::H6 => 6 * HOUR,
            Self::H8 => 8 * HOUR,
            Self::H12 => 12 * HOUR,
            Self::D => DAY,
            Self::W => 7 * DAY,
            Self::M => 30 * DAY,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = OandataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| OandataError::invalid_granularity(s))
    }
}

impl TryFrom<String> for Granularity {
    type Error = OandataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Granularity> for String {
    fn from(g: Granularity) -> Self {
        g.as_str().to_string()
    }
}

/// Look up the candle width in seconds for a granularity code.
///
/// # Errors
/// Returns `InvalidGranularity` when `code` is not a recognized granularity.
pub fn seconds_per_unit(code: &str) -> Result<u64, OandataError> {
    code.parse::<Granularity>().map(Granularity::seconds)
}

/// Which quoted price the OHLC values of a candle represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriceKind {
    /// Bid side.
    Bid,
    /// Ask side.
    Ask,
    /// Midpoint between bid and ask.
    #[default]
    Mid,
}

impl PriceKind {
    /// Single-letter wire code (`B`, `A`, `M`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Bid => "B",
            Self::Ask => "A",
            Self::Mid => "M",
        }
    }

    /// Lowercase name, matching the key of the price quad in provider payloads.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
            Self::Mid => "mid",
        }
    }
}

impl fmt::Display for PriceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PriceKind {
    type Err = OandataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Self::Bid),
            "A" => Ok(Self::Ask),
            "M" => Ok(Self::Mid),
            other => Err(OandataError::InvalidArg(format!(
                "unknown price kind {other:?}; expected one of B, A, M"
            ))),
        }
    }
}

impl TryFrom<String> for PriceKind {
    type Error = OandataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriceKind> for String {
    fn from(p: PriceKind) -> Self {
        p.code().to_string()
    }
}
