use rust_decimal::Decimal;

/// Reference quote for a fixture instrument.
#[derive(Clone, Copy)]
pub struct Fixture {
    /// Midpoint price candles oscillate around.
    pub mid: Decimal,
    /// Smallest quoted price step.
    pub pip: Decimal,
    /// Bid/ask spread in pips.
    pub spread_pips: i64,
}

pub fn by_instrument(name: &str) -> Option<Fixture> {
    match name {
        "EUR_USD" => Some(Fixture {
            mid: Decimal::new(11_000, 4),
            pip: Decimal::new(1, 4),
            spread_pips: 2,
        }),
        "GBP_USD" => Some(Fixture {
            mid: Decimal::new(13_000, 4),
            pip: Decimal::new(1, 4),
            spread_pips: 3,
        }),
        "USD_JPY" => Some(Fixture {
            mid: Decimal::new(11_000, 2),
            pip: Decimal::new(1, 2),
            spread_pips: 2,
        }),
        _ => None,
    }
}
