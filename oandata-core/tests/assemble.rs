use oandata_core::{
    CandleFragment, CandleTable, DateTime, Decimal, Granularity, OandataError, PriceKind,
    PriceQuad, RawCandle, Utc, append_fragment, to_row,
};

fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_577_836_800 + secs, 0).unwrap()
}

fn quad(base: i64) -> PriceQuad {
    PriceQuad::new(
        Decimal::new(base, 4),
        Decimal::new(base + 20, 4),
        Decimal::new(base - 10, 4),
        Decimal::new(base + 5, 4),
    )
}

fn candle(secs: i64) -> RawCandle {
    RawCandle {
        time: ts(secs),
        bid: Some(quad(11_000)),
        ask: None,
        mid: Some(quad(11_001)),
        volume: 42,
        complete: true,
    }
}

#[test]
fn row_uses_selected_price_kind_only() {
    let row = to_row(&candle(0), PriceKind::Bid).unwrap();
    assert_eq!(row.open, Decimal::new(11_000, 4));
    assert_eq!(row.high, Decimal::new(11_020, 4));
    assert_eq!(row.low, Decimal::new(10_990, 4));
    assert_eq!(row.close, Decimal::new(11_005, 4));
    assert_eq!(row.volume, 42);
    assert!(row.complete);

    let mid = to_row(&candle(0), PriceKind::Mid).unwrap();
    assert_eq!(mid.open, Decimal::new(11_001, 4));
}

#[test]
fn missing_quad_is_data_error() {
    let err = to_row(&candle(0), PriceKind::Ask).unwrap_err();
    assert!(matches!(err, OandataError::Data(_)));
}

#[test]
fn fragments_append_in_order() {
    let mut table = CandleTable::new("EUR_USD", Granularity::H1, PriceKind::Mid);
    let first: CandleFragment = (0..3).map(|i| candle(i * 3600)).collect();
    let second: CandleFragment = (3..5).map(|i| candle(i * 3600)).collect();

    let a = append_fragment(&mut table, first).unwrap();
    let b = append_fragment(&mut table, second).unwrap();
    assert_eq!((a.appended, a.dropped), (3, 0));
    assert_eq!((b.appended, b.dropped), (2, 0));
    assert_eq!(table.len(), 5);
    assert!(table.rows().windows(2).all(|w| w[0].time < w[1].time));
}

#[test]
fn boundary_duplicates_are_dropped() {
    let mut table = CandleTable::new("EUR_USD", Granularity::D, PriceKind::Mid);
    append_fragment(&mut table, vec![candle(0), candle(86_400)].into()).unwrap();
    let stats =
        append_fragment(&mut table, vec![candle(86_400), candle(2 * 86_400)].into()).unwrap();
    assert_eq!(stats.appended, 1);
    assert_eq!(stats.dropped, 1);
    assert_eq!(table.len(), 3);
    assert_eq!(table.last_time(), Some(ts(2 * 86_400)));
}

#[test]
fn empty_fragment_is_a_no_op() {
    let mut table = CandleTable::new("EUR_USD", Granularity::D, PriceKind::Mid);
    let stats = append_fragment(&mut table, CandleFragment::empty()).unwrap();
    assert_eq!(stats.appended, 0);
    assert!(table.is_empty());
}

#[test]
fn failed_conversion_leaves_table_untouched() {
    let mut table = CandleTable::new("EUR_USD", Granularity::D, PriceKind::Bid);
    append_fragment(&mut table, vec![candle(0)].into()).unwrap();

    let mut broken = candle(2 * 86_400);
    broken.bid = None;
    let res = append_fragment(&mut table, vec![candle(86_400), broken].into());
    assert!(matches!(res, Err(OandataError::Data(_))));
    assert_eq!(table.len(), 1);
}
