use crate::helpers::*;
use oandata::{CandleFragment, Decimal, FetchRequest, Granularity, OandataError, PriceKind};

#[tokio::test]
async fn all_empty_fragments_give_empty_table() {
    let (oandata, controller) = scripted(3);
    controller
        .set_default_behavior(ok(CandleFragment::empty()))
        .await;

    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 9))
        .split(3)
        .build()
        .unwrap();
    let table = oandata.fetch(&req).await.unwrap();
    assert!(table.is_empty());
    assert_eq!(table.instrument(), "EUR_USD");
    assert_eq!(controller.call_count().await, 3);
}

#[tokio::test]
async fn fragments_are_concatenated_in_range_order() {
    let (oandata, controller) = scripted(3);
    controller
        .push_behaviors([ok(daily(&[1, 2])), ok(CandleFragment::empty()), ok(daily(&[5, 6]))])
        .await;

    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 6))
        .split(3)
        .build()
        .unwrap();
    let table = oandata.fetch(&req).await.unwrap();
    let days: Vec<u32> = table
        .rows()
        .iter()
        .map(|r| chrono::Datelike::day(&r.time))
        .collect();
    assert_eq!(days, vec![1, 2, 5, 6]);

    let windows: Vec<_> = controller
        .calls()
        .await
        .into_iter()
        .map(|q| (q.from, q.to))
        .collect();
    assert_eq!(
        windows,
        vec![
            (d(2020, 1, 1), d(2020, 1, 2)),
            (d(2020, 1, 3), d(2020, 1, 4)),
            (d(2020, 1, 5), d(2020, 1, 6)),
        ]
    );
}

#[tokio::test]
async fn boundary_candle_returned_twice_is_kept_once() {
    let (oandata, controller) = scripted(3);
    let mut second = daily(&[2, 3, 4]).into_candles();
    second[0].mid = second[0].mid.map(|mut q| {
        q.c = Decimal::new(99_999, 4);
        q
    });
    controller
        .push_behaviors([ok(daily(&[1, 2])), ok(second.into())])
        .await;

    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 4))
        .split(2)
        .build()
        .unwrap();
    let table = oandata.fetch(&req).await.unwrap();
    assert_eq!(table.len(), 4);
    assert!(table.rows().windows(2).all(|w| w[0].time < w[1].time));
    // First occurrence wins.
    assert_eq!(table.rows()[1].close, Decimal::new(11_002, 4));
}

#[tokio::test]
async fn queries_carry_granularity_and_price() {
    let (oandata, controller) = scripted(3);
    controller
        .set_default_behavior(ok(CandleFragment::empty()))
        .await;

    let req = FetchRequest::builder("USD_JPY", d(2020, 1, 1), d(2020, 1, 1))
        .granularity(Granularity::H4)
        .price(PriceKind::Ask)
        .build()
        .unwrap();
    let table = oandata.fetch(&req).await.unwrap();
    assert_eq!(table.granularity(), Granularity::H4);
    assert_eq!(table.price(), PriceKind::Ask);

    let q = &controller.calls().await[0];
    assert_eq!(q.instrument, "USD_JPY");
    assert_eq!(q.granularity, Granularity::H4);
    assert_eq!(q.price, PriceKind::Ask);
}

#[tokio::test]
async fn missing_price_quad_is_fatal_and_not_retried() {
    let (oandata, controller) = scripted(3);
    // Fragments carry mid prices only.
    controller.set_default_behavior(ok(daily(&[1]))).await;

    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 1))
        .price(PriceKind::Bid)
        .build()
        .unwrap();
    let err = oandata.fetch(&req).await.unwrap_err();
    assert!(matches!(err, OandataError::Data(_)));
    assert_eq!(controller.call_count().await, 1);
}

#[derive(Clone, Default)]
struct LogBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn empty_sub_range_is_logged_with_its_bounds() {
    let buf = LogBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (oandata, controller) = scripted(3);
    controller
        .push_behaviors([ok(daily(&[1, 2])), ok(CandleFragment::empty())])
        .await;
    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 4))
        .split(2)
        .build()
        .unwrap();
    let table = oandata.fetch(&req).await.unwrap();
    assert_eq!(table.len(), 2);

    let logs = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    let warnings: Vec<&str> = logs
        .lines()
        .filter(|l| l.contains("no candles returned for sub-range"))
        .collect();
    assert_eq!(warnings.len(), 1, "logs: {logs}");
    assert!(warnings[0].contains("from=2020-01-03"));
    assert!(warnings[0].contains("to=2020-01-04"));
}
