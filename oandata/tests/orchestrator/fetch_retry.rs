use std::error::Error as _;

use crate::helpers::*;
use oandata::{FetchRequest, OandataError};
use oandata_mock::MockBehavior;

#[tokio::test]
async fn succeeds_after_bound_minus_one_failures() {
    let (oandata, controller) = scripted(3);
    controller
        .push_behaviors([fail("boom 1"), fail("boom 2"), ok(daily(&[1, 2, 3, 4, 5]))])
        .await;

    let req = FetchRequest::new("EUR_USD", d(2020, 1, 1), d(2020, 1, 5)).unwrap();
    let table = oandata.fetch(&req).await.unwrap();
    assert_eq!(table.len(), 5);

    let calls = controller.calls().await;
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|q| q.from == d(2020, 1, 1) && q.to == d(2020, 1, 5)));
}

#[tokio::test]
async fn exhausted_sub_range_aborts_without_touching_later_ones() {
    let (oandata, controller) = scripted(3);
    controller.set_default_behavior(fail("down")).await;

    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 4))
        .split(2)
        .build()
        .unwrap();
    let err = oandata.fetch(&req).await.unwrap_err();
    match &err {
        OandataError::FetchFailed {
            from,
            to,
            attempts,
            last,
        } => {
            assert_eq!((*from, *to), (d(2020, 1, 1), d(2020, 1, 2)));
            assert_eq!(*attempts, 3);
            assert_eq!(**last, OandataError::provider("scripted", "down"));
        }
        other => panic!("expected FetchFailed, got {other:?}"),
    }
    assert!(err.source().is_some());

    let calls = controller.calls().await;
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|q| q.to == d(2020, 1, 2)));
}

#[tokio::test]
async fn failure_in_a_later_sub_range_discards_earlier_data() {
    let (oandata, controller) = scripted(2);
    controller
        .push_behaviors([ok(daily(&[1, 2])), fail("boom 1"), fail("boom 2")])
        .await;

    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 4))
        .split(2)
        .build()
        .unwrap();
    let err = oandata.fetch(&req).await.unwrap_err();
    assert!(matches!(err, OandataError::FetchFailed { attempts: 2, .. }));
    assert_eq!(err.root_cause(), &OandataError::provider("scripted", "boom 2"));
    assert_eq!(controller.call_count().await, 3);
}

#[tokio::test]
async fn request_bound_overrides_orchestrator_default() {
    let (oandata, controller) = scripted(5);
    controller.set_default_behavior(fail("down")).await;

    let req = FetchRequest::builder("EUR_USD", d(2020, 1, 1), d(2020, 1, 1))
        .retry_bound(1)
        .build()
        .unwrap();
    let err = oandata.fetch(&req).await.unwrap_err();
    assert!(matches!(err, OandataError::FetchFailed { attempts: 1, .. }));
    assert_eq!(controller.call_count().await, 1);
}

#[tokio::test]
async fn untagged_provider_errors_are_attributed_and_retried() {
    let (oandata, controller) = scripted(2);
    controller
        .push_behaviors([
            MockBehavior::Fail(OandataError::Other("socket closed".into())),
            ok(daily(&[1])),
        ])
        .await;

    let req = FetchRequest::new("EUR_USD", d(2020, 1, 1), d(2020, 1, 1)).unwrap();
    assert_eq!(oandata.fetch(&req).await.unwrap().len(), 1);
    assert_eq!(controller.call_count().await, 2);

    controller.clear_all_behaviors().await;
    controller
        .set_default_behavior(MockBehavior::Fail(OandataError::Other("socket closed".into())))
        .await;
    let err = oandata.fetch(&req).await.unwrap_err();
    assert!(matches!(
        err.root_cause(),
        OandataError::Provider { provider, .. } if provider == "scripted"
    ));
}
